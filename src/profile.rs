//! Process-scoped profiling accumulator: call counts, per-operation
//! timing aggregates, and labelled memory snapshots.
//!
//! Owned by the driver and threaded through every benchmarked call site;
//! the whole run is single-threaded so no locking is involved. Memory
//! capture is best-effort: when the current process cannot be inspected,
//! the snapshot is simply not recorded.

use std::collections::HashMap;
use std::time::Instant;

use sysinfo::{Pid, System};

/// Running timing aggregate for one named operation.
#[derive(Clone, Copy, Debug)]
pub struct SpanStats {
    pub calls: u64,
    pub total_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl SpanStats {
    fn new() -> Self {
        SpanStats {
            calls: 0,
            total_ms: 0.0,
            min_ms: f64::INFINITY,
            max_ms: 0.0,
        }
    }

    fn record(&mut self, elapsed_ms: f64) {
        self.calls += 1;
        self.total_ms += elapsed_ms;
        self.min_ms = self.min_ms.min(elapsed_ms);
        self.max_ms = self.max_ms.max(elapsed_ms);
    }

    pub fn avg_ms(&self) -> f64 {
        if self.calls == 0 {
            return 0.0;
        }
        self.total_ms / self.calls as f64
    }
}

/// Point-in-time process memory reading.
#[derive(Clone, Debug)]
pub struct MemorySnapshot {
    pub label: String,
    pub rss_bytes: u64,
    pub virtual_bytes: u64,
}

pub struct Profiler {
    calls: HashMap<String, u64>,
    timings: HashMap<String, SpanStats>,
    memory: Vec<MemorySnapshot>,
    system: System,
    pid: Option<Pid>,
}

impl Profiler {
    pub fn new() -> Self {
        Profiler {
            calls: HashMap::new(),
            timings: HashMap::new(),
            memory: Vec::new(),
            system: System::new(),
            pid: sysinfo::get_current_pid().ok(),
        }
    }

    /// Increment the call counter for `name`.
    pub fn count_call(&mut self, name: &str) {
        *self.calls.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Time `f`, fold the elapsed duration into the aggregate for `name`,
    /// and hand back the closure's result.
    pub fn time_span<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
        self.record_span(name, elapsed_ms);
        result
    }

    /// Fold an externally measured duration into the aggregate for `name`.
    pub fn record_span(&mut self, name: &str, elapsed_ms: f64) {
        self.timings
            .entry(name.to_string())
            .or_insert_with(SpanStats::new)
            .record(elapsed_ms);
    }

    /// Capture current process memory under `label`. No-op when the
    /// process is not inspectable.
    pub fn snapshot_memory(&mut self, label: &str) {
        if let Some((rss, virt)) = self.current_memory() {
            self.memory.push(MemorySnapshot {
                label: label.to_string(),
                rss_bytes: rss,
                virtual_bytes: virt,
            });
        }
    }

    /// Current process (RSS, virtual) in bytes, if inspectable.
    pub fn current_memory(&mut self) -> Option<(u64, u64)> {
        let pid = self.pid?;
        if !self.system.refresh_process(pid) {
            return None;
        }
        let proc = self.system.process(pid)?;
        Some((proc.memory(), proc.virtual_memory()))
    }

    pub fn memory_snapshots(&self) -> &[MemorySnapshot] {
        &self.memory
    }

    /// Call counts, sorted descending by count (name breaks ties).
    pub fn call_counts(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self
            .calls
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    /// Timing aggregates, sorted descending by total time.
    pub fn timing_stats(&self) -> Vec<(&str, SpanStats)> {
        let mut rows: Vec<(&str, SpanStats)> = self
            .timings
            .iter()
            .map(|(name, stats)| (name.as_str(), *stats))
            .collect();
        rows.sort_by(|a, b| b.1.total_ms.total_cmp(&a.1.total_ms).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
