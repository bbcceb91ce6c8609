//! Console rendering: aligned benchmark rows and the end-of-run
//! profiling summary sections.

use crate::harness::Measured;
use crate::profile::Profiler;

const MIB: f64 = 1024.0 * 1024.0;

/// One aligned result row: name, iterations, ms/op, ops/sec, MiB/s.
pub fn format_row(name: &str, m: &Measured) -> String {
    let ops = format!("{} ops", m.iterations);
    let ms_per_op = format!("{:.2} ms/op", m.ms_per_op);
    let ops_per_sec = format!("{:.2} ops/sec", m.ops_per_sec);
    let mib_per_sec = match m.bytes_per_sec {
        Some(bps) => format!("{:.2} MiB/s", bps / MIB),
        None => String::new(),
    };
    format!("{name:<25} {ops:>20} {ms_per_op:>20} {ops_per_sec:>20} {mib_per_sec:>15}")
}

pub fn print_row(name: &str, m: &Measured) {
    println!("{}", format_row(name, m));
}

pub fn print_banner(library: &str) {
    println!();
    println!("Profiling enabled. Run with detailed data collection.");
    println!("Using library: {library}");
    println!();
}

/// End-of-run summary: memory snapshots, call counts, timing aggregates.
pub fn print_profiling_summary(profiler: &Profiler) {
    println!();
    println!("--------- DETAILED PROFILING INFORMATION ---------");

    let snapshots = profiler.memory_snapshots();
    if !snapshots.is_empty() {
        println!();
        println!("=== MEMORY USAGE ===");
        for snap in snapshots {
            println!("{}:", snap.label);
            println!("  RSS: {:.2} MB", snap.rss_bytes as f64 / MIB);
            println!("  Virtual: {:.2} MB", snap.virtual_bytes as f64 / MIB);
        }
    }

    println!();
    println!("=== FUNCTION CALL COUNTS ===");
    for (name, count) in profiler.call_counts() {
        println!("{name:<30}: {count} calls");
    }

    println!();
    println!("=== DETAILED TIMING ===");
    for (name, stats) in profiler.timing_stats() {
        let calls = format!("{} calls", stats.calls);
        let avg = format!("{:.3} ms avg", stats.avg_ms());
        let min = format!("{:.3} ms min", stats.min_ms);
        let max = format!("{:.3} ms max", stats.max_ms);
        let total = format!("{:.3} ms total", stats.total_ms);
        println!("{name:<30}: {calls:>15} {avg:>15} {min:>15} {max:>15} {total:>17}");
    }

    println!();
    println!("--------- END PROFILING INFORMATION ---------");
    println!();
}
