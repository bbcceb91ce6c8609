use serde::{Deserialize, Serialize};

use crate::harness::Measured;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub bench_version: String,
    pub library: String,
    pub seed: u64,
    pub timestamp_utc: String,
    pub git_sha: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub name: String,

    pub iterations: u64,
    pub elapsed_ms: f64,
    pub ms_per_op: f64,
    pub ops_per_sec: f64,

    pub bytes_processed: Option<u64>,
    pub bytes_per_sec: Option<f64>,

    pub extra: serde_json::Value,
}

impl Measurement {
    pub fn from_measured(name: &str, m: &Measured, bytes: Option<u64>) -> Self {
        Measurement {
            name: name.to_string(),
            iterations: m.iterations,
            elapsed_ms: m.elapsed_ms,
            ms_per_op: m.ms_per_op,
            ops_per_sec: m.ops_per_sec,
            bytes_processed: bytes,
            bytes_per_sec: m.bytes_per_sec,
            extra: serde_json::Value::Null,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    pub run: RunMeta,
    pub measurements: Vec<Measurement>,
}
