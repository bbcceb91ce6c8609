use std::hint::black_box;
use std::time::Instant;

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Samples shorter than this are discarded: the clock cannot resolve them.
pub const MEASUREMENT_FLOOR_MS: f64 = 1.0;

/// Keep accumulating batches until at least this much time has been measured.
pub const TIME_BUDGET_MS: f64 = 500.0;

/// Minimum number of recorded calls before the timer may terminate.
pub const MIN_ITERATIONS: u64 = 3;

#[derive(Clone, Debug)]
pub struct BenchConfig {
    pub seed: u64,
}

impl BenchConfig {
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }
}

/// Result of timing one operation with the adaptive timer.
#[derive(Clone, Copy, Debug)]
pub struct Measured {
    pub iterations: u64,
    pub elapsed_ms: f64,
    pub ms_per_op: f64,
    pub ops_per_sec: f64,
    pub bytes_per_sec: Option<f64>,
}

/// Time `f` until a statistically stable average emerges.
///
/// Runs `f` once unmeasured to warm up, then times batches of calls.
/// A batch that finishes under [`MEASUREMENT_FLOOR_MS`] is discarded and
/// the batch size doubled; recorded batches accumulate until the elapsed
/// total exceeds [`TIME_BUDGET_MS`] with at least [`MIN_ITERATIONS`]
/// calls on the books. `bytes` is the per-call payload size, used for
/// throughput reporting.
pub fn measure<T>(mut f: impl FnMut() -> T, bytes: Option<u64>) -> Measured {
    let mut now_ms = {
        let origin = Instant::now();
        move || origin.elapsed().as_secs_f64() * 1e3
    };
    measure_with_clock(&mut f, &mut now_ms, bytes)
}

/// Timer core with an injectable millisecond clock.
fn measure_with_clock<T>(
    f: &mut impl FnMut() -> T,
    now_ms: &mut impl FnMut() -> f64,
    bytes: Option<u64>,
) -> Measured {
    // Unmeasured warm-up call.
    black_box(f());

    let mut elapsed = 0.0f64;
    let mut iterations = 0u64;
    let mut runs_per_batch = 1u64;
    loop {
        let start = now_ms();
        for _ in 0..runs_per_batch {
            black_box(f());
        }
        let diff = now_ms() - start;

        // Below the floor the sample is noise: discard it and try a
        // batch twice as large.
        if diff < MEASUREMENT_FLOOR_MS {
            runs_per_batch *= 2;
            continue;
        }

        elapsed += diff;
        iterations += runs_per_batch;
        if elapsed > TIME_BUDGET_MS && iterations >= MIN_ITERATIONS {
            break;
        }
    }

    let ms_per_op = elapsed / iterations as f64;
    Measured {
        iterations,
        elapsed_ms: elapsed,
        ms_per_op,
        ops_per_sec: 1e3 / ms_per_op,
        bytes_per_sec: bytes.map(|b| b as f64 * 1e3 / ms_per_op),
    }
}
