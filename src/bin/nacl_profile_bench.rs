use clap::Parser;
use nacl_profile_bench::benches;
use nacl_profile_bench::harness::BenchConfig;
use nacl_profile_bench::profile::Profiler;
use nacl_profile_bench::provider::{LibraryVariant, NaclSuite};
use nacl_profile_bench::report;
use nacl_profile_bench::schema::{BenchReport, RunMeta};
use nacl_profile_bench::PrimitiveGroup;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nacl-profile-bench")]
#[command(about = "Profiling benchmark runner for NaCl-style crypto primitives")]
struct Args {
    /// Library variant to load (fast|portable).
    #[arg(long, default_value = "fast")]
    library: String,

    /// Seed for deterministic keypair generation.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Which primitive group(s) to benchmark.
    #[arg(long, value_enum, default_value_t = PrimitiveGroup::All)]
    group: PrimitiveGroup,

    /// Skip the advanced diagnostics (core profiling, memory patterns,
    /// CPU/OS info).
    #[arg(long, default_value_t = false)]
    skip_diagnostics: bool,

    /// Where to write the JSON report. If omitted, no JSON is produced.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn now_utc_rfc3339() -> String {
    // Avoid a chrono dependency; this is "good enough" for reports.
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("unix:{secs}")
}

fn git_sha_short() -> Option<String> {
    // Best-effort: read from environment set by CI/build scripts.
    std::env::var("GIT_SHA")
        .ok()
        .or_else(|| std::env::var("GITHUB_SHA").ok())
        .map(|s| s.chars().take(12).collect())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Resolve the library before anything else: an unknown variant is
    // fatal and nothing gets benchmarked.
    let variant = match LibraryVariant::resolve(&args.library) {
        Ok(variant) => variant,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    let suite = NaclSuite::load(variant);
    let cfg = BenchConfig { seed: args.seed };
    let mut profiler = Profiler::new();

    report::print_banner(variant.as_str());
    profiler.snapshot_memory("Initial baseline");

    let measurements = benches::primitives::run(&cfg, &suite, args.group, &mut profiler);

    if !args.skip_diagnostics {
        benches::salsa_core::run(&suite);
        benches::telemetry::analyze_memory_patterns(&suite, &mut profiler);
        benches::telemetry::analyze_cpu_usage();
    }

    report::print_profiling_summary(&profiler);

    if let Some(out) = args.out {
        let bench_report = BenchReport {
            run: RunMeta {
                schema_version: 1,
                bench_version: env!("CARGO_PKG_VERSION").to_string(),
                library: variant.as_str().to_string(),
                seed: cfg.seed,
                timestamp_utc: now_utc_rfc3339(),
                git_sha: git_sha_short(),
            },
            measurements,
        };
        let json = serde_json::to_string_pretty(&bench_report).map_err(io::Error::other)?;
        fs::write(out, json)?;
    }

    Ok(())
}
