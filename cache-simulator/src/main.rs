use cache_simulator::runner;
use cache_simulator::stats::RunStats;
use clap::Parser;
use lirs_rs::EngineConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// LIRS cache replacement simulator.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the trace file.
    #[arg(short, long, value_name = "TRACE")]
    input: PathBuf,

    /// Cache capacity (number of blocks).
    #[arg(short = 's', long, value_name = "cacheSize")]
    cache_size: u64,

    /// Cap on |S| as a multiple of cache_size.
    #[arg(short = 'f', long, value_name = "sizeLimitFactor", default_value = "2.0")]
    size_limit_factor: f64,

    /// Percentage of the cache reserved for resident HIR blocks.
    #[arg(short = 'r', long, value_name = "hirPercent", default_value = "1")]
    hir_percent: u32,

    /// Read the trace as one decimal integer per line instead of binary
    /// 8-byte little-endian records.
    #[arg(short, long)]
    ascii: bool,

    /// Write the final statistics row to this path as CSV.
    #[arg(short = 'o', long, value_name = "PATH")]
    csv_output: Option<PathBuf>,

    /// Raise the diagnostic log level (info by default; -v for debug).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = EngineConfig {
        cache_size: args.cache_size,
        size_limit_factor: args.size_limit_factor,
        hir_percent: args.hir_percent,
    };

    let outcome = match runner::run(&args.input, args.ascii, config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let run_stats = RunStats::from_engine(&outcome.engine);
    run_stats.print();
    println!("duration:      {:.3?}", outcome.duration);

    if let Some(path) = &args.csv_output {
        match run_stats.export_csv(path) {
            Ok(()) => println!("\nResults exported to: {}", path.display()),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
