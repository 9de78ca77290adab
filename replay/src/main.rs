use clap::{Parser, Subcommand};
use lru_replay::generator::{TraceConfig, TraceGenerator};
use lru_replay::models::ReplayConfig;
use lru_replay::runner::ReplayRunner;
use lru_replay::{demo, stats};
use std::path::PathBuf;

/// LRU cache replay CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the scripted walkthrough on a capacity-3 cache (default)
    Demo,

    /// Generate a synthetic trace
    Generate {
        /// Number of requests
        #[arg(long, default_value = "100000")]
        requests: usize,

        /// Number of distinct keys
        #[arg(long, default_value = "10000")]
        keys: usize,

        /// Number of hot keys
        #[arg(long, default_value = "2000")]
        hot_keys: usize,

        /// Percentage of traffic that targets the hot keys
        #[arg(long, default_value = "80")]
        hot_percent: u8,

        /// Random seed, for reproducible traces
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file
        #[arg(short, long, default_value = "trace.csv")]
        output: PathBuf,
    },

    /// Replay a trace as a read-through cache
    Replay {
        /// Trace file (CSV with a `key,value` header)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Cache capacity (number of entries)
        #[arg(short, long, default_value = "1000")]
        capacity: usize,

        /// Export the result to a CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,

        /// Skip the comparison against the `lru` crate
        #[arg(long)]
        no_verify: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command.unwrap_or(Commands::Demo) {
        Commands::Demo => {
            let report = demo::run()?;
            demo::print_report(&report);
            Ok(())
        }

        Commands::Generate {
            requests,
            keys,
            hot_keys,
            hot_percent,
            seed,
            output,
        } => {
            let config = TraceConfig {
                requests,
                unique_keys: keys,
                hot_keys,
                hot_percent,
                seed,
                output,
            };
            TraceGenerator::new(config).generate()?;
            Ok(())
        }

        Commands::Replay {
            input,
            capacity,
            output_csv,
            no_verify,
        } => run_replay(input, capacity, output_csv, !no_verify),
    }
}

/// Replay a trace, print the summary and fail if the reference disagreed
fn run_replay(
    input: PathBuf,
    capacity: usize,
    output_csv: Option<PathBuf>,
    verify: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Trace Replay");
    println!("============");
    println!("Input: {}", input.display());
    println!("Cache capacity: {} entries", capacity);
    println!("Verify against lru crate: {}", if verify { "yes" } else { "no" });

    let runner = ReplayRunner::new(ReplayConfig {
        input,
        capacity,
        verify,
    });
    let result = match runner.run() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error running replay: {e}");
            return Err(e.into());
        }
    };

    stats::print_summary(&result);

    if let Some(csv_path) = output_csv {
        match stats::export_csv(&result, &csv_path) {
            Ok(()) => println!("\nResults exported to: {}", csv_path.display()),
            Err(e) => eprintln!("Failed to export CSV: {e}"),
        }
    }

    if result.stats.divergences > 0 {
        return Err(format!(
            "{} divergences from the reference cache",
            result.stats.divergences
        )
        .into());
    }
    Ok(())
}
