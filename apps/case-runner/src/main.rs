mod config;
mod suites;

use self::config::RunnerConfig;
use self::suites::Suite;
use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use simple_testing::{setup_diagnostics, Evaluator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Evaluate built-in case suites", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "case-runner.toml")]
    config: String,

    #[arg(short, long, value_enum, default_value_t = Suite::All)]
    suite: Suite,

    /// Verbosity threshold; records with a higher priority are dropped
    #[arg(short, long)]
    level: Option<u32>,

    #[arg(long)]
    log_file: Option<String>,

    /// Write case listings and results to the log file instead of stdout
    #[arg(long)]
    to_file: bool,

    /// Abort a suite on the first mismatch
    #[arg(long)]
    strict: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Append internal diagnostics to this file
    #[arg(long)]
    trace_log: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    dotenv().ok();
    let args = Args::parse();
    let _guard = setup_diagnostics(args.trace_log.as_deref())?;

    info!("Loading config from: {}", args.config);
    let mut config = RunnerConfig::load(&args.config)?;
    if let Some(level) = args.level {
        config.level = level;
    }
    if let Some(log_file) = args.log_file {
        config.log_file = log_file;
    }
    config.strict |= args.strict;

    let evaluator = Evaluator::from_config(&config.to_evaluator_config()?);

    let summary = match suites::run(args.suite, &evaluator, args.to_file) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Evaluation aborted: {}", e);
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", summary.to_json());
    }
    info!(
        "Total: {} | Passed: {} | Mismatched: {} | Errored: {} | Pass Rate: {:.2}%",
        summary.total,
        summary.passed,
        summary.mismatched,
        summary.errored,
        summary.pass_rate()
    );

    Ok(if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
