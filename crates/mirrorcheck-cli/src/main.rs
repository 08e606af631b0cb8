mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{check::CheckArgs, inspect::InspectArgs, Outcome};
use mirrorcheck_core::CheckError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mirrorcheck",
    about = "Compare a mirror's last-sync time with its upstream and fail when it falls behind",
    version,
    propagate_version = true
)]
struct Cli {
    /// YAML file with threshold_hours, timeout_seconds and user_agent
    #[arg(long, global = true, env = "MIRRORCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Per-fetch timeout in seconds (default 30)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log fetches and extracted timestamps to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch both status pages and exit 1 if they are more than the threshold apart
    Check(CheckArgs),

    /// Fetch one status page and print the timestamp it carries
    Inspect(InspectArgs),

    /// List supported status page formats
    Kinds,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Check(args) => cmd::check::run(args, config, cli.timeout, cli.json),
        Commands::Inspect(args) => {
            cmd::inspect::run(args, config, cli.timeout, cli.json).map(|()| Outcome::Ok)
        }
        Commands::Kinds => cmd::kinds::run(cli.json).map(|()| Outcome::Ok),
    };

    match result {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            let code = e
                .downcast_ref::<CheckError>()
                .map(CheckError::exit_code)
                .unwrap_or(1);
            std::process::exit(code);
        }
    }
}
