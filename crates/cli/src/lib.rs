pub mod commands;

use clap::{Parser, Subcommand};
use giftwise_core::config::{AppConfig, LoadOptions, LogFormat};
use std::process::ExitCode;

use commands::batch::BatchArgs;
use commands::recommend::RecommendArgs;
use commands::stats::StatsArgs;

#[derive(Debug, Parser)]
#[command(
    name = "giftwise",
    about = "Giftwise gift recommendation CLI",
    long_about = "Recommend gifts for persona profiles, inspect catalogs and configuration, \
                  and check provider readiness.",
    after_help = "Examples:\n  \
                  giftwise recommend --persona alice.json --offline --seed 42\n  \
                  giftwise batch team.json\n  \
                  giftwise doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Recommend gifts for a single persona and print the result as JSON")]
    Recommend(RecommendArgs),
    #[command(about = "Recommend gifts for up to 10 personas with per-persona results and errors")]
    Batch(BatchArgs),
    #[command(about = "Summarize interests and notes across personas")]
    Stats(StatsArgs),
    #[command(about = "List gift categories and their keywords")]
    Categories,
    #[command(about = "List personality traits, flat and grouped")]
    Traits,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, completion provider readiness, and the keyword engine")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Recommend(args) => commands::recommend::run(args),
        Command::Batch(args) => commands::batch::run(args),
        Command::Stats(args) => commands::stats::run(args),
        Command::Categories => commands::catalog::categories(),
        Command::Traits => commands::catalog::traits(),
        Command::Config => commands::config::run(),
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout stays a clean JSON document. A broken config
/// falls back to defaults here; the command itself reports the error.
fn init_logging() {
    use tracing::Level;

    let config = AppConfig::load(LoadOptions::default()).unwrap_or_default();
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let initialized = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if initialized.is_err() {
        eprintln!("giftwise: logging was already initialized");
    }
}
