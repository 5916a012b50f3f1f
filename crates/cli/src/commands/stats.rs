use std::path::PathBuf;

use clap::Args;
use giftwise_core::PersonaStats;

use crate::commands::{read_personas, CommandResult};

const COMMAND: &str = "stats";

#[derive(Debug, Clone, Args)]
pub struct StatsArgs {
    #[arg(help = "Path to a persona JSON file (object or array)")]
    pub personas: PathBuf,
}

pub fn run(args: StatsArgs) -> CommandResult {
    match read_personas(COMMAND, &args.personas) {
        Ok(personas) => CommandResult::document(COMMAND, &PersonaStats::compute(&personas), 0),
        Err(result) => result,
    }
}
