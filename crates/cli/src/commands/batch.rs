use std::path::PathBuf;

use clap::Args;
use giftwise_agent::GiftRecommender;
use giftwise_core::ApplicationError;

use crate::commands::{
    load_config, parse_now, read_personas, rng_from, runtime, CommandResult, EXIT_INVALID_REQUEST,
};

const COMMAND: &str = "batch";

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    #[arg(help = "Path to a JSON array of personas")]
    pub personas: PathBuf,
    #[arg(long, help = "Seed the random generator for reproducible output")]
    pub seed: Option<u64>,
    #[arg(long, help = "Skip the completion provider and use keyword recommendations only")]
    pub offline: bool,
    #[arg(long, help = "Evaluate ages and timestamps at this RFC 3339 instant")]
    pub now: Option<String>,
}

pub fn run(args: BatchArgs) -> CommandResult {
    match execute(args) {
        Ok(result) | Err(result) => result,
    }
}

fn execute(args: BatchArgs) -> Result<CommandResult, CommandResult> {
    let config = load_config(COMMAND, args.offline)?;
    let now = parse_now(COMMAND, args.now.as_deref())?;
    let personas = read_personas(COMMAND, &args.personas)?;

    let recommender = GiftRecommender::from_config(&config);
    let mut rng = rng_from(args.seed);
    let outcome = runtime(COMMAND)?
        .block_on(recommender.recommend_batch_with(&personas, now, &mut rng))
        .map_err(|error| {
            let interface = ApplicationError::from(error).into_interface(COMMAND);
            let message = interface.to_string();
            CommandResult::failure(COMMAND, interface.class(), message, EXIT_INVALID_REQUEST)
        })?;

    Ok(CommandResult::document(COMMAND, &outcome, 0))
}
