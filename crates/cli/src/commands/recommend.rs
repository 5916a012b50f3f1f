use std::path::PathBuf;

use clap::Args;
use giftwise_agent::{GiftRecommender, LlmClient};
use giftwise_core::ApplicationError;
use tracing::info;

use crate::commands::{
    load_config, parse_now, read_personas, rng_from, runtime, CommandResult, EXIT_INVALID_REQUEST,
    EXIT_UNSUCCESSFUL,
};

const COMMAND: &str = "recommend";

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    #[arg(long, short, help = "Path to a persona JSON file")]
    pub persona: PathBuf,
    #[arg(long, help = "Seed the random generator for reproducible output")]
    pub seed: Option<u64>,
    #[arg(long, help = "Skip the completion provider and use keyword recommendations only")]
    pub offline: bool,
    #[arg(long, help = "Evaluate ages and timestamps at this RFC 3339 instant")]
    pub now: Option<String>,
}

pub fn run(args: RecommendArgs) -> CommandResult {
    match execute(args) {
        Ok(result) | Err(result) => result,
    }
}

fn execute(args: RecommendArgs) -> Result<CommandResult, CommandResult> {
    let config = load_config(COMMAND, args.offline)?;
    let now = parse_now(COMMAND, args.now.as_deref())?;
    let mut personas = read_personas(COMMAND, &args.persona)?;
    if personas.len() != 1 {
        let interface = ApplicationError::InvalidInput(format!(
            "expected exactly one persona, found {} (use `batch` for lists)",
            personas.len()
        ))
        .into_interface(COMMAND);
        return Err(CommandResult::failure(
            COMMAND,
            interface.class(),
            interface.to_string(),
            EXIT_INVALID_REQUEST,
        ));
    }
    let persona = personas.remove(0);

    let recommender = GiftRecommender::from_config(&config);
    info!(
        event_name = "cli.recommend.start",
        provider = recommender.client().name(),
        target_count = recommender.engine().target_count(),
        "recommending gifts"
    );

    let mut rng = rng_from(args.seed);
    let result = runtime(COMMAND)?.block_on(recommender.recommend_with(&persona, now, &mut rng));
    let exit_code = if result.success { 0 } else { EXIT_UNSUCCESSFUL };
    Ok(CommandResult::document(COMMAND, &result, exit_code))
}
