//! Recommendation orchestration.
//!
//! One request walks `Start → TryAi → (AiOk | AiFailed) → FallbackIfNeeded →
//! Pad → Truncate → Done`. The completion call is the only suspension point.
//! It is attempted once, bounded by a timeout, and any failure is absorbed:
//! the keyword engine always fills the remaining slots.

use std::time::Duration;

use chrono::{DateTime, Utc};
use giftwise_core::config::AppConfig;
use giftwise_core::errors::DomainError;
use giftwise_core::gifts::{
    parse_suggestions, trace_stage, GiftEngine, RecommendationContext, RecommendationStage,
};
use giftwise_core::{ParsedSuggestion, PersonaProfile, RecommendationResult, Taxonomy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::llm::{LlmClient, ProviderError};
use crate::providers::build_client;

pub const MAX_BATCH_SIZE: usize = 10;

pub struct GiftRecommender<C> {
    engine: GiftEngine,
    client: C,
    timeout: Duration,
}

impl GiftRecommender<Box<dyn LlmClient>> {
    /// Engine, provider client and timeout as configured.
    pub fn from_config(config: &AppConfig) -> Self {
        let engine = GiftEngine::new(Taxonomy::builtin())
            .with_target_count(config.recommendation.target_count);
        let timeout = Duration::from_secs(config.llm.timeout_secs);
        Self::new(engine, build_client(&config.llm), timeout)
    }
}

impl<C: LlmClient> GiftRecommender<C> {
    pub fn new(engine: GiftEngine, client: C, timeout: Duration) -> Self {
        Self { engine, client, timeout }
    }

    pub fn engine(&self) -> &GiftEngine {
        &self.engine
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Wall clock and an entropy-seeded generator.
    pub async fn recommend(&self, persona: &PersonaProfile) -> RecommendationResult {
        let mut rng = StdRng::from_entropy();
        self.recommend_with(persona, Utc::now(), &mut rng).await
    }

    pub async fn recommend_with<R>(
        &self,
        persona: &PersonaProfile,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> RecommendationResult
    where
        R: Rng + Send,
    {
        let context = match self.engine.prepare(persona, now.date_naive()) {
            Ok(context) => context,
            Err(error) => {
                warn!(
                    event_name = "gift.recommend.rejected",
                    persona_id = ?persona.id,
                    error = %error,
                    "persona cannot be recommended for"
                );
                return GiftEngine::failure(persona, &error, now);
            }
        };

        let parsed = self.try_ai(&context).await;
        let result = self.engine.finish(&context, &parsed, now, rng);

        info!(
            event_name = "gift.recommend.completed",
            persona = %result.persona_name,
            ai_generated = result.ai_generated,
            recommendations = result.recommendations.len(),
            total_options = result.total_options,
            "gift recommendation completed"
        );
        result
    }

    async fn try_ai(&self, context: &RecommendationContext<'_>) -> Vec<ParsedSuggestion> {
        if !self.client.is_configured() {
            debug!(
                event_name = "gift.recommend.ai_skipped",
                provider = self.client.name(),
                "completion provider not configured"
            );
            return Vec::new();
        }

        trace_stage(RecommendationStage::TryAi, &context.subject);
        let prompt = self.engine.prompt(context);

        let call = self.client.complete(&prompt, self.timeout);
        let completion = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout { secs: self.timeout.as_secs() }),
        };

        let text = match completion {
            Ok(text) => text,
            Err(error) => {
                warn!(
                    event_name = "gift.recommend.ai_failed",
                    provider = self.client.name(),
                    error_kind = error.kind(),
                    error = %error,
                    "completion failed, falling back to keyword recommendations"
                );
                trace_stage(RecommendationStage::AiFailed, &context.subject);
                return Vec::new();
            }
        };

        match parse_suggestions(&text, self.engine.target_count()) {
            Ok(items) => {
                trace_stage(RecommendationStage::AiOk, &context.subject);
                items
            }
            Err(ambiguity) => {
                warn!(
                    event_name = "gift.recommend.ai_failed",
                    provider = self.client.name(),
                    error_kind = "parse_ambiguity",
                    error = %ambiguity,
                    "completion had no list items, falling back to keyword recommendations"
                );
                trace_stage(RecommendationStage::AiFailed, &context.subject);
                Vec::new()
            }
        }
    }

    pub async fn recommend_batch(
        &self,
        personas: &[PersonaProfile],
    ) -> Result<BatchOutcome, DomainError> {
        let mut rng = StdRng::from_entropy();
        self.recommend_batch_with(personas, Utc::now(), &mut rng).await
    }

    /// Recommends for up to [`MAX_BATCH_SIZE`] personas in order. A persona
    /// that fails lands in `errors`; the batch itself only fails on size.
    pub async fn recommend_batch_with<R>(
        &self,
        personas: &[PersonaProfile],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<BatchOutcome, DomainError>
    where
        R: Rng + Send,
    {
        if personas.is_empty() || personas.len() > MAX_BATCH_SIZE {
            return Err(DomainError::InvalidBatchSize { size: personas.len(), max: MAX_BATCH_SIZE });
        }

        let mut results = Vec::new();
        let mut errors = Vec::new();
        for persona in personas {
            let result = self.recommend_with(persona, now, rng).await;
            if result.success {
                results.push(BatchEntry { persona_id: persona.id, result });
            } else {
                errors.push(BatchError {
                    persona_id: persona.id,
                    persona_name: result.persona_name,
                    error: result
                        .error
                        .unwrap_or_else(|| "failed to generate recommendations".to_string()),
                });
            }
        }

        let summary = BatchSummary {
            total_requested: personas.len(),
            total_success: results.len(),
            total_errors: errors.len(),
        };
        info!(
            event_name = "gift.recommend.batch_completed",
            total_requested = summary.total_requested,
            total_success = summary.total_success,
            total_errors = summary.total_errors,
            "batch recommendation completed"
        );
        Ok(BatchOutcome { results, errors, summary })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub results: Vec<BatchEntry>,
    pub errors: Vec<BatchError>,
    pub summary: BatchSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub persona_id: Option<Uuid>,
    #[serde(flatten)]
    pub result: RecommendationResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchError {
    pub persona_id: Option<Uuid>,
    pub persona_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_requested: usize,
    pub total_success: usize,
    pub total_errors: usize,
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use giftwise_core::errors::DomainError;
    use giftwise_core::gifts::GiftEngine;
    use giftwise_core::PersonaProfile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{GiftRecommender, MAX_BATCH_SIZE};
    use crate::llm::{DisabledLlmClient, LlmClient, ProviderError};

    enum Reply {
        Text(&'static str),
        Fail(ProviderError),
        Hang,
    }

    struct ScriptedClient {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(reply: Reply) -> Self {
            Self { reply, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn complete(
            &self,
            _prompt: &str,
            _timeout: Duration,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Text(text) => Ok((*text).to_string()),
                Reply::Fail(error) => Err(error.clone()),
                Reply::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok("1. Too late".to_string())
                }
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid time")
    }

    fn alice() -> PersonaProfile {
        PersonaProfile::new("Alice")
            .with_birth_date(NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"))
            .with_interests(["yoga"])
            .with_notes("loves coffee")
    }

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn recommender(reply: Reply) -> GiftRecommender<ScriptedClient> {
        let client = ScriptedClient::new(reply);
        GiftRecommender::new(GiftEngine::default(), client, Duration::from_millis(200))
    }

    fn offline() -> GiftRecommender<DisabledLlmClient> {
        let client = DisabledLlmClient::new("off");
        GiftRecommender::new(GiftEngine::default(), client, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn full_ai_answer_is_used_as_is() {
        let recommender = recommender(Reply::Text(
            "İşte öneriler:\n\
             1. Yoga retreat - Huzur için\n\
             2. Barista kursu - Kahve aşkı\n\
             3. Aroma difüzör - Sakinlik",
        ));
        let result = recommender.recommend_with(&alice(), now(), &mut seeded(1)).await;

        assert!(result.success);
        assert!(result.ai_generated);
        let titles = result.recommendations.iter().map(|s| s.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Yoga retreat", "Barista kursu", "Aroma difüzör"]);
        assert_eq!(result.recommendations[1].reason, "Kahve aşkı");
        assert_eq!(recommender.client().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn partial_ai_answer_is_topped_up() {
        let recommender = recommender(Reply::Text("1. Yoga retreat"));
        let result = recommender.recommend_with(&alice(), now(), &mut seeded(2)).await;

        assert!(result.ai_generated);
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.recommendations[0].title, "Yoga retreat");
        assert_eq!(
            result.recommendations[0].reason,
            "Alice için kişisel zevklerine göre seçilmiş özel hediye"
        );
    }

    #[tokio::test]
    async fn provider_errors_fall_back_without_retry() {
        let failures = [
            ProviderError::from_status(500, "boom"),
            ProviderError::Transport("connection refused".into()),
            ProviderError::EmptyResponse,
            ProviderError::Malformed("missing `candidates`".into()),
        ];

        for error in failures {
            let recommender = recommender(Reply::Fail(error));
            let result = recommender.recommend_with(&alice(), now(), &mut seeded(3)).await;
            assert!(result.success);
            assert!(!result.ai_generated);
            assert_eq!(result.recommendations.len(), 3);
            assert_eq!(recommender.client().calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn prose_without_items_falls_back() {
        let recommender = recommender(Reply::Text("Maalesef şu an öneri veremiyorum."));
        let result = recommender.recommend_with(&alice(), now(), &mut seeded(4)).await;
        assert!(result.success);
        assert!(!result.ai_generated);
        assert_eq!(result.recommendations.len(), 3);
    }

    #[tokio::test]
    async fn slow_provider_is_cut_off_by_timeout() {
        let recommender = recommender(Reply::Hang);
        let started = std::time::Instant::now();
        let result = recommender.recommend_with(&alice(), now(), &mut seeded(5)).await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(result.success);
        assert!(!result.ai_generated);
        assert_eq!(result.recommendations.len(), 3);
    }

    #[tokio::test]
    async fn disabled_client_matches_the_pure_engine() {
        let recommender = offline();
        let orchestrated = recommender.recommend_with(&alice(), now(), &mut seeded(6)).await;
        let direct = GiftEngine::default().recommend(&alice(), now(), &mut seeded(6));
        assert_eq!(orchestrated, direct);
    }

    #[tokio::test]
    async fn invalid_persona_never_reaches_the_provider() {
        let recommender = recommender(Reply::Text("1. Kupa"));
        let persona = PersonaProfile::default();
        let result = recommender.recommend_with(&persona, now(), &mut seeded(7)).await;

        assert!(!result.success);
        assert!(result.recommendations.is_empty());
        assert_eq!(recommender.client().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn batch_splits_results_and_errors() {
        let recommender = offline();
        let personas = vec![alice(), PersonaProfile::default(), PersonaProfile::new("Bora")];

        let outcome = recommender
            .recommend_batch_with(&personas, now(), &mut seeded(8))
            .await
            .expect("batch within limits");
        assert_eq!(outcome.summary.total_requested, 3);
        assert_eq!(outcome.summary.total_success, 2);
        assert_eq!(outcome.summary.total_errors, 1);
        assert_eq!(outcome.errors[0].persona_name, "Kişi");

        let json = serde_json::to_value(&outcome).expect("serializable");
        assert_eq!(json["summary"]["totalSuccess"], 2);
        assert_eq!(json["results"][0]["personaName"], "Alice");
    }

    #[tokio::test]
    async fn batch_size_is_bounded() {
        let recommender = offline();
        let too_many = vec![alice(); MAX_BATCH_SIZE + 1];

        let error = recommender.recommend_batch(&too_many).await.expect_err("too many");
        assert_eq!(error, DomainError::InvalidBatchSize { size: 11, max: 10 });
        assert!(recommender.recommend_batch(&[]).await.is_err());
    }
}
