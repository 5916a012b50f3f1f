//! Deterministic recommendation engine.
//!
//! The engine never performs I/O. The generative path is driven from the
//! outside: callers [`GiftEngine::prepare`] a context, render a prompt from it,
//! obtain completion text however they like and hand the parsed items back to
//! [`GiftEngine::finish`]. With no parsed items the result is built entirely
//! from the keyword taxonomy and the fallback lists.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use tracing::debug;

use super::age::resolve_age;
use super::fallback::{fill_to_minimum, select, PaddingSources};
use super::matcher::{
    match_candidates, match_franchises, normalize, persona_fields, push_unique,
    recognize_franchises, RecognizedFranchise,
};
use super::prompt::build_prompt;
use super::reasoning::{confidence, default_ai_reason, explain, franchise_of, ReasonContext};
use super::taxonomy::Taxonomy;
use super::types::{
    AgeProfile, Candidate, CandidateSource, GiftSuggestion, ParsedSuggestion, RecommendationResult,
    RecommendationStage,
};
use super::{DEFAULT_TARGET_COUNT, MAX_TARGET_COUNT, MIN_TARGET_COUNT};
use crate::errors::DomainError;
use crate::persona::PersonaProfile;

/// Per-request view of a persona after identity, age and keyword resolution.
#[derive(Debug, Clone)]
pub struct RecommendationContext<'a> {
    pub persona: &'a PersonaProfile,
    pub subject: String,
    pub age: AgeProfile,
    /// Franchise candidates first, then interest and free-text hits
    pub candidates: Vec<Candidate>,
    pub franchises: Vec<RecognizedFranchise>,
}

impl RecommendationContext<'_> {
    fn reason_context(&self) -> ReasonContext<'_> {
        ReasonContext {
            persona: self.persona,
            subject: &self.subject,
            age: self.age,
            franchises: &self.franchises,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GiftEngine {
    taxonomy: Taxonomy,
    target_count: usize,
}

impl Default for GiftEngine {
    fn default() -> Self {
        Self::new(Taxonomy::builtin())
    }
}

impl GiftEngine {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy, target_count: DEFAULT_TARGET_COUNT }
    }

    /// Clamped into the supported target range.
    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.target_count = target_count.clamp(MIN_TARGET_COUNT, MAX_TARGET_COUNT);
        self
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Resolves identity, age and keyword candidates.
    ///
    /// Fails only when the persona has neither a name nor a role.
    pub fn prepare<'a>(
        &self,
        persona: &'a PersonaProfile,
        today: NaiveDate,
    ) -> Result<RecommendationContext<'a>, DomainError> {
        let subject = persona.subject_name().ok_or(DomainError::InvalidPersona)?.to_string();
        trace_stage(RecommendationStage::Start, &subject);

        let age = resolve_age(persona.birth_date, today);
        let fields = persona_fields(persona);
        let franchises = recognize_franchises(&fields, &self.taxonomy.franchises);

        let mut candidates = match_franchises(&fields, &self.taxonomy.franchises);
        let mut seen =
            candidates.iter().map(|candidate| normalize(&candidate.title)).collect::<HashSet<_>>();
        for candidate in match_candidates(&fields, &self.taxonomy.interests) {
            push_unique(&mut candidates, &mut seen, candidate);
        }

        debug!(
            event_name = "gift.recommend.prepared",
            persona = %subject,
            age = ?age.age,
            age_category = age.category.as_str(),
            candidates = candidates.len(),
            franchises = franchises.len(),
            "persona resolved for recommendation"
        );

        Ok(RecommendationContext { persona, subject, age, candidates, franchises })
    }

    pub fn prompt(&self, context: &RecommendationContext<'_>) -> String {
        build_prompt(context, self.target_count)
    }

    /// Deterministic path only.
    pub fn recommend<R>(
        &self,
        persona: &PersonaProfile,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> RecommendationResult
    where
        R: Rng + ?Sized,
    {
        match self.prepare(persona, now.date_naive()) {
            Ok(context) => self.finish(&context, &[], now, rng),
            Err(error) => Self::failure(persona, &error, now),
        }
    }

    /// Builds the result from parsed completion items, topping up from the
    /// deterministic pool until exactly the target count is reached. When the
    /// persona is a recognized fan and no completion title covers the
    /// franchise, the last slot goes to a franchise gift.
    pub fn finish<R>(
        &self,
        context: &RecommendationContext<'_>,
        ai_items: &[ParsedSuggestion],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> RecommendationResult
    where
        R: Rng + ?Sized,
    {
        let target = self.target_count;
        let reasons = context.reason_context();

        let mut accepted: Vec<&ParsedSuggestion> = Vec::new();
        for item in ai_items {
            if accepted.len() == target {
                break;
            }
            if accepted.iter().all(|kept| normalize(&kept.title) != normalize(&item.title)) {
                accepted.push(item);
            }
        }
        // A recognized franchise keeps one slot unless the completion already covers it.
        let needs_franchise_slot = context.candidates.iter().any(Candidate::is_franchise)
            && !accepted.iter().any(|item| covers_franchise(context, &item.title));
        if needs_franchise_slot {
            accepted.truncate(target.saturating_sub(1));
        }

        let mut ai_titles: Vec<String> = Vec::with_capacity(accepted.len());
        let mut recommendations = Vec::with_capacity(target);
        for item in accepted {
            let candidate = Candidate::new(item.title.clone(), CandidateSource::Ai);
            let reason = item.reason.clone().unwrap_or_else(|| default_ai_reason(&context.subject));
            recommendations.push(GiftSuggestion {
                confidence: confidence(&candidate, &context.franchises, rng),
                title: candidate.title,
                reason,
            });
            ai_titles.push(item.title.clone());
        }
        let ai_generated = !recommendations.is_empty();

        trace_stage(RecommendationStage::FallbackIfNeeded, &context.subject);
        let reserved = ai_titles.iter().map(|title| normalize(title)).collect::<HashSet<_>>();
        let mut pool = context
            .candidates
            .iter()
            .filter(|candidate| !reserved.contains(&normalize(&candidate.title)))
            .cloned()
            .collect::<Vec<_>>();

        let remaining = target.saturating_sub(recommendations.len());
        trace_stage(RecommendationStage::Pad, &context.subject);
        fill_to_minimum(
            &mut pool,
            PaddingSources {
                age_defaults: self.taxonomy.age_defaults.for_category(context.age.category),
                generic: &self.taxonomy.generic,
                reserved: &ai_titles,
            },
            remaining,
            rng,
        );
        let total_options = recommendations.len() + pool.len();

        trace_stage(RecommendationStage::Truncate, &context.subject);
        for candidate in select(pool, remaining, rng) {
            recommendations.push(GiftSuggestion {
                reason: explain(&candidate, &reasons, rng),
                confidence: confidence(&candidate, &context.franchises, rng),
                title: candidate.title,
            });
        }

        trace_stage(RecommendationStage::Done, &context.subject);
        RecommendationResult {
            success: true,
            persona_name: context.subject.clone(),
            age: context.age.age,
            age_category: context.age.category,
            recommendations,
            ai_generated,
            total_options,
            generated_at: now,
            error: None,
        }
    }

    /// Result for a persona that cannot be recommended for.
    pub fn failure(
        persona: &PersonaProfile,
        error: &DomainError,
        now: DateTime<Utc>,
    ) -> RecommendationResult {
        let age = resolve_age(persona.birth_date, now.date_naive());
        RecommendationResult {
            success: false,
            persona_name: persona.display_name().to_string(),
            age: age.age,
            age_category: age.category,
            recommendations: Vec::new(),
            ai_generated: false,
            total_options: 0,
            generated_at: now,
            error: Some(error.to_string()),
        }
    }
}

fn covers_franchise(context: &RecommendationContext<'_>, title: &str) -> bool {
    let normalized = normalize(title);
    let listed = context
        .candidates
        .iter()
        .any(|candidate| candidate.is_franchise() && normalize(&candidate.title) == normalized);
    let candidate = Candidate::new(title, CandidateSource::Ai);
    listed || franchise_of(&candidate, &context.franchises).is_some()
}

/// Emits the stage transition event shared by the engine and its callers.
pub fn trace_stage(stage: RecommendationStage, persona: &str) {
    debug!(
        event_name = "gift.recommend.stage",
        stage = stage.as_str(),
        persona = %persona,
        "recommendation stage"
    );
}
