//! Types for the gift recommendation engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse age bucket used to pick default gifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgeCategory {
    /// Under 13
    Child,
    /// 13 to 29
    Young,
    /// 30 to 64, and the fallback when age is unknown
    #[default]
    Adult,
    /// 65 and over
    Senior,
}

impl AgeCategory {
    /// Bucket an age in years. Unknown ages are treated as adult.
    pub fn from_age(age: Option<u32>) -> Self {
        match age {
            None => AgeCategory::Adult,
            Some(age) if age < 13 => AgeCategory::Child,
            Some(age) if age < 30 => AgeCategory::Young,
            Some(age) if age < 65 => AgeCategory::Adult,
            Some(_) => AgeCategory::Senior,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeCategory::Child => "child",
            AgeCategory::Young => "young",
            AgeCategory::Adult => "adult",
            AgeCategory::Senior => "senior",
        }
    }
}

/// Resolved age and its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AgeProfile {
    pub age: Option<u32>,
    pub category: AgeCategory,
}

/// How a taxonomy keyword matched a persona field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// Normalized field and keyword are equal
    Exact,
    /// One contains the other
    Substring,
}

/// Where a candidate gift came from. Drives ordering, confidence and reasoning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    /// Recognized popular-culture franchise
    Franchise { franchise: String, keyword: String },
    /// Interest taxonomy hit on an interest entry
    Interest { interest: String, keyword: String, kind: MatchKind },
    /// Interest taxonomy hit on notes, description, insights, goals or challenges
    FreeText { keyword: String, kind: MatchKind },
    /// Age-bucket default list
    AgeDefault,
    /// Generic padding list
    Generic,
    /// Parsed from a text-completion response
    Ai,
}

/// A gift title under consideration, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn new(title: impl Into<String>, source: CandidateSource) -> Self {
        Self { title: title.into(), source }
    }

    pub fn is_franchise(&self) -> bool {
        matches!(self.source, CandidateSource::Franchise { .. })
    }

    /// Taxonomy keyword behind this candidate, if any.
    pub fn keyword(&self) -> Option<&str> {
        match &self.source {
            CandidateSource::Franchise { keyword, .. }
            | CandidateSource::Interest { keyword, .. }
            | CandidateSource::FreeText { keyword, .. } => Some(keyword),
            _ => None,
        }
    }
}

/// One recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftSuggestion {
    pub title: String,
    pub reason: String,
    /// 0-100, a coarse personalization signal rather than a probability
    pub confidence: u8,
}

/// A suggestion item read from a completion response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSuggestion {
    pub title: String,
    pub reason: Option<String>,
}

/// Engine output envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub success: bool,
    pub persona_name: String,
    pub age: Option<u32>,
    pub age_category: AgeCategory,
    pub recommendations: Vec<GiftSuggestion>,
    pub ai_generated: bool,
    pub total_options: usize,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Orchestration stages, in the order a request moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStage {
    Start,
    TryAi,
    AiOk,
    AiFailed,
    FallbackIfNeeded,
    Pad,
    Truncate,
    Done,
}

impl RecommendationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationStage::Start => "start",
            RecommendationStage::TryAi => "try_ai",
            RecommendationStage::AiOk => "ai_ok",
            RecommendationStage::AiFailed => "ai_failed",
            RecommendationStage::FallbackIfNeeded => "fallback_if_needed",
            RecommendationStage::Pad => "pad",
            RecommendationStage::Truncate => "truncate",
            RecommendationStage::Done => "done",
        }
    }
}
