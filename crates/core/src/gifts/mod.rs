//! Gift recommendation
//!
//! Turns a [`crate::persona::PersonaProfile`] into a fixed-size list of gift
//! suggestions. The pipeline:
//!
//! 1. resolve subject name and age bucket
//! 2. match interests and free text against the keyword and franchise tables
//! 3. optionally accept parsed items from a completion response
//! 4. pad from age-bucket and generic lists, shuffle, truncate
//! 5. attach a reason and a confidence value to each pick
//!
//! All randomness flows through a caller-supplied [`rand::Rng`], so a seeded
//! generator and a fixed clock reproduce the output exactly.

pub mod age;
pub mod engine;
pub mod fallback;
pub mod matcher;
pub mod parse;
pub mod prompt;
pub mod reasoning;
pub mod taxonomy;
pub mod types;

use std::ops::RangeInclusive;

pub use age::resolve_age;
pub use engine::{trace_stage, GiftEngine, RecommendationContext};
pub use parse::parse_suggestions;
pub use taxonomy::{GiftCategory, Taxonomy, GIFT_CATEGORIES};
pub use types::{
    AgeCategory, AgeProfile, Candidate, CandidateSource, GiftSuggestion, MatchKind,
    ParsedSuggestion, RecommendationResult, RecommendationStage,
};

pub const DEFAULT_TARGET_COUNT: usize = 3;
pub const MIN_TARGET_COUNT: usize = 3;
pub const MAX_TARGET_COUNT: usize = 4;

pub const CONFIDENCE_RANGE: RangeInclusive<u8> = 70..=100;
pub const FRANCHISE_CONFIDENCE_RANGE: RangeInclusive<u8> = 90..=100;
