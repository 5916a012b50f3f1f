pub mod config;
pub mod errors;
pub mod gifts;
pub mod persona;

pub use config::{AppConfig, ConfigError, LlmConfig, LlmProvider, LoadOptions, LogFormat};
pub use errors::{ApplicationError, DomainError, InterfaceError, ParseAmbiguity};
pub use gifts::{
    AgeCategory, GiftEngine, GiftSuggestion, ParsedSuggestion, RecommendationContext,
    RecommendationResult, RecommendationStage, Taxonomy,
};
pub use persona::record::{PersonaRecord, RecordError};
pub use persona::stats::PersonaStats;
pub use persona::{LifeEvent, PersonaProfile};
