//! Agent Runtime - completion-backed gift recommendation
//!
//! This crate wraps the deterministic engine in `giftwise-core` with the one
//! step that talks to the outside world: asking a text-completion provider
//! for suggestions.
//!
//! # Architecture
//!
//! 1. **Completion client** (`llm`) - `LlmClient` trait, provider errors, disabled client
//! 2. **Provider adapters** (`providers`) - Gemini, OpenAI, Anthropic and Ollama over HTTP
//! 3. **Orchestration** (`recommender`) - single bounded attempt, then keyword fallback
//!
//! # Safety Principle
//!
//! The completion provider only proposes titles. Counting, deduplication,
//! padding, confidence and the success flag are decided by the core engine,
//! so a failing or misbehaving provider can never change the shape of a result.

pub mod llm;
pub mod providers;
pub mod recommender;

pub use llm::{DisabledLlmClient, LlmClient, ProviderError};
pub use providers::{build_client, HttpLlmClient};
pub use recommender::{BatchOutcome, BatchSummary, GiftRecommender, MAX_BATCH_SIZE};
