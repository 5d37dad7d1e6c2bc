//! Domain layer for law-council
//!
//! This crate contains the core business logic, entities, and value objects
//! of the legal council deliberation engine. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council Deliberation
//!
//! A deliberation runs a fixed roster of models through three stages:
//!
//! - **Collect**: every member answers the grounded legal question
//! - **Rank**: members cross-rank the anonymized answers
//! - **Synthesize**: a chairman model produces the single final answer
//!
//! ## Retrieval Grounding
//!
//! Answers are grounded in [`retrieval::ContextChunk`] excerpts merged from
//! heterogeneous document sources and composed into a system-turn prompt by
//! [`prompt::PromptTemplate`].

pub mod core;
pub mod council;
pub mod prompt;
pub mod retrieval;
pub mod session;

// Re-export commonly used types
pub use crate::core::{error::DomainError, model::Model, query::Query};
pub use council::{
    AggregateRanking, AnonymizationMap, CouncilRoster, DeliberationMetadata, DeliberationResult,
    Stage, Stage1Response, Stage2Ranking, Stage3Result, aggregate_rankings, parse_ranking,
};
pub use prompt::PromptTemplate;
pub use retrieval::{ContextChunk, SourceCitation};
pub use session::{Message, Role};
