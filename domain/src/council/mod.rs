//! Council deliberation types
//!
//! The three-stage deliberation model:
//!
//! - **Stage 1 (Collect)**: every roster member answers the grounded query
//! - **Stage 2 (Rank)**: members rank the anonymized answers
//! - **Stage 3 (Synthesize)**: the chairman produces the final answer
//!
//! All per-deliberation state (responses, the anonymization map, rankings)
//! is scoped to a single query and discarded once the answer is returned.

pub mod anonymize;
pub mod ranking;
pub mod responses;
pub mod roster;
pub mod stage;

pub use anonymize::AnonymizationMap;
pub use ranking::{AggregateRanking, Stage2Ranking, aggregate_rankings, parse_ranking};
pub use responses::{DeliberationMetadata, DeliberationResult, Stage1Response, Stage3Result};
pub use roster::CouncilRoster;
pub use stage::Stage;
