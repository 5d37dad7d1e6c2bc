//! Deliberation value objects - immutable result types for each stage.
//!
//! These types represent the outputs of a council deliberation:
//! - [`Stage1Response`] - an individual member's grounded answer
//! - [`Stage3Result`] - the chairman's synthesized final answer
//! - [`DeliberationMetadata`] - auditable summary attached to the answer
//! - [`DeliberationResult`] - complete record of all three stages

use crate::core::model::Model;
use crate::council::ranking::{AggregateRanking, Stage2Ranking};
use serde::{Deserialize, Serialize};

/// Response from a single council member in Stage 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage1Response {
    /// The model that generated this response
    pub model: Model,
    /// The response content (empty on failure)
    pub content: String,
    /// Whether this response was produced successfully
    pub success: bool,
    /// Error description if the model failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Stage1Response {
    /// Creates a successful response from a member.
    pub fn success(model: Model, content: impl Into<String>) -> Self {
        Self {
            model,
            content: content.into(),
            success: true,
            error: None,
        }
    }

    /// Creates a failure marker for a member that could not answer.
    pub fn failure(model: Model, error: impl Into<String>) -> Self {
        Self {
            model,
            content: String::new(),
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Final synthesis from the chairman in Stage 3
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage3Result {
    /// The chairman model
    pub model: Model,
    /// The synthesized answer
    pub response: String,
}

impl Stage3Result {
    pub fn new(model: Model, response: impl Into<String>) -> Self {
        Self {
            model,
            response: response.into(),
        }
    }
}

/// Read-only summary of a deliberation, attached to the final answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliberationMetadata {
    /// Every model that was asked in Stage 1, in roster order
    pub models_used: Vec<Model>,
    /// The chairman that produced the final answer
    pub chairman: Model,
    /// Consensus ordering derived from the Stage 2 rankings
    pub aggregate_rankings: Vec<AggregateRanking>,
}

/// Complete record of one deliberation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliberationResult {
    /// The original question
    pub question: String,
    /// Stage 1: grounded answers, in roster order
    pub stage1: Vec<Stage1Response>,
    /// Stage 2: valid rankings from the judges, in roster order
    pub stage2: Vec<Stage2Ranking>,
    /// Stage 3: the chairman's synthesis
    pub stage3: Stage3Result,
    /// Auditable summary
    pub metadata: DeliberationMetadata,
}

impl DeliberationResult {
    /// Returns an iterator over only the successful Stage 1 responses.
    pub fn successful_responses(&self) -> impl Iterator<Item = &Stage1Response> {
        self.stage1.iter().filter(|r| r.success)
    }

    /// Returns an iterator over only the failed Stage 1 responses.
    pub fn failed_responses(&self) -> impl Iterator<Item = &Stage1Response> {
        self.stage1.iter().filter(|r| !r.success)
    }
}
