//! Deliberation stage identifiers

use serde::{Deserialize, Serialize};

/// Stage of a council deliberation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Stage 1 - every member answers the grounded query in parallel
    Collect,
    /// Stage 2 - members rank the anonymized answers
    Rank,
    /// Stage 3 - the chairman synthesizes the final answer
    Synthesize,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Collect => "stage1",
            Stage::Rank => "stage2",
            Stage::Synthesize => "stage3",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Collect => "Stage 1: Expert Consultation",
            Stage::Rank => "Stage 2: Cross-Ranking",
            Stage::Synthesize => "Stage 3: Synthesis",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
