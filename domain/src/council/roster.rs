//! Council roster configuration

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// The fixed ensemble for a deliberation (Entity)
///
/// `members` answer in Stage 1 and judge in Stage 2; `chairman` synthesizes
/// in Stage 3. The chairman may also appear among the members. Member order
/// is significant: stage outputs are re-aligned to it and aggregate ties are
/// broken by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilRoster {
    pub members: Vec<Model>,
    pub chairman: Model,
}

impl Default for CouncilRoster {
    fn default() -> Self {
        Self {
            members: Model::default_members(),
            chairman: Model::default_chairman(),
        }
    }
}

impl CouncilRoster {
    pub fn new(members: Vec<Model>, chairman: Model) -> Self {
        Self { members, chairman }
    }

    /// Validate the roster
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.members.is_empty() {
            return Err(DomainError::NoMembers);
        }
        Ok(())
    }

    /// Position of a model in the roster, if it is a member
    pub fn position(&self, model: &Model) -> Option<usize> {
        self.members.iter().position(|m| m == model)
    }
}
