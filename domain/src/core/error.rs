//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("No council members configured")]
    NoMembers,

    #[error("All council members failed to respond")]
    AllMembersFailed,

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_display() {
        assert_eq!(DomainError::EmptyQuery.to_string(), "Query cannot be empty");
    }

    #[test]
    fn test_all_members_failed_display() {
        assert_eq!(
            DomainError::AllMembersFailed.to_string(),
            "All council members failed to respond"
        );
    }
}
