//! Application layer for law-council
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; adapters for the ports live in the infrastructure
//! layer.

pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use ports::{
    context_source::ContextSource,
    conversation_store::{ConversationStore, NoConversationStore},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{ChannelProgress, DeliberationEvent, NoProgress, ProgressNotifier},
};
pub use use_cases::deliberate::{ChatOutcome, DeliberateError, DeliberateUseCase};
pub use use_cases::retrieve_context::RetrieveContextUseCase;
pub use use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
