//! Conversation session types

pub mod entities;

pub use entities::{Message, Role};
