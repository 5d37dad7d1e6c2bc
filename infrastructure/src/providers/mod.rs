//! Model inference providers

pub mod openrouter;

pub use openrouter::{OPENROUTER_API_URL, OpenRouterGateway};
