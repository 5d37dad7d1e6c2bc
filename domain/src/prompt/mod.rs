//! Prompt composition

pub mod template;

pub use template::PromptTemplate;
