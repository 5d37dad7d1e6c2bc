//! Retrieved-context types

pub mod chunk;

pub use chunk::{ContextChunk, SourceCitation};
