//! Context source port
//!
//! Uniform interface over lexical document search backends.

use async_trait::async_trait;
use council_domain::ContextChunk;

/// A searchable source of legal document excerpts
///
/// `search` is best-effort: adapters absorb their own connection and query
/// failures, log them, and return an empty list rather than erroring. A call
/// is finite and side-effect-free on the corpus.
#[async_trait]
pub trait ContextSource: Send + Sync {
    /// Stable adapter identifier, stamped into [`ContextChunk::origin`]
    fn origin(&self) -> &'static str;

    /// Return up to `max_results` scored excerpts for the query, ranked by
    /// the adapter's own relevance ordering
    async fn search(&self, query: &str, max_results: usize) -> Vec<ContextChunk>;
}
