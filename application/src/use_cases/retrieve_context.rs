//! Retrieval Merge Layer
//!
//! Queries the primary document source and, when configured, a supplementary
//! source concurrently, merges their chunks with fixed precedence, and builds
//! the grounded message list for Stage 1.

use crate::ports::context_source::ContextSource;
use council_domain::{ContextChunk, Message, PromptTemplate, Query};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default number of chunks requested from the supplementary source
const SUPPLEMENTARY_MAX_RESULTS: usize = 5;

/// Use case for retrieving grounding context
pub struct RetrieveContextUseCase {
    primary: Arc<dyn ContextSource>,
    supplementary: Option<Arc<dyn ContextSource>>,
    max_chunks: usize,
    supplementary_timeout: Duration,
}

impl RetrieveContextUseCase {
    pub fn new(primary: Arc<dyn ContextSource>, max_chunks: usize) -> Self {
        Self {
            primary,
            supplementary: None,
            max_chunks,
            supplementary_timeout: Duration::from_secs(15),
        }
    }

    /// Attach a supplementary source (queried concurrently, merged after the
    /// primary chunks)
    pub fn with_supplementary(mut self, source: Arc<dyn ContextSource>) -> Self {
        self.supplementary = Some(source);
        self
    }

    pub fn with_supplementary_timeout(mut self, timeout: Duration) -> Self {
        self.supplementary_timeout = timeout;
        self
    }

    /// Retrieve context for a query and build the grounded message list.
    ///
    /// Both sources are queried concurrently so end-to-end latency is bounded
    /// by the slower of the two, not their sum. The supplementary call has
    /// its own timeout and degrades to no chunks on expiry or failure. Merge
    /// order is fixed: all primary chunks (in the adapter's ranked order),
    /// then all supplementary chunks. Scores are never re-compared across
    /// sources and duplicates are not removed.
    pub async fn retrieve(&self, query: &Query) -> (Vec<Message>, Vec<ContextChunk>) {
        let primary_search = self.primary.search(query.content(), self.max_chunks);

        let supplementary_search = async {
            match &self.supplementary {
                Some(source) => {
                    match tokio::time::timeout(
                        self.supplementary_timeout,
                        source.search(query.content(), SUPPLEMENTARY_MAX_RESULTS),
                    )
                    .await
                    {
                        Ok(chunks) => chunks,
                        Err(_) => {
                            warn!(
                                origin = source.origin(),
                                "Supplementary source timed out, continuing without it"
                            );
                            Vec::new()
                        }
                    }
                }
                None => Vec::new(),
            }
        };

        let (mut chunks, supplementary_chunks) = tokio::join!(primary_search, supplementary_search);
        chunks.extend(supplementary_chunks);

        debug!(chunks = chunks.len(), "Retrieved context");

        let system_prompt = PromptTemplate::grounding_system(&chunks);
        let messages = vec![Message::system(system_prompt), Message::user(query.content())];

        (messages, chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedSource {
        origin: &'static str,
        chunks: Vec<ContextChunk>,
        delay: Duration,
    }

    impl FixedSource {
        fn new(origin: &'static str, chunks: Vec<ContextChunk>) -> Self {
            Self {
                origin,
                chunks,
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl ContextSource for FixedSource {
        fn origin(&self) -> &'static str {
            self.origin
        }

        async fn search(&self, _query: &str, _max_results: usize) -> Vec<ContextChunk> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.chunks.clone()
        }
    }

    fn chunk(content: &str, score: f64, origin: &str) -> ContextChunk {
        ContextChunk::new(content, "Doc", score, origin)
    }

    #[tokio::test]
    async fn test_primary_before_supplementary_even_when_scores_lower() {
        let primary = Arc::new(FixedSource::new(
            "primary",
            vec![chunk("p1", 0.1, "primary"), chunk("p2", 0.05, "primary")],
        ));
        let supplementary = Arc::new(FixedSource::new(
            "supplementary",
            vec![chunk("s1", 9.9, "supplementary")],
        ));

        let use_case = RetrieveContextUseCase::new(primary, 10).with_supplementary(supplementary);
        let (_, chunks) = use_case.retrieve(&Query::new("q")).await;

        let origins: Vec<&str> = chunks.iter().map(|c| c.origin.as_str()).collect();
        assert_eq!(origins, vec!["primary", "primary", "supplementary"]);
    }

    #[tokio::test]
    async fn test_supplementary_timeout_degrades_to_primary_only() {
        let primary = Arc::new(FixedSource::new("primary", vec![chunk("p1", 1.0, "primary")]));
        let supplementary = Arc::new(
            FixedSource::new("supplementary", vec![chunk("s1", 1.0, "supplementary")])
                .with_delay(Duration::from_secs(60)),
        );

        let use_case = RetrieveContextUseCase::new(primary, 10)
            .with_supplementary(supplementary)
            .with_supplementary_timeout(Duration::from_millis(20));
        let (_, chunks) = use_case.retrieve(&Query::new("q")).await;

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].origin, "primary");
    }

    #[tokio::test]
    async fn test_messages_carry_grounding_then_question() {
        let primary = Arc::new(FixedSource::new("primary", vec![chunk("text", 1.0, "primary")]));
        let use_case = RetrieveContextUseCase::new(primary, 10);
        let (messages, _) = use_case.retrieve(&Query::new("what is tort?")).await;

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, council_domain::Role::System);
        assert!(messages[0].content.contains("[Document 1]"));
        assert_eq!(messages[1].role, council_domain::Role::User);
        assert_eq!(messages[1].content, "what is tort?");
    }

    #[tokio::test]
    async fn test_no_chunks_yields_fallback_grounding() {
        let primary = Arc::new(FixedSource::new("primary", vec![]));
        let use_case = RetrieveContextUseCase::new(primary, 10);
        let (messages, chunks) = use_case.retrieve(&Query::new("q")).await;

        assert!(chunks.is_empty());
        assert!(messages[0].content.contains("No specific legal documents were retrieved"));
    }
}
