//! Retrieved context value objects

use serde::{Deserialize, Serialize};

/// A scored excerpt of source material returned by a retrieval adapter
///
/// Chunks are immutable once produced. When chunks from several adapters are
/// merged, their order follows adapter precedence (primary source before
/// supplementary source), never the per-chunk score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextChunk {
    /// The excerpt text
    pub content: String,
    /// Human-readable source identifier (law section, case number, page title)
    pub source: String,
    /// Adapter-provided relevance score
    pub score: f64,
    /// Identifier of the adapter that produced this chunk
    pub origin: String,
}

impl ContextChunk {
    pub fn new(
        content: impl Into<String>,
        source: impl Into<String>,
        score: f64,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
            score,
            origin: origin.into(),
        }
    }
}

/// A citation handed to the caller alongside the final answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    /// Source identifier (law section, case number)
    pub source: String,
    /// Brief excerpt from the source
    pub excerpt: String,
}

/// Maximum excerpt length in characters
const EXCERPT_CHARS: usize = 200;

impl SourceCitation {
    /// Build a citation from a retrieved chunk, truncating the excerpt
    pub fn from_chunk(chunk: &ContextChunk) -> Self {
        Self {
            source: chunk.source.clone(),
            excerpt: chunk.content.chars().take(EXCERPT_CHARS).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_truncates_excerpt() {
        let chunk = ContextChunk::new("x".repeat(500), "Civil Code Section 420", 1.0, "vortex");
        let citation = SourceCitation::from_chunk(&chunk);
        assert_eq!(citation.excerpt.chars().count(), 200);
        assert_eq!(citation.source, "Civil Code Section 420");
    }

    #[test]
    fn test_citation_truncates_on_char_boundary() {
        // Thai characters are multi-byte; truncation must count chars, not bytes
        let chunk = ContextChunk::new("กฎหมาย".repeat(100), "Doc", 1.0, "vortex");
        let citation = SourceCitation::from_chunk(&chunk);
        assert_eq!(citation.excerpt.chars().count(), 200);
    }

    #[test]
    fn test_short_content_kept_whole() {
        let chunk = ContextChunk::new("short", "Doc", 0.5, "local");
        let citation = SourceCitation::from_chunk(&chunk);
        assert_eq!(citation.excerpt, "short");
    }
}
