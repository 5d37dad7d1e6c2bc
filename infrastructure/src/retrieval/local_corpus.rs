//! Local corpus context source
//!
//! Development / fallback backend: scans a directory of JSON document
//! records and scores them by token overlap with the query. Each file holds
//! either a single record or an array of records with `content` and
//! (optionally) `source` keys. Malformed files are skipped with a warning.

use async_trait::async_trait;
use council_application::ports::context_source::ContextSource;
use council_domain::ContextChunk;
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_re() -> &'static Regex {
    // \w matches Unicode word characters, so Thai text tokenizes too
    WORD_RE.get_or_init(|| Regex::new(r"\w+").expect("static pattern"))
}

/// Case-insensitive word set of a text
fn tokenize(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    word_re()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Token-overlap context source over a directory of JSON records
pub struct LocalCorpusSource {
    dir: PathBuf,
}

impl LocalCorpusSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn score_file(
        &self,
        path: &Path,
        query_tokens: &HashSet<String>,
        scored: &mut Vec<ContextChunk>,
    ) {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable corpus file");
                return;
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping malformed corpus file");
                return;
            }
        };

        let records = match value {
            Value::Array(items) => items,
            other => vec![other],
        };

        for record in records {
            let Some(content) = record.get("content").and_then(Value::as_str) else {
                continue;
            };
            if content.is_empty() {
                continue;
            }

            let content_tokens = tokenize(content);
            let overlap = query_tokens.intersection(&content_tokens).count();
            if overlap == 0 {
                continue;
            }

            let score = overlap as f64 / query_tokens.len() as f64;
            let source = record
                .get("source")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    path.file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "local".to_string())
                });

            scored.push(ContextChunk::new(content, source, score, self.origin()));
        }
    }
}

#[async_trait]
impl ContextSource for LocalCorpusSource {
    fn origin(&self) -> &'static str {
        "local-corpus"
    }

    async fn search(&self, query: &str, max_results: usize) -> Vec<ContextChunk> {
        if !self.dir.exists() {
            warn!(dir = %self.dir.display(), "Corpus directory not found");
            return Vec::new();
        }

        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let pattern = self.dir.join("**/*.json");
        let paths = match glob::glob(&pattern.to_string_lossy()) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(error = %e, "Invalid corpus glob pattern");
                return Vec::new();
            }
        };

        let mut scored = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) => self.score_file(&path, &query_tokens, &mut scored),
                Err(e) => warn!(error = %e, "Skipping unreadable corpus entry"),
            }
        }

        // Stable sort: ties keep first-encountered order
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(max_results);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn test_overlap_ratio_scoring() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "doc.json",
            r#"{"content": "alpha beta", "source": "Doc1"}"#,
        );

        let source = LocalCorpusSource::new(dir.path());
        // One of two query tokens matches -> score 1/2
        let results = source.search("alpha gamma", 10).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 0.5);
        assert_eq!(results[0].source, "Doc1");

        // No overlap -> empty
        let results = source.search("zzz", 10).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_results_sorted_descending_with_stable_ties() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "corpus.json",
            r#"[
                {"content": "alpha", "source": "Half1"},
                {"content": "alpha beta", "source": "Full"},
                {"content": "beta", "source": "Half2"}
            ]"#,
        );

        let source = LocalCorpusSource::new(dir.path());
        let results = source.search("alpha beta", 10).await;

        let sources: Vec<&str> = results.iter().map(|c| c.source.as_str()).collect();
        // Full match first, then the two half matches in encounter order
        assert_eq!(sources, vec!["Full", "Half1", "Half2"]);
    }

    #[tokio::test]
    async fn test_malformed_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "bad.json", "{not json");
        write_file(
            dir.path(),
            "good.json",
            r#"{"content": "alpha", "source": "Good"}"#,
        );

        let source = LocalCorpusSource::new(dir.path());
        let results = source.search("alpha", 10).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, "Good");
    }

    #[tokio::test]
    async fn test_source_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "civil_code.json", r#"{"content": "alpha"}"#);

        let source = LocalCorpusSource::new(dir.path());
        let results = source.search("alpha", 10).await;
        assert_eq!(results[0].source, "civil_code");
    }

    #[tokio::test]
    async fn test_max_results_cap() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "corpus.json",
            r#"[
                {"content": "alpha one"},
                {"content": "alpha two"},
                {"content": "alpha three"}
            ]"#,
        );

        let source = LocalCorpusSource::new(dir.path());
        let results = source.search("alpha", 2).await;
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_directory_returns_empty() {
        let source = LocalCorpusSource::new("/nonexistent/corpus/dir");
        let results = source.search("alpha", 10).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_thai_text_tokenizes() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "thai.json",
            r#"{"content": "มาตรา 420 ละเมิด", "source": "ThaiDoc"}"#,
        );

        let source = LocalCorpusSource::new(dir.path());
        let results = source.search("ละเมิด", 10).await;
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_nested_directories_scanned() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        write_file(
            &dir.path().join("sub"),
            "nested.json",
            r#"{"content": "alpha", "source": "Nested"}"#,
        );

        let source = LocalCorpusSource::new(dir.path());
        let results = source.search("alpha", 10).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, "Nested");
    }
}
