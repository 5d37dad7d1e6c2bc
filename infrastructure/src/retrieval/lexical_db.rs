//! Vortex DB context source
//!
//! Queries the remote MySQL store of Thai legal document chunks with a
//! natural-language FULLTEXT match. The engine's relevance score is carried
//! through unchanged. Every failure degrades to an empty result: retrieval
//! problems must never abort a deliberation.

use async_trait::async_trait;
use council_application::ports::context_source::ContextSource;
use council_domain::ContextChunk;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use tracing::warn;

/// Expected table layout:
///
/// ```sql
/// legal_chunks (
///     id INT PRIMARY KEY,
///     content TEXT,           -- chunk text (Thai/English)
///     source VARCHAR(500),    -- e.g. "Civil Code Section 420" or case number
///     category VARCHAR(100),
///     FULLTEXT(content)
/// )
/// ```
const SEARCH_SQL: &str = r#"
SELECT content, source,
       MATCH(content) AGAINST(? IN NATURAL LANGUAGE MODE) AS score
FROM legal_chunks
WHERE MATCH(content) AGAINST(? IN NATURAL LANGUAGE MODE)
ORDER BY score DESC
LIMIT ?
"#;

/// Connection parameters for the Vortex MySQL store
#[derive(Debug, Clone)]
pub struct MySqlParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// MySQL FULLTEXT context source
pub struct MySqlContextSource {
    pool: MySqlPool,
}

impl MySqlContextSource {
    /// Create a source with a lazily-connected pool.
    ///
    /// No connection is attempted here; an unreachable database shows up as
    /// a per-query soft failure instead of a startup error.
    pub fn connect_lazy(params: &MySqlParams) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&params.host)
            .port(params.port)
            .username(&params.user)
            .password(&params.password)
            .database(&params.database)
            .charset("utf8mb4");

        let pool = MySqlPoolOptions::new()
            .max_connections(4)
            .connect_lazy_with(options);

        Self { pool }
    }
}

#[async_trait]
impl ContextSource for MySqlContextSource {
    fn origin(&self) -> &'static str {
        "vortex-mysql"
    }

    async fn search(&self, query: &str, max_results: usize) -> Vec<ContextChunk> {
        let rows = match sqlx::query(SEARCH_SQL)
            .bind(query)
            .bind(query)
            .bind(max_results as i64)
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Vortex search failed, continuing without context");
                return Vec::new();
            }
        };

        rows.iter()
            .filter_map(|row| {
                let content: String = row.try_get("content").ok()?;
                let source: String = row
                    .try_get("source")
                    .unwrap_or_else(|_| "Vortex DB".to_string());
                let score = row
                    .try_get::<f64, _>("score")
                    .or_else(|_| row.try_get::<f32, _>("score").map(f64::from))
                    .unwrap_or(0.0);
                Some(ContextChunk::new(content, source, score, self.origin()))
            })
            .collect()
    }
}
