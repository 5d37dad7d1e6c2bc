//! JSONL conversation store
//!
//! One append-only `<session>.jsonl` file per session under the data
//! directory. Each record is a single JSON line with a `type` field and a
//! UTC timestamp. Persistence failures are logged and swallowed: the store
//! must never disrupt a running deliberation.

use council_application::ports::conversation_store::ConversationStore;
use council_domain::DeliberationResult;
use serde_json::{Value, json};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Append-only JSONL store keyed by session id
pub struct JsonlConversationStore {
    data_dir: PathBuf,
}

impl JsonlConversationStore {
    /// Create a store rooted at `data_dir`.
    ///
    /// Creates the directory if needed. Returns `None` if it cannot be
    /// created.
    pub fn new(data_dir: impl AsRef<Path>) -> Option<Self> {
        let data_dir = data_dir.as_ref();
        if let Err(e) = std::fs::create_dir_all(data_dir) {
            warn!(dir = %data_dir.display(), error = %e, "Could not create conversation data directory");
            return None;
        }
        Some(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, session_id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.jsonl", sanitize(session_id)))
    }

    /// Append one typed, timestamped record to the session log
    fn append(&self, session_id: &str, event_type: &str, payload: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let Value::Object(mut map) = payload {
            map.insert("type".to_string(), Value::String(event_type.to_string()));
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        } else {
            json!({
                "type": event_type,
                "timestamp": timestamp,
                "data": payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        let path = self.path_for(session_id);
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", line) {
                    warn!(path = %path.display(), error = %e, "Failed to append conversation record");
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to open conversation log");
            }
        }
    }
}

/// Keep session-derived file names safe for the filesystem
fn sanitize(session_id: &str) -> String {
    session_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl ConversationStore for JsonlConversationStore {
    fn ensure_session(&self, session_id: &str) -> bool {
        let path = self.path_for(session_id);
        if path.exists() {
            return false;
        }
        self.append(session_id, "conversation_created", json!({ "id": session_id }));
        true
    }

    fn append_user(&self, session_id: &str, content: &str) {
        self.append(
            session_id,
            "user_message",
            json!({ "role": "user", "content": content }),
        );
    }

    fn append_assistant(&self, session_id: &str, result: &DeliberationResult) {
        let mut payload = match serde_json::to_value(result) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize deliberation record");
                return;
            }
        };
        if let Value::Object(map) = &mut payload {
            map.insert("role".to_string(), json!("assistant"));
        }
        self.append(session_id, "assistant_message", payload);
    }

    fn set_title(&self, session_id: &str, title: &str) {
        self.append(session_id, "title_updated", json!({ "title": title }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        DeliberationMetadata, Stage1Response, Stage3Result,
    };

    fn sample_result() -> DeliberationResult {
        let model: council_domain::Model = "m/a".parse().unwrap();
        DeliberationResult {
            question: "q".to_string(),
            stage1: vec![Stage1Response::success(model.clone(), "answer")],
            stage2: vec![],
            stage3: Stage3Result::new(model.clone(), "final"),
            metadata: DeliberationMetadata {
                models_used: vec![model.clone()],
                chairman: model,
                aggregate_rankings: vec![],
            },
        }
    }

    fn read_lines(store: &JsonlConversationStore, session: &str) -> Vec<Value> {
        let content = std::fs::read_to_string(store.path_for(session)).unwrap();
        content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_session_lifecycle_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlConversationStore::new(dir.path()).unwrap();

        assert!(store.ensure_session("sess-1"));
        assert!(!store.ensure_session("sess-1"));

        store.append_user("sess-1", "hello");
        store.append_assistant("sess-1", &sample_result());
        store.set_title("sess-1", "Greeting");

        let lines = read_lines(&store, "sess-1");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["type"], "conversation_created");
        assert_eq!(lines[1]["type"], "user_message");
        assert_eq!(lines[1]["content"], "hello");
        assert_eq!(lines[2]["type"], "assistant_message");
        assert_eq!(lines[2]["role"], "assistant");
        assert_eq!(lines[2]["stage3"]["response"], "final");
        assert_eq!(lines[3]["type"], "title_updated");
        assert_eq!(lines[3]["title"], "Greeting");

        for line in &lines {
            assert!(line.get("timestamp").is_some());
        }
    }

    #[test]
    fn test_sessions_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlConversationStore::new(dir.path()).unwrap();

        store.ensure_session("a");
        store.ensure_session("b");
        store.append_user("a", "only in a");

        assert_eq!(read_lines(&store, "a").len(), 2);
        assert_eq!(read_lines(&store, "b").len(), 1);
    }

    #[test]
    fn test_session_id_sanitized_for_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlConversationStore::new(dir.path()).unwrap();

        store.ensure_session("../escape");
        // The record lands inside the data dir, not outside it
        assert!(store.path_for("../escape").starts_with(dir.path()));
        assert_eq!(read_lines(&store, "../escape").len(), 1);
    }
}
