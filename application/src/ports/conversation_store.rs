//! Port for the append-only conversation store.
//!
//! Each session is an append-only message log keyed by session id. The store
//! only ever appends (or rewrites a session's title); durability and file
//! layout are the adapter's concern.
//!
//! Methods are intentionally synchronous and non-fallible: persistence
//! failures are logged by the adapter and never disrupt a running
//! deliberation.

use council_domain::DeliberationResult;

/// Append-only per-session conversation store
pub trait ConversationStore: Send + Sync {
    /// Ensure a session log exists. Returns `true` if it was created by this
    /// call (i.e. the next user message is the session's first).
    fn ensure_session(&self, session_id: &str) -> bool;

    /// Append the user's message to the session log
    fn append_user(&self, session_id: &str, content: &str);

    /// Append the assistant record (all stage payloads) to the session log
    fn append_assistant(&self, session_id: &str, result: &DeliberationResult);

    /// Record the session's title
    fn set_title(&self, session_id: &str, title: &str);
}

/// No-op implementation for tests and when persistence is disabled
pub struct NoConversationStore;

impl ConversationStore for NoConversationStore {
    fn ensure_session(&self, _session_id: &str) -> bool {
        false
    }

    fn append_user(&self, _session_id: &str, _content: &str) {}

    fn append_assistant(&self, _session_id: &str, _result: &DeliberationResult) {}

    fn set_title(&self, _session_id: &str, _title: &str) {}
}
