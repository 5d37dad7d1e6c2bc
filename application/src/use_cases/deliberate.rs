//! Deliberate use case
//!
//! The caller-boundary orchestrator: validates the query, tracks the
//! session, runs retrieval and the council, and hands back the final answer
//! with citations and metadata. A streaming variant emits the ordered
//! deliberation event sequence instead.

use crate::ports::conversation_store::ConversationStore;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{ChannelProgress, DeliberationEvent, ProgressNotifier};
use crate::use_cases::retrieve_context::RetrieveContextUseCase;
use crate::use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
use council_domain::{
    ContextChunk, CouncilRoster, DeliberationMetadata, DeliberationResult, Message, Model,
    PromptTemplate, Query, SourceCitation, aggregate_rankings,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// Errors surfaced at the caller boundary
#[derive(Error, Debug)]
pub enum DeliberateError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error(transparent)]
    Council(#[from] RunCouncilError),
}

/// The artifact returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatOutcome {
    /// Final synthesized legal answer
    pub answer: String,
    /// Citations for the retrieved excerpts, in merge order
    pub sources: Vec<SourceCitation>,
    /// Session id (generated when the caller did not supply one)
    pub session_id: String,
    /// Auditable deliberation summary
    pub metadata: DeliberationMetadata,
}

/// Use case for one full deliberation round trip
pub struct DeliberateUseCase<G: LlmGateway + 'static> {
    retrieval: RetrieveContextUseCase,
    council: RunCouncilUseCase<G>,
    gateway: Arc<G>,
    store: Arc<dyn ConversationStore>,
    roster: CouncilRoster,
}

impl<G: LlmGateway + 'static> DeliberateUseCase<G> {
    pub fn new(
        retrieval: RetrieveContextUseCase,
        gateway: Arc<G>,
        store: Arc<dyn ConversationStore>,
        roster: CouncilRoster,
    ) -> Self {
        Self {
            retrieval,
            council: RunCouncilUseCase::new(Arc::clone(&gateway)),
            gateway,
            store,
            roster,
        }
    }

    /// Run one deliberation and return the final artifact.
    pub async fn run(
        &self,
        raw_query: &str,
        session_id: Option<String>,
        progress: &dyn ProgressNotifier,
    ) -> Result<ChatOutcome, DeliberateError> {
        let (query, session_id, is_first_message) = self.prepare(raw_query, session_id)?;

        progress.on_retrieval_start();
        let (messages, chunks) = self.retrieval.retrieve(&query).await;
        progress.on_retrieval_complete(chunks.len());

        let input = RunCouncilInput::new(query.clone(), messages, self.roster.clone());
        let result = self.council.execute_with_progress(&input, progress).await?;

        let sources = citations(&chunks);
        self.store.append_assistant(&session_id, &result);

        if is_first_message {
            let title = generate_title(&*self.gateway, &self.roster.chairman, query.content()).await;
            self.store.set_title(&session_id, &title);
        }

        info!(session = %session_id, "Deliberation complete");

        Ok(ChatOutcome {
            answer: result.stage3.response.clone(),
            sources,
            session_id,
            metadata: result.metadata,
        })
    }

    /// Run one deliberation, emitting the ordered event sequence.
    ///
    /// Events arrive in a fixed order - status/retrieval, one completion
    /// event per stage, then the terminal `Complete`. The first hard failure
    /// short-circuits the rest of the sequence with an `Error` event.
    pub async fn run_streaming(
        &self,
        raw_query: &str,
        session_id: Option<String>,
        tx: UnboundedSender<DeliberationEvent>,
    ) {
        if let Err(e) = self.run_streaming_inner(raw_query, session_id, &tx).await {
            let _ = tx.send(DeliberationEvent::Error {
                message: e.to_string(),
            });
        }
    }

    async fn run_streaming_inner(
        &self,
        raw_query: &str,
        session_id: Option<String>,
        tx: &UnboundedSender<DeliberationEvent>,
    ) -> Result<(), DeliberateError> {
        let (query, session_id, is_first_message) = self.prepare(raw_query, session_id)?;
        let progress = ChannelProgress::new(tx.clone());

        progress.on_retrieval_start();
        let (messages, chunks) = self.retrieval.retrieve(&query).await;
        let _ = tx.send(DeliberationEvent::RetrievalComplete {
            chunks: chunks.len(),
        });

        let stage1 = self
            .council
            .collect(&self.roster, &messages, &progress)
            .await;
        if stage1.iter().all(|r| !r.success) {
            return Err(RunCouncilError::AllMembersFailed.into());
        }
        let _ = tx.send(DeliberationEvent::Stage1Complete {
            count: stage1.len(),
        });

        let (stage2, map) = self.council.rank(&query, &stage1, &progress).await;
        let _ = tx.send(DeliberationEvent::Stage2Complete {
            rankings: stage2.len(),
        });

        let stage3 = self
            .council
            .synthesize(&query, &self.roster, &stage1, &stage2, &map, &progress)
            .await?;
        let _ = tx.send(DeliberationEvent::Stage3Complete);

        let aggregate = aggregate_rankings(&stage2, &map);
        let result = DeliberationResult {
            question: query.content().to_string(),
            metadata: DeliberationMetadata {
                models_used: stage1.iter().map(|r| r.model.clone()).collect(),
                chairman: self.roster.chairman.clone(),
                aggregate_rankings: aggregate,
            },
            stage1,
            stage2,
            stage3,
        };

        self.store.append_assistant(&session_id, &result);

        if is_first_message {
            let title = generate_title(&*self.gateway, &self.roster.chairman, query.content()).await;
            self.store.set_title(&session_id, &title);
            let _ = tx.send(DeliberationEvent::TitleComplete { title });
        }

        let _ = tx.send(DeliberationEvent::Complete {
            answer: result.stage3.response.clone(),
            sources: citations(&chunks),
            session_id,
        });

        Ok(())
    }

    /// Validate the query, resolve the session, and record the user message.
    fn prepare(
        &self,
        raw_query: &str,
        session_id: Option<String>,
    ) -> Result<(Query, String, bool), DeliberateError> {
        let query = Query::try_new(raw_query).ok_or(DeliberateError::EmptyQuery)?;

        let session_id =
            session_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let is_first_message = self.store.ensure_session(&session_id);
        self.store.append_user(&session_id, query.content());

        Ok((query, session_id, is_first_message))
    }
}

fn citations(chunks: &[ContextChunk]) -> Vec<SourceCitation> {
    chunks.iter().map(SourceCitation::from_chunk).collect()
}

/// Ask the chairman for a short conversation title, falling back to a
/// truncation of the message itself on any failure.
pub(crate) async fn generate_title<G: LlmGateway + ?Sized>(
    gateway: &G,
    chairman: &Model,
    message: &str,
) -> String {
    let prompt = PromptTemplate::title_prompt(message);
    match gateway.complete(chairman, &[Message::user(prompt)]).await {
        Ok(title) => {
            let title = title.trim().trim_matches('"').trim().to_string();
            if title.is_empty() {
                fallback_title(message)
            } else {
                title
            }
        }
        Err(e) => {
            warn!(error = %e, "Title generation failed, using fallback");
            fallback_title(message)
        }
    }
}

fn fallback_title(message: &str) -> String {
    message.chars().take(60).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::context_source::ContextSource;
    use crate::testing::ScriptedGateway;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticSource(Vec<ContextChunk>);

    #[async_trait]
    impl ContextSource for StaticSource {
        fn origin(&self) -> &'static str {
            "static"
        }

        async fn search(&self, _query: &str, _max_results: usize) -> Vec<ContextChunk> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        known: Mutex<Vec<String>>,
        events: Mutex<Vec<String>>,
    }

    impl ConversationStore for RecordingStore {
        fn ensure_session(&self, session_id: &str) -> bool {
            let mut known = self.known.lock().unwrap();
            if known.iter().any(|id| id == session_id) {
                false
            } else {
                known.push(session_id.to_string());
                true
            }
        }

        fn append_user(&self, _session_id: &str, content: &str) {
            self.events.lock().unwrap().push(format!("user:{content}"));
        }

        fn append_assistant(&self, _session_id: &str, result: &DeliberationResult) {
            self.events
                .lock()
                .unwrap()
                .push(format!("assistant:{}", result.stage3.response));
        }

        fn set_title(&self, _session_id: &str, title: &str) {
            self.events.lock().unwrap().push(format!("title:{title}"));
        }
    }

    fn chunk(content: &str, source: &str) -> ContextChunk {
        ContextChunk::new(content, source, 1.0, "static")
    }

    fn two_member_roster() -> CouncilRoster {
        CouncilRoster::new(
            vec!["m/a".parse().unwrap(), "m/b".parse().unwrap()],
            "m/chair".parse().unwrap(),
        )
    }

    fn scripted_happy_path(gateway: &ScriptedGateway) {
        gateway.script("m/a", Ok("Answer A"));
        gateway.script("m/b", Ok("Answer B"));
        gateway.script("m/a", Ok("RANKING: Response A, Response B"));
        gateway.script("m/b", Ok("RANKING: Response B, Response A"));
        gateway.script("m/chair", Ok("Final answer"));
    }

    fn use_case(
        gateway: Arc<ScriptedGateway>,
        store: Arc<RecordingStore>,
        chunks: Vec<ContextChunk>,
    ) -> DeliberateUseCase<ScriptedGateway> {
        let retrieval = RetrieveContextUseCase::new(Arc::new(StaticSource(chunks)), 10);
        DeliberateUseCase::new(retrieval, gateway, store, two_member_roster())
    }

    #[tokio::test]
    async fn test_empty_query_rejected_before_any_call() {
        let gateway = Arc::new(ScriptedGateway::new());
        let store = Arc::new(RecordingStore::default());
        let uc = use_case(Arc::clone(&gateway), Arc::clone(&store), vec![]);

        let result = uc
            .run("   ", None, &crate::ports::progress::NoProgress)
            .await;
        assert!(matches!(result, Err(DeliberateError::EmptyQuery)));
        assert_eq!(gateway.call_count(), 0);
        assert!(store.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_returns_answer_citations_and_stores_transcript() {
        let gateway = Arc::new(ScriptedGateway::new());
        scripted_happy_path(&gateway);
        // Title call for the new session
        gateway.script("m/chair", Ok("Tort liability question"));

        let store = Arc::new(RecordingStore::default());
        let long_excerpt = "x".repeat(300);
        let uc = use_case(
            Arc::clone(&gateway),
            Arc::clone(&store),
            vec![chunk(&long_excerpt, "Civil Code Section 420")],
        );

        let outcome = uc
            .run("What is tort?", None, &crate::ports::progress::NoProgress)
            .await
            .unwrap();

        assert_eq!(outcome.answer, "Final answer");
        assert_eq!(outcome.sources.len(), 1);
        assert_eq!(outcome.sources[0].source, "Civil Code Section 420");
        assert_eq!(outcome.sources[0].excerpt.chars().count(), 200);
        assert!(!outcome.session_id.is_empty());

        let events = store.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "user:What is tort?".to_string(),
                "assistant:Final answer".to_string(),
                "title:Tort liability question".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_existing_session_gets_no_title() {
        let gateway = Arc::new(ScriptedGateway::new());
        scripted_happy_path(&gateway);

        let store = Arc::new(RecordingStore::default());
        store.ensure_session("sess-1");
        let uc = use_case(Arc::clone(&gateway), Arc::clone(&store), vec![]);

        let outcome = uc
            .run(
                "Follow-up question",
                Some("sess-1".to_string()),
                &crate::ports::progress::NoProgress,
            )
            .await
            .unwrap();

        assert_eq!(outcome.session_id, "sess-1");
        let events = store.events.lock().unwrap();
        assert!(events.iter().all(|e| !e.starts_with("title:")));
    }

    #[tokio::test]
    async fn test_streaming_event_order() {
        let gateway = Arc::new(ScriptedGateway::new());
        scripted_happy_path(&gateway);

        let store = Arc::new(RecordingStore::default());
        store.ensure_session("sess-9");
        let uc = use_case(Arc::clone(&gateway), Arc::clone(&store), vec![chunk("c", "Doc")]);

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        uc.run_streaming("Question?", Some("sess-9".to_string()), tx)
            .await;

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(match event {
                DeliberationEvent::Status { .. } => "status",
                DeliberationEvent::RetrievalComplete { .. } => "retrieval_complete",
                DeliberationEvent::Stage1Complete { .. } => "stage1_complete",
                DeliberationEvent::Stage2Complete { .. } => "stage2_complete",
                DeliberationEvent::Stage3Complete => "stage3_complete",
                DeliberationEvent::TitleComplete { .. } => "title_complete",
                DeliberationEvent::Complete { .. } => "complete",
                DeliberationEvent::Error { .. } => "error",
            });
        }

        assert_eq!(
            kinds,
            vec![
                "status",
                "retrieval_complete",
                "status",
                "stage1_complete",
                "status",
                "stage2_complete",
                "status",
                "stage3_complete",
                "complete",
            ]
        );
    }

    #[tokio::test]
    async fn test_streaming_error_short_circuits() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.script("m/a", Err("down"));
        gateway.script("m/b", Err("down"));

        let store = Arc::new(RecordingStore::default());
        store.ensure_session("sess-2");
        let uc = use_case(Arc::clone(&gateway), Arc::clone(&store), vec![]);

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        uc.run_streaming("Question?", Some("sess-2".to_string()), tx)
            .await;

        let mut saw_error = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                DeliberationEvent::Error { message } => {
                    saw_error = true;
                    assert!(message.contains("All council members failed"));
                }
                DeliberationEvent::Stage1Complete { .. }
                | DeliberationEvent::Stage2Complete { .. }
                | DeliberationEvent::Stage3Complete
                | DeliberationEvent::Complete { .. } => {
                    panic!("no completion events expected after a hard failure")
                }
                _ => {}
            }
        }
        assert!(saw_error);

        // Nothing was stored beyond the user message
        let events = store.events.lock().unwrap();
        assert_eq!(*events, vec!["user:Question?".to_string()]);
    }

    #[tokio::test]
    async fn test_generate_title_trims_and_falls_back() {
        let gateway = ScriptedGateway::new();
        gateway.script("m/chair", Ok("  \"Eviction notice rules\"  "));
        let chairman: Model = "m/chair".parse().unwrap();

        let title = generate_title(&gateway, &chairman, "Can I evict a tenant?").await;
        assert_eq!(title, "Eviction notice rules");

        // Unscripted second call fails -> fallback to truncated message
        let title = generate_title(&gateway, &chairman, "Can I evict a tenant?").await;
        assert_eq!(title, "Can I evict a tenant?");
    }
}
