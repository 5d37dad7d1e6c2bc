//! Progress notification port and the deliberation event stream.
//!
//! Two surfaces share the same underlying stage callbacks:
//!
//! - [`ProgressNotifier`] - callback trait for interactive front-ends
//!   (console progress bars, plain text)
//! - [`DeliberationEvent`] - strictly ordered event sequence for streaming
//!   callers, produced by one task and consumed until a terminal `Complete`
//!   or `Error` event
//!
//! [`ChannelProgress`] bridges the two: it forwards stage notifications into
//! an event channel. All events for one deliberation are sent from the
//! orchestrating task, so channel order matches stage order.

use council_domain::{Model, SourceCitation, Stage};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// Callback for progress updates during a deliberation
///
/// Implementations live in the presentation layer and can display progress
/// in various ways. Notification must not block stage execution beyond the
/// notification's own point.
pub trait ProgressNotifier: Send + Sync {
    /// Called when context retrieval starts
    fn on_retrieval_start(&self) {}

    /// Called when context retrieval finished with `chunks` excerpts
    fn on_retrieval_complete(&self, _chunks: usize) {}

    /// Called when a stage starts
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize);

    /// Called when one model's task completes within a stage
    fn on_task_complete(&self, stage: &Stage, model: &Model, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: &Stage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: &Stage, _total_tasks: usize) {}
    fn on_task_complete(&self, _stage: &Stage, _model: &Model, _success: bool) {}
    fn on_stage_complete(&self, _stage: &Stage) {}
}

/// One event in a streamed deliberation.
///
/// Events are ordered: status/retrieval first, then one completion event per
/// stage, then the terminal `Complete` - or `Error`, which short-circuits
/// the remainder of the sequence at the first hard failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliberationEvent {
    Status {
        message: String,
    },
    RetrievalComplete {
        chunks: usize,
    },
    Stage1Complete {
        count: usize,
    },
    Stage2Complete {
        rankings: usize,
    },
    Stage3Complete,
    TitleComplete {
        title: String,
    },
    Complete {
        answer: String,
        sources: Vec<SourceCitation>,
        session_id: String,
    },
    Error {
        message: String,
    },
}

/// Progress notifier that forwards stage transitions into an event channel
/// as human-readable status events
pub struct ChannelProgress {
    tx: UnboundedSender<DeliberationEvent>,
}

impl ChannelProgress {
    pub fn new(tx: UnboundedSender<DeliberationEvent>) -> Self {
        Self { tx }
    }

    fn status(&self, message: &str) {
        // A closed receiver just means the consumer went away; deliberation
        // continues regardless.
        let _ = self.tx.send(DeliberationEvent::Status {
            message: message.to_string(),
        });
    }
}

impl ProgressNotifier for ChannelProgress {
    fn on_retrieval_start(&self) {
        self.status("Retrieving legal documents...");
    }

    fn on_stage_start(&self, stage: &Stage, _total_tasks: usize) {
        match stage {
            Stage::Collect => self.status("Consulting legal experts..."),
            Stage::Rank => self.status("Evaluating responses..."),
            Stage::Synthesize => self.status("Synthesizing final answer..."),
        }
    }

    fn on_task_complete(&self, _stage: &Stage, _model: &Model, _success: bool) {}

    fn on_stage_complete(&self, _stage: &Stage) {}
}
