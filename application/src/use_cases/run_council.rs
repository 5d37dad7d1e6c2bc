//! Run Council use case
//!
//! Orchestrates the three deliberation stages over a fixed roster: parallel
//! fan-out, anonymized cross-ranking, Borda aggregation, and chairman
//! synthesis. Stages run strictly in sequence; within a stage, calls to
//! distinct models run in parallel and per-model failures never interrupt
//! sibling calls.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared;
use council_domain::{
    AnonymizationMap, CouncilRoster, DeliberationMetadata, DeliberationResult, Message,
    PromptTemplate, Query, Stage, Stage1Response, Stage2Ranking, Stage3Result, aggregate_rankings,
    parse_ranking,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur during a council deliberation
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("No council members configured")]
    NoMembers,

    #[error("All council members failed to respond")]
    AllMembersFailed,

    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// The question being deliberated
    pub query: Query,
    /// Grounded messages sent identically to every member in Stage 1
    pub messages: Vec<Message>,
    /// The roster (members answer and judge; the chairman synthesizes)
    pub roster: CouncilRoster,
}

impl RunCouncilInput {
    pub fn new(query: Query, messages: Vec<Message>, roster: CouncilRoster) -> Self {
        Self {
            query,
            messages,
            roster,
        }
    }
}

/// Use case for running a full council deliberation
pub struct RunCouncilUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> RunCouncilUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: &RunCouncilInput,
    ) -> Result<DeliberationResult, RunCouncilError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: &RunCouncilInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationResult, RunCouncilError> {
        input
            .roster
            .validate()
            .map_err(|_| RunCouncilError::NoMembers)?;

        info!(
            members = input.roster.members.len(),
            chairman = %input.roster.chairman,
            "Starting council deliberation"
        );

        // Stage 1: every member answers the grounded query
        let stage1 = self
            .collect(&input.roster, &input.messages, progress)
            .await;

        if stage1.iter().all(|r| !r.success) {
            return Err(RunCouncilError::AllMembersFailed);
        }

        // Stage 2: successful members cross-rank the anonymized answers
        let (stage2, map) = self.rank(&input.query, &stage1, progress).await;

        let aggregate = aggregate_rankings(&stage2, &map);

        // Stage 3: the chairman synthesizes the final answer
        let stage3 = self
            .synthesize(&input.query, &input.roster, &stage1, &stage2, &map, progress)
            .await?;

        let metadata = DeliberationMetadata {
            models_used: stage1.iter().map(|r| r.model.clone()).collect(),
            chairman: input.roster.chairman.clone(),
            aggregate_rankings: aggregate,
        };

        Ok(DeliberationResult {
            question: input.query.content().to_string(),
            stage1,
            stage2,
            stage3,
            metadata,
        })
    }

    /// Stage 1: query every member in parallel.
    ///
    /// Each call carries the identical grounding messages. A per-model
    /// failure yields a failure-marked response instead of aborting the
    /// stage, and the stage waits for every member. Results are re-aligned
    /// to roster order after the parallel wait, regardless of completion
    /// order.
    pub async fn collect(
        &self,
        roster: &CouncilRoster,
        messages: &[Message],
        progress: &dyn ProgressNotifier,
    ) -> Vec<Stage1Response> {
        info!("Stage 1: Expert Consultation");
        progress.on_stage_start(&Stage::Collect, roster.members.len());

        let mut join_set = JoinSet::new();

        for (idx, model) in roster.members.iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let model = model.clone();
            let messages = messages.to_vec();

            join_set.spawn(async move {
                let result = gateway.complete(&model, &messages).await;
                (idx, model, result)
            });
        }

        let mut slots: Vec<Option<Stage1Response>> = Vec::new();
        slots.resize_with(roster.members.len(), || None);

        shared::join_all_settled(join_set, |(idx, model, result)| match result {
            Ok(content) => {
                info!(model = %model, "Member responded");
                progress.on_task_complete(&Stage::Collect, &model, true);
                slots[idx] = Some(Stage1Response::success(model, content));
            }
            Err(e) => {
                warn!(model = %model, error = %e, "Member failed");
                progress.on_task_complete(&Stage::Collect, &model, false);
                slots[idx] = Some(Stage1Response::failure(model, e.to_string()));
            }
        })
        .await;

        progress.on_stage_complete(&Stage::Collect);

        roster
            .members
            .iter()
            .zip(slots)
            .map(|(model, slot)| {
                slot.unwrap_or_else(|| Stage1Response::failure(model.clone(), "task aborted"))
            })
            .collect()
    }

    /// Stage 2: anonymized cross-ranking.
    ///
    /// Labels are assigned to non-error responses in roster order. Every
    /// successful member judges the full anonymized set (including its own
    /// answer) in parallel. Rankings that fail or do not cover exactly the
    /// label set are excluded from the result, not treated as fatal.
    pub async fn rank(
        &self,
        query: &Query,
        stage1: &[Stage1Response],
        progress: &dyn ProgressNotifier,
    ) -> (Vec<Stage2Ranking>, AnonymizationMap) {
        info!("Stage 2: Cross-Ranking");

        let map = AnonymizationMap::assign(
            stage1.iter().filter(|r| r.success).map(|r| &r.model),
        );

        let anonymized: Vec<(String, String)> = stage1
            .iter()
            .filter(|r| r.success)
            .filter_map(|r| {
                map.label_for(&r.model)
                    .map(|label| (label.to_string(), r.content.clone()))
            })
            .collect();

        progress.on_stage_start(&Stage::Rank, anonymized.len());

        let mut join_set = JoinSet::new();

        for (idx, response) in stage1.iter().enumerate() {
            if !response.success {
                continue;
            }

            let gateway = Arc::clone(&self.gateway);
            let model = response.model.clone();
            let prompt = PromptTemplate::ranking_prompt(query.content(), &anonymized);

            join_set.spawn(async move {
                let messages = vec![
                    Message::system(PromptTemplate::ranking_system()),
                    Message::user(prompt),
                ];
                let result = gateway.complete(&model, &messages).await;
                (idx, model, result)
            });
        }

        let mut slots: Vec<Option<Stage2Ranking>> = Vec::new();
        slots.resize_with(stage1.len(), || None);

        shared::join_all_settled(join_set, |(idx, model, result)| match result {
            Ok(text) => match parse_ranking(&text, &map) {
                Some(labels) => {
                    debug!(judge = %model, ?labels, "Ranking accepted");
                    progress.on_task_complete(&Stage::Rank, &model, true);
                    slots[idx] = Some(Stage2Ranking::new(model, labels, text));
                }
                None => {
                    warn!(judge = %model, "Malformed ranking excluded from aggregation");
                    progress.on_task_complete(&Stage::Rank, &model, false);
                }
            },
            Err(e) => {
                warn!(judge = %model, error = %e, "Judge failed");
                progress.on_task_complete(&Stage::Rank, &model, false);
            }
        })
        .await;

        progress.on_stage_complete(&Stage::Rank);

        (slots.into_iter().flatten().collect(), map)
    }

    /// Stage 3: chairman synthesis.
    ///
    /// The chairman sees the de-anonymized answers and the ranking outcome.
    /// A chairman failure is fatal for the deliberation: the caller gets an
    /// explicit error, never an unsynthesized collection of opinions.
    pub async fn synthesize(
        &self,
        query: &Query,
        roster: &CouncilRoster,
        stage1: &[Stage1Response],
        stage2: &[Stage2Ranking],
        map: &AnonymizationMap,
        progress: &dyn ProgressNotifier,
    ) -> Result<Stage3Result, RunCouncilError> {
        info!("Stage 3: Synthesis");
        progress.on_stage_start(&Stage::Synthesize, 1);

        let chairman = roster.chairman.clone();

        let responses: Vec<(String, String)> = stage1
            .iter()
            .filter(|r| r.success)
            .map(|r| (r.model.to_string(), r.content.clone()))
            .collect();

        let rankings: Vec<(String, String)> = stage2
            .iter()
            .map(|ranking| {
                let order = ranking
                    .ranking
                    .iter()
                    .map(|label| {
                        map.model_for(label)
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| label.clone())
                    })
                    .collect::<Vec<_>>()
                    .join(" > ");
                (ranking.judge.to_string(), order)
            })
            .collect();

        let messages = vec![
            Message::system(PromptTemplate::synthesis_system()),
            Message::user(PromptTemplate::synthesis_prompt(
                query.content(),
                &responses,
                &rankings,
            )),
        ];

        match self.gateway.complete(&chairman, &messages).await {
            Ok(text) => {
                progress.on_task_complete(&Stage::Synthesize, &chairman, true);
                progress.on_stage_complete(&Stage::Synthesize);
                Ok(Stage3Result::new(chairman, text))
            }
            Err(e) => {
                warn!(chairman = %chairman, error = %e, "Chairman failed");
                progress.on_task_complete(&Stage::Synthesize, &chairman, false);
                Err(RunCouncilError::SynthesisFailed(e.to_string()))
            }
        }
    }
}
