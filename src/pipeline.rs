//! Sequencing of the resolver chain and the plan aggregator.

use std::fmt::Display;
use std::future::Future;

use crate::error::{PipelineError, Step};
use crate::resolver;
use crate::summary::{ChangeSummary, summarize};
use crate::tfe::{ControlPlane, TfeError, WorkspaceRef};

/// Receives pipeline progress. Injected so the orchestrator holds no global
/// logging state.
pub trait PipelineLog: Send + Sync {
    fn step_started(&self, step: Step);
    fn step_resolved(&self, step: Step, resolved: &str);
    fn step_failed(&self, step: Step, error: &TfeError);
    fn summary_ready(&self, summary: &ChangeSummary);
}

/// Forwards progress to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl PipelineLog for TracingLog {
    fn step_started(&self, step: Step) {
        tracing::debug!(%step, "step started");
    }

    fn step_resolved(&self, step: Step, resolved: &str) {
        tracing::info!(%step, resolved, "step resolved");
    }

    fn step_failed(&self, step: Step, error: &TfeError) {
        tracing::warn!(%step, kind = %error.kind(), "step failed");
    }

    fn summary_ready(&self, summary: &ChangeSummary) {
        tracing::info!(
            create = summary.create,
            update = summary.update,
            delete = summary.delete,
            "plan summarized"
        );
    }
}

pub struct Pipeline {
    api: Box<dyn ControlPlane>,
    log: Box<dyn PipelineLog>,
}

impl Pipeline {
    pub fn new(api: Box<dyn ControlPlane>, log: Box<dyn PipelineLog>) -> Self {
        Self { api, log }
    }

    /// Resolves the latest speculative plan of `target` and summarizes it.
    ///
    /// Stops at the first failing step; no partial summary is produced.
    pub async fn run(&self, target: &WorkspaceRef) -> Result<ChangeSummary, PipelineError> {
        let api = self.api.as_ref();

        let workspace_id = self
            .step(
                Step::WorkspaceLookup,
                resolver::resolve_workspace_id(api, target),
            )
            .await?;
        let run_id = self
            .step(
                Step::RunLookup,
                resolver::resolve_latest_run(api, &workspace_id),
            )
            .await?;
        let plan_id = self
            .step(Step::PlanLookup, resolver::resolve_plan_id(api, &run_id))
            .await?;
        let plan = self
            .step(
                Step::PlanDownload,
                resolver::resolve_redacted_plan(api, &plan_id),
            )
            .await?;

        let summary = summarize(&plan);
        self.log.summary_ready(&summary);

        Ok(summary)
    }

    async fn step<T, F>(&self, step: Step, lookup: F) -> Result<T, PipelineError>
    where
        T: Display,
        F: Future<Output = Result<T, TfeError>>,
    {
        self.log.step_started(step);

        match lookup.await {
            Ok(resolved) => {
                self.log.step_resolved(step, &resolved.to_string());
                Ok(resolved)
            }
            Err(source) => {
                self.log.step_failed(step, &source);
                Err(PipelineError::Step { step, source })
            }
        }
    }
}
