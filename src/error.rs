use std::fmt;

use thiserror::Error;

use crate::tfe::{ErrorKind, TfeError};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    WorkspaceLookup,
    RunLookup,
    PlanLookup,
    PlanDownload,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::WorkspaceLookup => "workspace lookup",
            Step::RunLookup => "latest run lookup",
            Step::PlanLookup => "plan lookup",
            Step::PlanDownload => "redacted plan download",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{step} failed ({kind})", kind = .source.kind())]
    Step {
        step: Step,
        #[source]
        source: TfeError,
    },
}

impl PipelineError {
    pub fn step(&self) -> Option<Step> {
        match self {
            PipelineError::Step { step, .. } => Some(*step),
            PipelineError::Config(_) => None,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            PipelineError::Step { source, .. } => Some(source.kind()),
            PipelineError::Config(_) => None,
        }
    }
}
