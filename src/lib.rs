//! tfe-plan-summary - latest speculative plan, reduced for CI
//!
//! Resolves workspace → latest finished plan-only run → plan → redacted JSON
//! plan on a Terraform Cloud/Enterprise control plane and reduces it to
//! create/update/delete counts.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod summary;
pub mod tfe;

pub use error::{PipelineError, Step};
pub use pipeline::{Pipeline, PipelineLog, TracingLog};
pub use summary::{ChangeSummary, summarize};
pub use tfe::{ControlPlane, ErrorKind, RedactedPlan, TfeClient, TfeError, WorkspaceRef};
