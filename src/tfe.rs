mod client;
mod error;
mod types;

pub use client::{DEFAULT_HOST, DEFAULT_TIMEOUT_SECS, TfeClient, api_base_url};
pub use error::{ErrorKind, TfeError};
pub use types::{
    PlanId, RUN_OPERATION_FILTER, RUN_PAGE_SIZE, RUN_STATUS_FILTER, RedactedPlan, RunId,
    WorkspaceId, WorkspaceRef,
};

use async_trait::async_trait;
use reqwest::Method;

/// Access to the control plane's `/api/v2` surface.
///
/// Each call is exactly one round trip; retry policy belongs to whoever
/// invokes the whole pipeline.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// JSON:API call. `endpoint` is relative to the API base, `body` is an
    /// already-serialized JSON payload. Succeeds only for an enveloped
    /// document with a top-level `data` key.
    async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&str>,
    ) -> Result<serde_json::Value, TfeError>;

    /// GET of a bare JSON document with no `data` envelope.
    async fn fetch_document(&self, endpoint: &str) -> Result<serde_json::Value, TfeError>;
}
