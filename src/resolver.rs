//! The four dependent lookups that lead from a workspace name to its latest
//! speculative plan.
//!
//! Every nested field is read optionally; a missing or empty identifier is a
//! `NotFound`, never a panic.

use reqwest::Method;
use urlencoding::encode;

use crate::tfe::{
    ControlPlane, PlanId, RUN_OPERATION_FILTER, RUN_PAGE_SIZE, RUN_STATUS_FILTER, RedactedPlan,
    RunId, TfeError, WorkspaceId, WorkspaceRef,
};

fn non_empty_str<'a>(document: &'a serde_json::Value, pointer: &str) -> Option<&'a str> {
    document
        .pointer(pointer)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

pub async fn resolve_workspace_id(
    api: &dyn ControlPlane,
    target: &WorkspaceRef,
) -> Result<WorkspaceId, TfeError> {
    let endpoint = format!(
        "/organizations/{}/workspaces/{}",
        encode(&target.organization),
        encode(&target.workspace)
    );

    let document = api.request(&endpoint, Method::GET, None).await?;

    non_empty_str(&document, "/data/id")
        .map(WorkspaceId::from)
        .ok_or_else(|| {
            TfeError::not_found(
                "workspace",
                format!(
                    "'{}' in organization '{}' (check the name and the token's access)",
                    target.workspace, target.organization
                ),
            )
        })
}

/// Filter set for the run listing, sent both as query parameters and as the
/// JSON request body.
fn run_filter_body() -> String {
    serde_json::json!({
        "filter": {
            "status": RUN_STATUS_FILTER,
            "operation": RUN_OPERATION_FILTER,
        },
        "page": { "size": RUN_PAGE_SIZE },
    })
    .to_string()
}

// First-returned wins: the listing is most-recent-first.
pub async fn resolve_latest_run(
    api: &dyn ControlPlane,
    workspace_id: &WorkspaceId,
) -> Result<RunId, TfeError> {
    let endpoint = format!(
        "/workspaces/{}/runs?filter[status]={}&filter[operation]={}&page[size]={}",
        encode(workspace_id.as_str()),
        RUN_STATUS_FILTER,
        RUN_OPERATION_FILTER,
        RUN_PAGE_SIZE
    );
    let body = run_filter_body();

    let document = api.request(&endpoint, Method::GET, Some(&body)).await?;

    let runs = document
        .get("data")
        .and_then(|d| d.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    tracing::debug!(candidates = runs.len(), workspace_id = %workspace_id, "runs listed");

    runs.first()
        .and_then(|run| run.get("id"))
        .and_then(|id| id.as_str())
        .filter(|id| !id.is_empty())
        .map(RunId::from)
        .ok_or_else(|| {
            TfeError::not_found(
                "run",
                format!(
                    "no matching run ({} / {}) in workspace {}",
                    RUN_STATUS_FILTER, RUN_OPERATION_FILTER, workspace_id
                ),
            )
        })
}

pub async fn resolve_plan_id(api: &dyn ControlPlane, run_id: &RunId) -> Result<PlanId, TfeError> {
    let endpoint = format!("/runs/{}", encode(run_id.as_str()));

    let document = api.request(&endpoint, Method::GET, None).await?;

    non_empty_str(&document, "/data/relationships/plan/data/id")
        .map(PlanId::from)
        .ok_or_else(|| TfeError::not_found("plan", format!("no plan linked to run {}", run_id)))
}

pub async fn resolve_redacted_plan(
    api: &dyn ControlPlane,
    plan_id: &PlanId,
) -> Result<RedactedPlan, TfeError> {
    let endpoint = format!("/plans/{}/json-output-redacted", encode(plan_id.as_str()));

    let document = api.fetch_document(&endpoint).await?;

    Ok(RedactedPlan::new(document))
}
