use std::fmt;

/// Runs listed per lookup; only the newest is used, the rest absorb ordering quirks.
pub const RUN_PAGE_SIZE: u32 = 5;

pub const RUN_STATUS_FILTER: &str = "planned_and_finished";
pub const RUN_OPERATION_FILTER: &str = "plan_only";

/// Organization + workspace name identifying the workspace to summarize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRef {
    pub organization: String,
    pub workspace: String,
}

impl WorkspaceRef {
    pub fn new(organization: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            workspace: workspace.into(),
        }
    }
}

impl fmt::Display for WorkspaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.workspace)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceId(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanId(String);

impl WorkspaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RunId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PlanId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkspaceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RunId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for PlanId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Redacted JSON plan as returned by the control plane, kept untouched.
///
/// Only `resource_changes[].change.actions` is ever read from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RedactedPlan(serde_json::Value);

impl RedactedPlan {
    pub fn new(document: serde_json::Value) -> Self {
        Self(document)
    }

    pub fn document(&self) -> &serde_json::Value {
        &self.0
    }

    /// Change records, or an empty slice when the field is absent or not a list.
    pub fn resource_changes(&self) -> &[serde_json::Value] {
        self.0
            .get("resource_changes")
            .and_then(|rc| rc.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl fmt::Display for RedactedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} resource changes", self.resource_changes().len())
    }
}
