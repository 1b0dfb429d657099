//! Reduction of a redacted plan to create/update/delete counts.

use serde::Serialize;

use crate::tfe::RedactedPlan;

/// The report printed for CI: exactly these three keys, in this order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub create: u64,
    pub update: u64,
    pub delete: u64,
}

impl ChangeSummary {
    pub fn total(&self) -> u64 {
        self.create + self.update + self.delete
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn record(&mut self, action: &str) {
        match action {
            "create" => self.create += 1,
            "update" => self.update += 1,
            "delete" => self.delete += 1,
            // no-op, read and unknown tokens are not reported
            _ => {}
        }
    }
}

/// Every action token of every change record, in document order.
fn action_tokens(plan: &RedactedPlan) -> impl Iterator<Item = &str> {
    plan.resource_changes()
        .iter()
        .filter_map(|record| record.pointer("/change/actions"))
        .filter_map(|actions| actions.as_array())
        .flatten()
        .filter_map(|token| token.as_str())
}

/// Counts `create`, `update` and `delete` tokens across all change records.
///
/// A replacement encoded as `["delete", "create"]` contributes one of each.
pub fn summarize(plan: &RedactedPlan) -> ChangeSummary {
    action_tokens(plan).fold(ChangeSummary::default(), |mut summary, action| {
        summary.record(action);
        summary
    })
}
