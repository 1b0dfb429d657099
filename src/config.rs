use std::time::Duration;

use crate::cli::Cli;
use crate::error::PipelineError;
use crate::tfe::{DEFAULT_HOST, DEFAULT_TIMEOUT_SECS, WorkspaceRef};

/// Bearer token and API host. Never persisted; `Debug` hides the token.
#[derive(Clone)]
pub struct Credential {
    pub token: Option<String>,
    pub host: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub credential: Credential,
    pub target: WorkspaceRef,
    pub timeout: Duration,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, env: &str, flag: &str) -> Result<String, PipelineError> {
    present(value).ok_or_else(|| {
        PipelineError::Config(format!("{} is not set. Set {} or use {} flag", env, env, flag))
    })
}

fn parse_timeout(value: Option<String>) -> Result<Duration, PipelineError> {
    let secs = match present(value) {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            PipelineError::Config(format!(
                "TFE_TIMEOUT must be a whole number of seconds, got '{}'",
                raw
            ))
        })?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    if secs == 0 {
        return Err(PipelineError::Config(
            "TFE_TIMEOUT must be at least 1 second".to_string(),
        ));
    }

    Ok(Duration::from_secs(secs))
}

impl TryFrom<Cli> for Settings {
    type Error = PipelineError;

    // NOTE: a missing token is left to the client, which refuses the first request
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let organization = required(cli.org, "TFE_ORG", "--org")?;
        let workspace = required(cli.workspace, "WORKSPACE_NAME", "--workspace")?;

        let timeout = parse_timeout(cli.timeout)?;

        Ok(Settings {
            credential: Credential {
                token: present(cli.token),
                host: present(cli.url).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            },
            target: WorkspaceRef::new(organization, workspace),
            timeout,
        })
    }
}
