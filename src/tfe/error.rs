use thiserror::Error;

/// Errors raised while talking to the control plane or resolving entities from it.
///
/// SECURITY: Error messages must NEVER contain the bearer token.
#[derive(Debug, Error)]
pub enum TfeError {
    /// Credential missing, or rejected by the control plane
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// Network-level error (connection refused, DNS, timeout, etc.)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response arrived but is not in the expected shape
    #[error("unexpected response (HTTP {status}): {body}")]
    Protocol { status: u16, body: String },

    /// A lookup found no matching workspace, run or plan
    #[error("{entity} not found: {detail}")]
    NotFound { entity: &'static str, detail: String },
}

/// The four failure classes a pipeline step can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Transport,
    Protocol,
    NotFound,
}

impl TfeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TfeError::Auth { .. } => ErrorKind::Auth,
            TfeError::Transport(_) => ErrorKind::Transport,
            TfeError::Protocol { .. } => ErrorKind::Protocol,
            TfeError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    pub(crate) fn missing_credential() -> Self {
        TfeError::Auth {
            message: "missing credential. Set TFE_TOKEN or use --token flag".to_string(),
        }
    }

    pub(crate) fn not_found(entity: &'static str, detail: impl Into<String>) -> Self {
        TfeError::NotFound {
            entity,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Auth => "AuthError",
            ErrorKind::Transport => "TransportError",
            ErrorKind::Protocol => "ProtocolError",
            ErrorKind::NotFound => "NotFoundError",
        };
        f.write_str(name)
    }
}
