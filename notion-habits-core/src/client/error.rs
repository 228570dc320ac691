//! Remote call failure classification.

/// Why a call to the Notion API produced no result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteCallFailure {
    /// Connection could not be made or was dropped
    #[error("Request failed: {0}")]
    Transport(String),
    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Server answered with something other than 200
    #[error("API error [{status}]: {body}")]
    Status { status: u16, body: String },
    /// Response body was not what we expected
    #[error("Malformed response: {0}")]
    Parse(String),
}

impl RemoteCallFailure {
    /// Failures worth another attempt under a retry policy.
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteCallFailure::Transport(_) | RemoteCallFailure::Timeout => true,
            RemoteCallFailure::Status { status, .. } => *status == 429 || *status >= 500,
            RemoteCallFailure::Parse(_) => false,
        }
    }
}

impl From<reqwest::Error> for RemoteCallFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteCallFailure::Timeout
        } else {
            RemoteCallFailure::Transport(e.to_string())
        }
    }
}
