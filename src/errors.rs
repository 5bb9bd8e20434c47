use thiserror::Error;

/// Failure taxonomy for the minting and scanning paths.
///
/// Transaction construction surfaces every failure to the caller; the scan
/// path downgrades per-candidate network and parse failures to skips (see
/// `scan::resolve::SkipReason`), so those never reach this type.
#[derive(Debug, Error)]
pub enum AftershowError {
    /// Missing or malformed service configuration. Fatal, fixed by the
    /// operator; operations requiring the mint authority fail closed.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Ticket already claimed or not yet verified. Surfaced, not retried.
    #[error("state conflict: {0}")]
    StateConflict(String),

    #[error("malformed address: {0}")]
    MalformedAddress(String),

    /// Ledger RPC or metadata fetch failure. Retry policy belongs to the
    /// caller.
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, AftershowError>;

impl From<serde_json::Error> for AftershowError {
    fn from(err: serde_json::Error) -> Self {
        AftershowError::Parse(err.to_string())
    }
}

impl From<bincode::Error> for AftershowError {
    fn from(err: bincode::Error) -> Self {
        AftershowError::Parse(err.to_string())
    }
}

impl From<solana_client::client_error::ClientError> for AftershowError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        AftershowError::Network(err.to_string())
    }
}

impl From<reqwest::Error> for AftershowError {
    fn from(err: reqwest::Error) -> Self {
        AftershowError::Network(err.to_string())
    }
}
