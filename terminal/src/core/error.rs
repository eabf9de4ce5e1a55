//! # Common Error Types
//!
//! Consolidated error handling for the chess terminal.
//!
//! ## Error Categories
//!
//! - **ProviderUnavailable**: wallet bridge missing or too old (terminal for the attempt)
//! - **ApprovalRejected**: the user declined in the wallet (retry with `connect`)
//! - **Connectivity**: RPC / LCD / bridge unreachable (retryable)
//! - **RemoteExecution**: the contract rejected a transaction (shown verbatim)
//! - **RemoteQuery**: a read failed (previous view kept)
//! - **Validation**: a precondition failed locally (illegal move, wrong turn, ...)
//! - **State** / **Config** / **Storage**: local problems
//!
//! ## Usage Pattern
//!
//! ```rust
//! use chess_terminal::core::error::AppError;
//!
//! let err = AppError::RemoteExecution("out of gas".to_string());
//! assert_eq!(err.to_string(), "Transaction failed: out of gas");
//! assert!(!err.is_retryable());
//! ```

use thiserror::Error;

/// Application-wide error type.
///
/// Every variant carries a message suitable for showing to the user. None of
/// them is fatal to the process: each operation can be retried by invoking it
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Wallet extension or bridge is missing, or too old to register chains.
    #[error("Wallet unavailable: {0}")]
    ProviderUnavailable(String),

    /// The user declined a request in the wallet.
    #[error("Wallet request rejected: {0}")]
    ApprovalRejected(String),

    /// Network failure talking to the chain or the wallet bridge.
    #[error("Connection error: {0}")]
    Connectivity(String),

    /// The contract rejected the transaction (illegal move, wrong turn,
    /// insufficient fee, ...).
    #[error("Transaction failed: {0}")]
    RemoteExecution(String),

    /// A contract query failed or returned data we could not decode.
    #[error("Query failed: {0}")]
    RemoteQuery(String),

    /// A local precondition was not met.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid state transition.
    #[error("State error: {0}")]
    State(String),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing persisted session state failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Whether retrying the same operation without user intervention can
    /// reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::ApprovalRejected(_) | AppError::Connectivity(_) | AppError::RemoteQuery(_)
        )
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::RemoteQuery(format!("Failed to parse response: {}", err))
        } else {
            AppError::Connectivity(format!("Network error: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::RemoteQuery(format!("Invalid JSON: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::ApprovalRejected("Request rejected".to_string());
        assert_eq!(err.to_string(), "Wallet request rejected: Request rejected");

        let err = AppError::Connectivity("timeout".to_string());
        assert_eq!(err.to_string(), "Connection error: timeout");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(AppError::Connectivity("x".into()).is_retryable());
        assert!(AppError::ApprovalRejected("x".into()).is_retryable());
        assert!(!AppError::ProviderUnavailable("x".into()).is_retryable());
        assert!(!AppError::RemoteExecution("x".into()).is_retryable());
        assert!(!AppError::Validation("x".into()).is_retryable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(AppError::from(io), AppError::Storage(_)));
    }
}
