//! Error types for vault operations.

use passvault_core::Principal;
use thiserror::Error;

/// Errors that can occur during vault operations.
///
/// `AlreadyRegistered`, `NotRegistered`, and `Forbidden` are expected,
/// recoverable outcomes: the call is declined and nothing is committed.
/// None of them is fatal to the vault; failure of one call never affects
/// state held for other principals or ids.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Principal already registered: {0}")]
    AlreadyRegistered(Principal),

    #[error("Principal not registered: {0}")]
    NotRegistered(Principal),

    #[error("Access denied for credential id: {id}")]
    Forbidden { id: String },

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<passvault_core::Error> for VaultError {
    fn from(err: passvault_core::Error) -> Self {
        match err {
            passvault_core::Error::InvalidField { field, reason } => {
                Self::InvalidField { field, reason }
            }
            passvault_core::Error::Io(e) => Self::Io(e),
            passvault_core::Error::Json(e) => Self::Json(e),
            other => Self::Storage(other.to_string()),
        }
    }
}

/// Convenience result alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
