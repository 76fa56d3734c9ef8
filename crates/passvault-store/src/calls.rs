//! The discrete call surface.
//!
//! Each vault operation is exposed as a named, atomic call -- the unit a
//! ledger-style host would submit as one transaction. [`Call`] is the typed
//! request envelope, [`CallOutcome`] the tagged result: success payloads and
//! declined transitions are both ordinary values, never panics.

use passvault_core::{Ciphertext, Principal};
use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::store::Vault;
use crate::types::StoreParams;

/// A single vault call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Call {
    /// Register the calling principal.
    RegisterUser,

    /// Store (or rotate) a credential owned by the caller.
    StorePassword {
        id: String,
        ciphertext: Ciphertext,
        website: String,
        username: String,
    },

    /// Fetch a credential owned by the caller.
    GetPassword { id: String },

    /// List the caller's credentials, metadata only.
    ListPasswords,
}

impl Call {
    /// The wire name of the operation.
    pub fn op_name(&self) -> &'static str {
        match self {
            Call::RegisterUser => "register-user",
            Call::StorePassword { .. } => "store-password",
            Call::GetPassword { .. } => "get-password",
            Call::ListPasswords => "list-passwords",
        }
    }
}

/// The result of one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CallOutcome {
    /// The call committed; `value` is the operation's payload.
    Ok { value: serde_json::Value },

    /// The call was declined or failed; nothing was committed.
    Err { error: CallFailure },
}

impl CallOutcome {
    /// Create a success outcome.
    pub fn ok(value: serde_json::Value) -> Self {
        Self::Ok { value }
    }

    /// Create a failure outcome.
    pub fn err(error: CallFailure) -> Self {
        Self::Err { error }
    }

    /// Whether the call committed.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// The success payload, if the call committed.
    pub fn value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Ok { value } => Some(value),
            Self::Err { .. } => None,
        }
    }

    /// The failure, if the call was declined.
    pub fn failure(&self) -> Option<&CallFailure> {
        match self {
            Self::Ok { .. } => None,
            Self::Err { error } => Some(error),
        }
    }
}

/// A declined or failed call, as a tagged error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallFailure {
    /// Machine-readable failure kind.
    pub kind: FailureKind,

    /// Human-readable description.
    pub message: String,
}

/// Failure kinds surfaced by the call surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    AlreadyRegistered,
    NotRegistered,
    Forbidden,
    InvalidField,
    Storage,
}

impl From<&VaultError> for FailureKind {
    fn from(err: &VaultError) -> Self {
        match err {
            VaultError::AlreadyRegistered(_) => Self::AlreadyRegistered,
            VaultError::NotRegistered(_) => Self::NotRegistered,
            VaultError::Forbidden { .. } => Self::Forbidden,
            VaultError::InvalidField { .. } => Self::InvalidField,
            VaultError::Storage(_) | VaultError::Io(_) | VaultError::Json(_) => Self::Storage,
        }
    }
}

impl From<VaultError> for CallFailure {
    fn from(err: VaultError) -> Self {
        Self {
            kind: FailureKind::from(&err),
            message: err.to_string(),
        }
    }
}

/// Route one call from an authenticated principal to the vault.
///
/// The caller identity comes from the call context, not the payload: a
/// principal can only ever act as itself.
pub async fn dispatch(vault: &dyn Vault, caller: &Principal, call: Call) -> CallOutcome {
    let result = match call {
        Call::RegisterUser => vault
            .register(caller)
            .await
            .map(|()| serde_json::json!(true)),

        Call::StorePassword {
            id,
            ciphertext,
            website,
            username,
        } => vault
            .store(
                caller,
                StoreParams {
                    id,
                    ciphertext,
                    website,
                    username,
                },
            )
            .await
            .map(|()| serde_json::json!(true)),

        Call::GetPassword { id } => vault.get(caller, &id).await.and_then(|view| {
            serde_json::to_value(view).map_err(VaultError::from)
        }),

        Call::ListPasswords => vault.list(caller).await.and_then(|refs| {
            serde_json::to_value(refs).map_err(VaultError::from)
        }),
    };

    match result {
        Ok(value) => CallOutcome::ok(value),
        Err(err) => CallOutcome::err(err.into()),
    }
}
