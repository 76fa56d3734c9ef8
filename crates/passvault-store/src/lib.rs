//! Access-controlled credential storage for PassVault.
//!
//! Two cooperating components behind one state lock: a user registry
//! (first-call-wins registration) and a credential store (ownership-scoped
//! reads and writes of opaque ciphertext records). Every operation is an
//! atomic call: it either commits fully or fails with a tagged error and no
//! side effect.

pub mod calls;
pub mod error;
pub mod registry;
pub mod store;
pub mod types;

pub use calls::{dispatch, Call, CallFailure, CallOutcome, FailureKind};
pub use error::{Result, VaultError};
pub use registry::Registry;
pub use store::{FileVault, MemoryVault, Vault};
pub use types::{CredentialRecord, CredentialRef, CredentialView, RegistrationEntry, StoreParams};
