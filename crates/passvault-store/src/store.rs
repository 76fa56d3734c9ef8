//! Vault storage backends.
//!
//! Defines the [`Vault`] trait and two implementations: [`MemoryVault`],
//! which keeps state in memory, and [`FileVault`], which persists every
//! committed call to a JSON file under the vault directory.
//!
//! Every operation is atomic and serializable: a mutating call takes the
//! state write lock once, validates all preconditions, and either commits
//! fully or returns an error having changed nothing. No call can observe a
//! partially-committed state of another.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use passvault_core::limits::{validate_ascii, validate_id, MAX_USERNAME_LEN, MAX_WEBSITE_LEN};
use passvault_core::{Config, Principal};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Result, VaultError};
use crate::registry::Registry;
use crate::types::{CredentialRecord, CredentialRef, CredentialView, StoreParams};

/// Async trait for vault backends.
///
/// The vault is the dependency-injected store handle: operations take the
/// calling principal explicitly, and all state lives behind the handle
/// rather than in globals.
#[async_trait]
pub trait Vault: Send + Sync {
    /// Register the calling principal. First call wins; a repeat call
    /// fails with `AlreadyRegistered` and commits nothing.
    async fn register(&self, caller: &Principal) -> Result<()>;

    /// Check whether a principal is registered.
    async fn is_registered(&self, principal: &Principal) -> Result<bool>;

    /// Store a credential for the calling principal.
    ///
    /// Upsert semantics: a fresh id creates a record owned by the caller; an
    /// id already owned by the caller is overwritten in place (rotation
    /// without id churn); an id owned by anyone else fails `Forbidden`.
    async fn store(&self, caller: &Principal, params: StoreParams) -> Result<()>;

    /// Fetch a credential by id.
    ///
    /// Returns `Ok(None)` when no record has that id, `Err(Forbidden)` when
    /// the record belongs to another principal, and the stored fields
    /// verbatim when the caller owns it.
    async fn get(&self, caller: &Principal, id: &str) -> Result<Option<CredentialView>>;

    /// List the caller's credentials, metadata only, sorted by id.
    async fn list(&self, caller: &Principal) -> Result<Vec<CredentialRef>>;
}

/// The complete vault state: the user registry plus all credential records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultState {
    registry: Registry,
    records: HashMap<String, CredentialRecord>,
}

impl VaultState {
    /// Register a principal.
    fn register(&mut self, caller: &Principal) -> Result<()> {
        self.registry.register(caller.clone())
    }

    /// Apply a store call. The registration gate comes first, then field
    /// validation; mutation only happens once both pass. The ciphertext
    /// needs no check here -- it was validated when constructed.
    fn store(&mut self, caller: &Principal, params: StoreParams) -> Result<()> {
        if !self.registry.is_registered(caller) {
            return Err(VaultError::NotRegistered(caller.clone()));
        }

        validate_id(&params.id)?;
        validate_ascii("website", &params.website, MAX_WEBSITE_LEN)?;
        validate_ascii("username", &params.username, MAX_USERNAME_LEN)?;

        let now = Utc::now();
        if let Some(existing) = self.records.get_mut(&params.id) {
            // Id collision across owners is a rejected claim, not an
            // overwrite: an attacker must not be able to shadow or replace
            // another user's record by guessing its id.
            if existing.owner != *caller {
                return Err(VaultError::Forbidden { id: params.id });
            }

            debug!(caller = %caller, id = %params.id, "overwriting credential");
            existing.ciphertext = params.ciphertext;
            existing.website = params.website;
            existing.username = params.username;
            existing.updated_at = now;
            return Ok(());
        }

        debug!(caller = %caller, id = %params.id, "creating credential");
        self.records.insert(
            params.id.clone(),
            CredentialRecord {
                id: params.id,
                owner: caller.clone(),
                ciphertext: params.ciphertext,
                website: params.website,
                username: params.username,
                created_at: now,
                updated_at: now,
            },
        );

        Ok(())
    }

    /// Apply a get call. Ownership is checked before any field is exposed.
    fn get(&self, caller: &Principal, id: &str) -> Result<Option<CredentialView>> {
        match self.records.get(id) {
            None => Ok(None),
            Some(record) if record.owner != *caller => Err(VaultError::Forbidden {
                id: id.to_string(),
            }),
            Some(record) => Ok(Some(record.view())),
        }
    }

    /// List the caller's records, metadata only.
    fn list(&self, caller: &Principal) -> Result<Vec<CredentialRef>> {
        if !self.registry.is_registered(caller) {
            return Err(VaultError::NotRegistered(caller.clone()));
        }

        let mut refs: Vec<CredentialRef> = self
            .records
            .values()
            .filter(|record| record.owner == *caller)
            .map(CredentialRecord::as_ref_entry)
            .collect();

        refs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(refs)
    }
}

/// An in-memory vault.
///
/// State is lost when the handle is dropped. Used for tests and dry runs.
pub struct MemoryVault {
    state: RwLock<VaultState>,
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryVault {
    /// Create an empty in-memory vault.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(VaultState::default()),
        }
    }
}

#[async_trait]
impl Vault for MemoryVault {
    async fn register(&self, caller: &Principal) -> Result<()> {
        let mut state = self.state.write().await;
        state.register(caller)
    }

    async fn is_registered(&self, principal: &Principal) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.registry.is_registered(principal))
    }

    async fn store(&self, caller: &Principal, params: StoreParams) -> Result<()> {
        let mut state = self.state.write().await;
        state.store(caller, params)
    }

    async fn get(&self, caller: &Principal, id: &str) -> Result<Option<CredentialView>> {
        let state = self.state.read().await;
        state.get(caller, id)
    }

    async fn list(&self, caller: &Principal) -> Result<Vec<CredentialRef>> {
        let state = self.state.read().await;
        state.list(caller)
    }
}

/// A file-backed vault with JSON persistence.
///
/// State is loaded once at construction and every committed mutation is
/// persisted via an atomic write (write to tmp, then rename), so a crash
/// between calls never leaves a partially-written vault on disk. The vault
/// file is created with mode `0600` on Unix, its directory with `0700`.
pub struct FileVault {
    path: PathBuf,
    state: RwLock<VaultState>,
}

impl FileVault {
    /// Open a vault file, creating empty state if the file does not exist.
    pub fn open(path: PathBuf) -> Result<Self> {
        let state = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            VaultState::default()
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Open the vault at the directory the configuration resolves to
    /// (`~/.passvault/vault` unless overridden by `vault.dir`).
    pub fn from_config(config: &Config) -> Result<Self> {
        let dir = config
            .vault_dir()
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        Self::open(dir.join("vault.json"))
    }

    /// Atomically persist the current state to disk.
    async fn save(&self, state: &VaultState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = std::fs::Permissions::from_mode(0o700);
                tokio::fs::set_permissions(parent, perms).await?;
            }
        }

        let data = serde_json::to_string_pretty(state)?;
        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, data).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&tmp_path, perms).await?;
        }

        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Vault for FileVault {
    async fn register(&self, caller: &Principal) -> Result<()> {
        let mut state = self.state.write().await;
        state.register(caller)?;
        self.save(&state).await?;
        Ok(())
    }

    async fn is_registered(&self, principal: &Principal) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.registry.is_registered(principal))
    }

    async fn store(&self, caller: &Principal, params: StoreParams) -> Result<()> {
        let mut state = self.state.write().await;
        state.store(caller, params)?;
        self.save(&state).await?;
        Ok(())
    }

    async fn get(&self, caller: &Principal, id: &str) -> Result<Option<CredentialView>> {
        let state = self.state.read().await;
        state.get(caller, id)
    }

    async fn list(&self, caller: &Principal) -> Result<Vec<CredentialRef>> {
        let state = self.state.read().await;
        state.list(caller)
    }
}
