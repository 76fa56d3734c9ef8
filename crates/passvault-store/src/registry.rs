//! User registry: which principals are registered.
//!
//! Plain data, no locking. The vault backends hold a [`Registry`] inside
//! their state and serialize access through the state lock, so the
//! invariants here stay testable in isolation.

use crate::error::{Result, VaultError};
use crate::types::RegistrationEntry;
use passvault_core::Principal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Registered principals, keyed by identity.
///
/// At most one entry per principal, created on the first successful
/// `register` call and never deleted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    entries: HashMap<Principal, RegistrationEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a principal. First call wins.
    ///
    /// A second call for the same principal is a declined state transition,
    /// not a system fault: it fails with `AlreadyRegistered` and leaves the
    /// registry untouched.
    pub fn register(&mut self, principal: Principal) -> Result<()> {
        if self.entries.contains_key(&principal) {
            return Err(VaultError::AlreadyRegistered(principal));
        }

        debug!(principal = %principal, "registering principal");
        self.entries
            .insert(principal.clone(), RegistrationEntry::new(principal));
        Ok(())
    }

    /// Check whether a principal is registered. Pure lookup.
    pub fn is_registered(&self, principal: &Principal) -> bool {
        self.entries.contains_key(principal)
    }

    /// Number of registered principals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no principal has registered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
