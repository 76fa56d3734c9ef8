//! Core types for credential storage.
//!
//! Data structures representing registrations and credential records in
//! both at-rest and returned-to-caller forms.

use chrono::{DateTime, Utc};
use passvault_core::{Ciphertext, Principal};
use serde::{Deserialize, Serialize};

/// A registration entry for one principal.
///
/// Created on the first successful `register` call and never deleted. A
/// principal either has no entry (unregistered) or exactly one entry with
/// `registered = true`; there is no intermediate state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationEntry {
    /// The registered principal.
    pub principal: Principal,

    /// Always true for an existing entry.
    pub registered: bool,

    /// When the principal registered.
    pub registered_at: DateTime<Utc>,
}

impl RegistrationEntry {
    /// Create an entry for a newly registered principal.
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            registered: true,
            registered_at: Utc::now(),
        }
    }
}

/// A stored credential record.
///
/// Keyed by a caller-supplied id, globally unique across the vault. The
/// owner is bound at creation and never changes; only the owner may
/// overwrite or read the record. The ciphertext is held verbatim -- the
/// vault performs no encryption or decryption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Caller-chosen slot name.
    pub id: String,

    /// The principal that created the record.
    pub owner: Principal,

    /// Opaque encrypted payload.
    pub ciphertext: Ciphertext,

    /// Site the credential belongs to.
    pub website: String,

    /// Username at that site.
    pub username: String,

    /// When the record was first created. Preserved across overwrites.
    pub created_at: DateTime<Utc>,

    /// When the record was last overwritten.
    pub updated_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Build the view returned to the record's owner.
    pub fn view(&self) -> CredentialView {
        CredentialView {
            website: self.website.clone(),
            username: self.username.clone(),
            ciphertext: self.ciphertext.clone(),
        }
    }

    /// Build the metadata-only reference for listings.
    pub fn as_ref_entry(&self) -> CredentialRef {
        CredentialRef {
            id: self.id.clone(),
            website: self.website.clone(),
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

/// What a successful `get` returns: the stored fields, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialView {
    /// Site the credential belongs to.
    pub website: String,

    /// Username at that site.
    pub username: String,

    /// Opaque encrypted payload, exactly as stored.
    pub ciphertext: Ciphertext,
}

/// A lightweight reference to a stored credential.
///
/// Contains only metadata -- no ciphertext -- so it is safe to pass
/// around, log, or serialize without exposing secret material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRef {
    /// Caller-chosen slot name.
    pub id: String,

    /// Site the credential belongs to.
    pub website: String,

    /// Username at that site.
    pub username: String,

    /// When the record was first created.
    pub created_at: DateTime<Utc>,
}

/// Parameters for storing a credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreParams {
    /// Caller-chosen slot name.
    pub id: String,

    /// Pre-encrypted payload.
    pub ciphertext: Ciphertext,

    /// Site the credential belongs to.
    pub website: String,

    /// Username at that site.
    pub username: String,
}
