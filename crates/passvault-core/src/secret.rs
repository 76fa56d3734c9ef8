//! Opaque ciphertext handling.
//!
//! [`Ciphertext`] is the only form in which secret material crosses the
//! vault boundary: already encrypted by the caller, validated against the
//! field caps at construction, and zeroed on drop. There is no way to build
//! one that violates the ciphertext cap, so downstream code never
//! re-validates the payload.

use crate::error::Error;
use crate::limits::{validate_ascii, MAX_CIPHERTEXT_LEN};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Encrypted credential material.
///
/// The vault is a pass-through for this value: received encrypted, persisted
/// encrypted, returned encrypted. Decryption is the caller's responsibility.
/// Debug and Display both emit `[REDACTED]` so the payload never lands in
/// logs by accident.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Ciphertext {
    inner: String,
}

impl Ciphertext {
    /// Create a ciphertext value, enforcing the field cap.
    ///
    /// The payload must be non-empty printable ASCII of at most
    /// [`MAX_CIPHERTEXT_LEN`] bytes; anything else is rejected here, before
    /// the value can reach a store operation.
    pub fn new(value: impl Into<String>) -> Result<Self, Error> {
        let inner = value.into();
        validate_ascii("ciphertext", &inner, MAX_CIPHERTEXT_LEN)?;
        Ok(Self { inner })
    }

    /// Expose the raw payload.
    ///
    /// The value is still encrypted; this only exposes the opaque bytes for
    /// returning them to their owner or persisting them.
    pub fn expose(&self) -> &str {
        &self.inner
    }
}

// Never print secret material, even encrypted
impl fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl PartialEq for Ciphertext {
    /// Constant-time comparison: the length mismatch and every byte
    /// difference are folded into one accumulator, with no early exit.
    fn eq(&self, other: &Self) -> bool {
        let a = self.inner.as_bytes();
        let b = other.inner.as_bytes();

        let mut diff = a.len() ^ b.len();
        for i in 0..a.len().min(b.len()) {
            diff |= usize::from(a[i] ^ b[i]);
        }
        diff == 0
    }
}

impl Eq for Ciphertext {}

impl TryFrom<&str> for Ciphertext {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ciphertext {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Ciphertext {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A vault file or call payload carrying an over-cap or non-ASCII
        // ciphertext fails to parse instead of smuggling the value in.
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Ciphertext {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Persisted verbatim: the vault file stores ciphertext, not plaintext
        self.inner.serialize(serializer)
    }
}
