//! Bounded-length ASCII field validation.
//!
//! Every string-typed call field is a bounded ASCII sequence. The caps are
//! fixed here so storage cost per record is bounded and documented in one
//! place. Validation runs before any state change; a failing field rejects
//! the whole call.

use crate::error::Error;

/// Maximum byte length of a credential id.
pub const MAX_ID_LEN: usize = 128;

/// Maximum byte length of the website field.
pub const MAX_WEBSITE_LEN: usize = 128;

/// Maximum byte length of the username field.
pub const MAX_USERNAME_LEN: usize = 128;

/// Maximum byte length of the ciphertext payload.
pub const MAX_CIPHERTEXT_LEN: usize = 1024;

/// Validate a credential id.
///
/// Allowed: ASCII alphanumeric, underscore, hyphen. Non-empty, at most
/// [`MAX_ID_LEN`] bytes. Ids name storage slots, so the charset is kept to
/// characters that are safe in file names and log lines.
pub fn validate_id(id: &str) -> Result<(), Error> {
    if id.is_empty() {
        return Err(Error::InvalidField {
            field: "id",
            reason: "must not be empty".to_string(),
        });
    }
    if id.len() > MAX_ID_LEN {
        return Err(Error::InvalidField {
            field: "id",
            reason: format!("exceeds maximum length of {MAX_ID_LEN} bytes"),
        });
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(Error::InvalidField {
            field: "id",
            reason: "contains invalid characters (allowed: alphanumeric, underscore, hyphen)"
                .to_string(),
        });
    }
    Ok(())
}

/// Validate a printable-ASCII field against a byte cap.
pub fn validate_ascii(field: &'static str, value: &str, max_len: usize) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    if value.len() > max_len {
        return Err(Error::InvalidField {
            field,
            reason: format!("exceeds maximum length of {max_len} bytes"),
        });
    }
    if !value.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
        return Err(Error::InvalidField {
            field,
            reason: "contains non-printable or non-ASCII characters".to_string(),
        });
    }
    Ok(())
}
