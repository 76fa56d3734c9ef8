//! # passvault-core
//!
//! Core types, configuration, and utilities for PassVault.
//!
//! This crate provides the shared foundation used across the PassVault
//! workspace:
//!
//! - **Principals**: strongly-typed caller identifiers
//! - **Ciphertext**: opaque secret material with memory hygiene
//! - **Limits**: bounded-length ASCII field validation
//! - **Configuration**: loading, validation, and persistence of config files

pub mod config;
pub mod error;
pub mod limits;
pub mod paths;
pub mod principal;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::{ConfigError, Error, Result};
pub use principal::Principal;
pub use secret::Ciphertext;
