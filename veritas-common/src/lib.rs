//! Common types and utilities shared across Veritas crates.
//!
//! This crate defines the shared error type used throughout the Veritas
//! workspace and installs logging from the `logging` config section.
//!
//! # Overview
//!
//! - [`observability`]: `tracing` subscriber for the binary and test harnesses
//! - [`VeritasError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use veritas_common::VeritasError;
//!
//! let err = VeritasError::MissingCredential("OPENAI_API_KEY");
//! assert_eq!(err.to_string(), "Missing credential: OPENAI_API_KEY is not set");
//! ```

pub mod observability;

/// Error types used across the Veritas system.
#[derive(thiserror::Error, Debug)]
pub enum VeritasError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The completion service credential was never provided.
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// The external completion service failed or returned a non-success status.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The inbound payload could not be read at all.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Convenient alias for results that use [`VeritasError`].
pub type Result<T> = std::result::Result<T, VeritasError>;
