//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! into them via `From` impls or wrap it as one variant.

use thiserror::Error;

/// Errors producible by `at-core` itself — configuration validation, mostly.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `at-core`.
pub type CoreResult<T> = Result<T, CoreError>;
