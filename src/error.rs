//! Error types for easypack operations.
//!
//! This module defines [`EasypackError`], the error type shared by the
//! dispatcher and every collaborator, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Collaborators return `EasypackError` for failures callers may match on
//! - `anyhow::Error` (via `EasypackError::Other`) carries ad-hoc context
//! - The dispatcher never translates errors; they reach `main` unchanged

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for easypack operations.
#[derive(Debug, Error)]
pub enum EasypackError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Boilerplate id is neither registered nor a repository URL.
    #[error("Unknown boilerplate: {name}")]
    UnknownBoilerplate { name: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Port list entry is not a valid TCP port.
    #[error("Invalid port: {value}")]
    InvalidPort { value: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for easypack operations.
pub type Result<T> = std::result::Result<T, EasypackError>;
