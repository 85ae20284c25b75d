//! Unified error types for the validator façade.

use thiserror::Error;

/// Unified error type for the validator façade.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Processing collaborator error.
    #[error("processing error: {0}")]
    Processing(#[from] ProcessingError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the processing collaborator.
///
/// The HTTP layer does not discriminate between these: every variant is
/// reported as a server error with its message stringified, matching the
/// single uniform failure class the collaborator contract allows for.
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// The routine ran and reported a failure.
    #[error("{0}")]
    Failed(String),

    /// The configured processor command could not be started.
    #[error("failed to spawn processor {command}: {reason}")]
    Spawn {
        /// Command that failed to start.
        command: String,
        /// Reason for failure.
        reason: String,
    },

    /// The routine produced output that is not valid JSON.
    #[error("processor produced invalid output: {0}")]
    InvalidOutput(String),

    /// No processor command is configured.
    #[error("no processor command configured")]
    NotConfigured,
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
