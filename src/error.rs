//! Error types for load-context configuration and resolution.

use thiserror::Error;

/// Errors that can occur while configuring a load context or resolving
/// runtime identifiers.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Unrecognized sharing policy value in configuration
    #[error("Unknown sharing policy: {0}")]
    UnknownSharingPolicy(String),

    /// Platform context failed to determine the current runtime identifier
    #[error("Runtime identifier provider failed: {0}")]
    RuntimeIdentifier(String),

    /// Platform context failed while reading the fallback graph
    #[error("Fallback graph source failed: {0}")]
    FallbackGraph(String),

    /// Malformed runtime graph document
    #[error("Invalid runtime graph: {0}")]
    InvalidGraph(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for load-context operations
pub type Result<T> = std::result::Result<T, ContextError>;
