//! services/client/src/error.rs
//!
//! Defines the primary error type for the client service.

use crate::config::ConfigError;
use schemes_connect_core::{
    AuthError, CompareError, ForumError, PortError, ProfileValidationError,
};

/// The primary error type for the `client` service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// The saved profile cannot be used for a recommendation request.
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileValidationError),

    #[error("No saved profile. Run `schemes-connect profile save` first.")]
    NoProfile,

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Community error: {0}")]
    Forum(#[from] ForumError),

    /// Represents a standard Input/Output error (e.g., writing to the terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
