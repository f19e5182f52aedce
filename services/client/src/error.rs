//! services/client/src/error.rs
//!
//! Defines the primary error type for the client service.

use crate::config::ConfigError;
use tracker_core::lifecycle::LifecycleError;
use tracker_core::ports::{PortError, TokenError};

/// The primary error type for the `client` service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Input rejected before anything was sent.
    #[error("{0}")]
    Invalid(String),

    /// An action attempted on a session that does not allow it.
    #[error("{0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Authentication error: {0}")]
    Token(#[from] TokenError),

    /// Represents an error from the underlying HTTP library.
    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected a request; carries the message shown to the user.
    #[error("{0}")]
    Rejected(String),

    /// The backend applied the change, but the view could not be reloaded.
    #[error("Saved, but reloading failed: {0}")]
    Stale(String),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
