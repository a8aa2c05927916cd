//! Contract error types for the marketplace service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use thiserror::Error;

/// Marketplace domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketplaceError {
    /// No session, or the session could not be verified
    #[error("Authentication required")]
    Unauthorized,

    /// Caller is authenticated but does not own the resource
    #[error("Access to {resource} {id} is forbidden")]
    Forbidden {
        /// Resource type (photo, storefront, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// Record missing, or hidden from the caller
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// Missing or malformed input
    #[error("Validation error: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },

    /// Persistence or external provider failure
    #[error("Internal error")]
    Internal,
}

impl MarketplaceError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn forbidden(resource: &str, id: impl ToString) -> Self {
        Self::Forbidden {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
