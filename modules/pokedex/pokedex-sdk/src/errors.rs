//! Public error types for the `pokedex` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

use crate::models::PokemonId;

/// Errors that can be returned by the `PokedexClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PokedexError {
    /// Pokemon with the specified ID was not found.
    #[error("Pokemon not found: {id}")]
    NotFound { id: PokemonId },

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The backing store failed.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PokedexError {
    /// Create a `NotFound` error.
    #[must_use]
    pub fn not_found(id: PokemonId) -> Self {
        Self::NotFound { id }
    }

    /// Create a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
