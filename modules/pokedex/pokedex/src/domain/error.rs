use pokedex_sdk::{PokedexError, PokemonId};
use thiserror::Error;

/// A single failed check on an incoming payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Pokemon not found: {id}")]
    PokemonNotFound { id: PokemonId },

    #[error("Validation failed: {}", summarize(.violations))]
    Validation { violations: Vec<Violation> },

    #[error("Database error: {message}")]
    Database { message: String },
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    pub fn pokemon_not_found(id: PokemonId) -> Self {
        Self::PokemonNotFound { id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            violations: vec![Violation::new(field, message)],
        }
    }

    pub fn invalid(violations: Vec<Violation>) -> Self {
        Self::Validation { violations }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for PokedexError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::PokemonNotFound { id } => PokedexError::not_found(id),
            DomainError::Validation { violations } => {
                PokedexError::validation(summarize(&violations))
            }
            DomainError::Database { message } => PokedexError::internal(message),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_violation() {
        let err = DomainError::invalid(vec![
            Violation::new("name.english", "is required"),
            Violation::new("base.HP", "is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: name.english: is required; base.HP: is required"
        );
    }

    #[test]
    fn maps_to_sdk_error() {
        let sdk: PokedexError = DomainError::pokemon_not_found(7).into();
        assert_eq!(sdk, PokedexError::not_found(7));

        let sdk: PokedexError = DomainError::database("disk full").into();
        assert_eq!(sdk, PokedexError::internal("disk full"));
    }
}
