use crate::api::rest::problem::{
    Problem, ValidationViolation, bad_request, internal_error, not_found,
};
use crate::domain::error::DomainError;

/// Map a domain error to an RFC 9457 Problem.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let problem = match e {
        DomainError::PokemonNotFound { id } => {
            not_found(format!("Pokemon with id {id} was not found"))
        }
        DomainError::Validation { violations } => bad_request(e.to_string()).with_errors(
            violations
                .iter()
                .map(|v| ValidationViolation {
                    field: v.field.clone(),
                    message: v.message.clone(),
                })
                .collect(),
        ),
        DomainError::Database { message } => {
            tracing::error!(error = %message, "Database error occurred");
            internal_error(message.clone())
        }
    };
    problem.with_instance(instance)
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "")
    }
}
