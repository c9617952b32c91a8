use thiserror::Error;

/// Errors that are safe to expose to callers of the contract traits.
///
/// Remote failures never show up here: they are absorbed by the fallback path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClinicError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl ClinicError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<crate::domain::error::DomainError> for ClinicError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            NotFound { entity, id } => Self::not_found(entity, id),
            Validation { field, message } => Self::validation(format!("{}: {}", field, message)),
            // Remote errors are meant to be absorbed before reaching the contract.
            Remote(_) => Self::internal(),
        }
    }
}
