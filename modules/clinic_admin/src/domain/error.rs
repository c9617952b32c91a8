use thiserror::Error;

use crate::domain::ports::RemoteError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Remote service error: {0}")]
    Remote(#[from] RemoteError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::not_found("User", id)
    }

    pub fn examination_not_found(id: impl Into<String>) -> Self {
        Self::not_found("Examination", id)
    }

    pub fn assignment_not_found(staff_id: &str, patient_id: &str) -> Self {
        Self::not_found("Assignment", format!("{}/{}", staff_id, patient_id))
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
