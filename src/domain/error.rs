use serde::Serialize;
use utoipa::ToSchema;

/// A single rejected field of a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid fields: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),
}

impl DomainError {
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            DomainError::Validation(v) => v,
        }
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}
