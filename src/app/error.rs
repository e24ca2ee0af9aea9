use crate::domain::DomainError;
use crate::storage::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A lookup missed. Surfaced to clients as 400, not 404.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn anime_not_found() -> Self {
        ServiceError::BadRequest("Anime not found".to_string())
    }
}
