//! The data-access contract the service depends on.

use crate::domain::{Anime, NewAnime};
use crate::storage::page::{Page, PageRequest};
use async_trait::async_trait;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("No anime stored with id {0}")]
    Missing(i64),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Query methods over the `anime` table.
///
/// Implementations must be shareable across request tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimeRepository: Send + Sync {
    /// Every anime ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Anime>>;

    async fn find_all_paged(&self, request: PageRequest) -> RepositoryResult<Page<Anime>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Anime>>;

    /// Exact name match. Returns an empty vec when nothing matches.
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Anime>>;

    /// Inserts and returns the stored row with its generated id.
    async fn save(&self, anime: NewAnime) -> RepositoryResult<Anime>;

    /// Overwrites the name of an existing row. Fails with `Missing` if the id is unknown.
    async fn update(&self, anime: Anime) -> RepositoryResult<Anime>;

    /// Removing an unknown id is not an error.
    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    async fn ping(&self) -> RepositoryResult<()>;
}
