//! Persistence for anime records.

pub mod memory;
pub mod page;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryAnimeRepository;
pub use page::{Page, PageRequest, Sort, SortDirection, SortProperty};
pub use postgres::PgAnimeRepository;
pub use repository::{AnimeRepository, RepositoryError, RepositoryResult};
