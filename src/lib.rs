pub mod app;
pub mod client;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::AnimeService;
pub use client::AnimeClient;
pub use domain::{Anime, AnimePostRequestBody, AnimePutRequestBody};
pub use infra::AppConfig;
pub use storage::{AnimeRepository, InMemoryAnimeRepository, PgAnimeRepository};
