pub mod anime_service;
pub mod error;

pub use anime_service::AnimeService;
pub use error::{ServiceError, ServiceResult};
