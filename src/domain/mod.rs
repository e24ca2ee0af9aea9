//! Domain types for the anime resource.

pub mod anime;
pub mod error;

pub use anime::{Anime, AnimePostRequestBody, AnimePutRequestBody, NewAnime};
pub use error::{DomainError, FieldViolation};
