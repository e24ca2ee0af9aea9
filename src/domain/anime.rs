//! The `Anime` entity and the request bodies that create or replace it.

use crate::domain::error::{DomainError, FieldViolation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const EMPTY_NAME_MESSAGE: &str = "The anime name cannot be empty";

/// A stored anime. `id` is assigned by the repository on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Anime {
    pub id: i64,
    pub name: String,
}

impl Anime {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An anime that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnime {
    pub name: String,
}

/// Body of `POST /animes`. A missing or `null` name deserializes to `None`
/// and is rejected by `validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnimePostRequestBody {
    #[serde(default)]
    pub name: Option<String>,
}

impl AnimePostRequestBody {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(self.name.as_deref())
    }
}

/// Body of `PUT /animes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnimePutRequestBody {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

impl AnimePutRequestBody {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(self.name.as_deref())
    }
}

/// Only absent and zero-length names are violations; whitespace is kept as sent.
fn validate_name(name: Option<&str>) -> Result<(), DomainError> {
    if name.map_or(true, str::is_empty) {
        return Err(DomainError::Validation(vec![FieldViolation::new(
            "name",
            EMPTY_NAME_MESSAGE,
        )]));
    }
    Ok(())
}

impl From<AnimePostRequestBody> for NewAnime {
    fn from(body: AnimePostRequestBody) -> Self {
        NewAnime {
            name: body.name.unwrap_or_default(),
        }
    }
}

impl From<AnimePutRequestBody> for Anime {
    fn from(body: AnimePutRequestBody) -> Self {
        Anime {
            id: body.id,
            name: body.name.unwrap_or_default(),
        }
    }
}

/// A full anime can be sent back as a replace body (the client demo does this).
impl From<Anime> for AnimePutRequestBody {
    fn from(anime: Anime) -> Self {
        AnimePutRequestBody {
            id: anime.id,
            name: Some(anime.name),
        }
    }
}
