use crate::domain::{Anime, AnimePostRequestBody, AnimePutRequestBody};
use crate::storage::page::AnimePage;
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, ExceptionDetails, FindByNameParams, PageParams};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/animes",
    params(PageParams),
    responses(
        (status = 200, description = "One page of anime", body = AnimePage),
        (status = 400, description = "Invalid paging or sort parameters", body = ExceptionDetails)
    )
)]
pub async fn list_handler(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<AnimePage>, ApiError> {
    let Query(params) = params?;
    let request = params
        .to_page_request(state.default_page_size)
        .map_err(ApiError::InvalidRequest)?;
    let page = state.anime_service.list_all(request).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/animes/all",
    responses(
        (status = 200, description = "Every stored anime", body = [Anime])
    )
)]
pub async fn list_all_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Anime>>, ApiError> {
    Ok(Json(state.anime_service.list_all_non_pageable().await?))
}

#[utoipa::path(
    get,
    path = "/animes/{id}",
    params(("id" = i64, Path, description = "Anime id")),
    responses(
        (status = 200, description = "The anime", body = Anime),
        (status = 400, description = "Anime not found", body = ExceptionDetails)
    )
)]
pub async fn find_by_id_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Anime>, ApiError> {
    let Path(id) = id?;
    Ok(Json(
        state.anime_service.find_by_id_or_throw_bad_request(id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/animes/find",
    params(FindByNameParams),
    responses(
        (status = 200, description = "Anime with exactly this name (possibly none)", body = [Anime]),
        (status = 400, description = "Missing name parameter", body = ExceptionDetails)
    )
)]
pub async fn find_by_name_handler(
    State(state): State<AppState>,
    params: Result<Query<FindByNameParams>, QueryRejection>,
) -> Result<Json<Vec<Anime>>, ApiError> {
    let Query(params) = params?;
    debug!(name = %params.name, "find by name");
    Ok(Json(state.anime_service.find_by_name(&params.name).await?))
}

#[utoipa::path(
    post,
    path = "/animes",
    request_body = AnimePostRequestBody,
    responses(
        (status = 201, description = "Anime created", body = Anime),
        (status = 400, description = "Invalid fields", body = ExceptionDetails),
        (status = 422, description = "Malformed JSON body", body = ExceptionDetails)
    )
)]
pub async fn save_handler(
    State(state): State<AppState>,
    body: Result<Json<AnimePostRequestBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Anime>), ApiError> {
    let Json(body) = body?;
    let saved = state.anime_service.save(body).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

#[utoipa::path(
    put,
    path = "/animes",
    request_body = AnimePutRequestBody,
    responses(
        (status = 204, description = "Anime replaced"),
        (status = 400, description = "Anime not found or invalid fields", body = ExceptionDetails),
        (status = 422, description = "Malformed JSON body", body = ExceptionDetails)
    )
)]
pub async fn replace_handler(
    State(state): State<AppState>,
    body: Result<Json<AnimePutRequestBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body?;
    state.anime_service.replace(body).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/animes/{id}",
    params(("id" = i64, Path, description = "Anime id")),
    responses(
        (status = 204, description = "Anime deleted"),
        (status = 400, description = "Anime not found", body = ExceptionDetails)
    )
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.anime_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AnimeService;
    use crate::storage::page::Page;
    use crate::storage::repository::MockAnimeRepository;
    use std::sync::Arc;

    fn valid_anime() -> Anime {
        Anime::new(1, "Hajime no Ippo")
    }

    fn state_with(mock: MockAnimeRepository) -> AppState {
        AppState::new(AnimeService::new(Arc::new(mock)), 20)
    }

    fn happy_state() -> AppState {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_all_paged()
            .returning(|req| Ok(Page::new(vec![valid_anime()], &req, 1)));
        mock.expect_find_all().returning(|| Ok(vec![valid_anime()]));
        mock.expect_find_by_id()
            .returning(|_| Ok(Some(valid_anime())));
        mock.expect_find_by_name()
            .returning(|_| Ok(vec![valid_anime()]));
        mock.expect_save().returning(|_| Ok(valid_anime()));
        mock.expect_update().returning(Ok);
        mock.expect_delete().returning(|_| Ok(()));
        state_with(mock)
    }

    #[tokio::test]
    async fn list_returns_page_of_anime() {
        let Json(page) = list_handler(State(happy_state()), Ok(Query(PageParams::default())))
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].name, valid_anime().name);
        assert_eq!(page.size, 20);
    }

    #[tokio::test]
    async fn list_rejects_unknown_sort_property() {
        let params = PageParams {
            sort: Some("rating,desc".to_string()),
            ..Default::default()
        };
        let err = list_handler(State(happy_state()), Ok(Query(params)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn list_all_returns_every_anime() {
        let Json(animes) = list_all_handler(State(happy_state())).await.unwrap();
        assert_eq!(animes, vec![valid_anime()]);
    }

    #[tokio::test]
    async fn find_by_id_returns_anime() {
        let Json(anime) = find_by_id_handler(State(happy_state()), Ok(Path(1)))
            .await
            .unwrap();
        assert_eq!(anime.id, valid_anime().id);
    }

    #[tokio::test]
    async fn find_by_id_missing_is_bad_request() {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));
        let err = find_by_id_handler(State(state_with(mock)), Ok(Path(99)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn find_by_name_returns_matches() {
        let params = FindByNameParams {
            name: "anime".to_string(),
        };
        let Json(animes) = find_by_name_handler(State(happy_state()), Ok(Query(params)))
            .await
            .unwrap();
        assert_eq!(animes[0].name, valid_anime().name);
    }

    #[tokio::test]
    async fn find_by_name_returns_empty_list_when_nothing_matches() {
        let mut mock = MockAnimeRepository::new();
        mock.expect_find_by_name().returning(|_| Ok(Vec::new()));
        let params = FindByNameParams {
            name: "some name".to_string(),
        };
        let Json(animes) = find_by_name_handler(State(state_with(mock)), Ok(Query(params)))
            .await
            .unwrap();
        assert!(animes.is_empty());
    }

    #[tokio::test]
    async fn save_returns_created_anime() {
        let body = AnimePostRequestBody::new("Hajime no Ippo");
        let (status, Json(saved)) = save_handler(State(happy_state()), Ok(Json(body)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved, valid_anime());
    }

    #[tokio::test]
    async fn save_with_empty_name_is_validation_error() {
        let body = AnimePostRequestBody::new("");
        let err = save_handler(State(happy_state()), Ok(Json(body)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref v) if v[0].field == "name"));
    }

    #[tokio::test]
    async fn replace_returns_no_content() {
        let body = AnimePutRequestBody::new(1, "Hajime no Ippo 2");
        let status = replace_handler(State(happy_state()), Ok(Json(body)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn delete_returns_no_content() {
        let status = delete_handler(State(happy_state()), Ok(Path(1)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
