use crate::domain::{Anime, AnimePostRequestBody, AnimePutRequestBody, FieldViolation};
use crate::storage::page::AnimePage;
use crate::transport::http::handlers::{anime, health};
use crate::transport::http::types::{ApiResponse, AppState, ExceptionDetails};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        anime::list_handler,
        anime::list_all_handler,
        anime::find_by_id_handler,
        anime::find_by_name_handler,
        anime::save_handler,
        anime::replace_handler,
        anime::delete_handler
    ),
    components(schemas(
        Anime,
        AnimePage,
        AnimePostRequestBody,
        AnimePutRequestBody,
        ExceptionDetails,
        FieldViolation,
        ApiResponse
    ))
)]
pub struct ApiDoc;

/// REST routes only. `/animes/` with a trailing slash is accepted for POST and PUT.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/animes",
            get(anime::list_handler)
                .post(anime::save_handler)
                .put(anime::replace_handler),
        )
        .route(
            "/animes/",
            post(anime::save_handler).put(anime::replace_handler),
        )
        .route("/animes/all", get(anime::list_all_handler))
        .route("/animes/find", get(anime::find_by_name_handler))
        .route(
            "/animes/:id",
            get(anime::find_by_id_handler).delete(anime::delete_handler),
        )
        .with_state(app_state)
}

/// Routes plus Swagger UI, CORS and request tracing. This is what the server binary serves.
pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_anime_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/animes", "/animes/all", "/animes/{id}", "/animes/find", "/health"] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {} in {:?}",
                expected,
                paths
            );
        }
    }
}
