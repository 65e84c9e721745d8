pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{routing::{get, post}, Router};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use handlers::ApiDoc;

pub fn router(pool: PgPool) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/api/room", post(handlers::create_room))
        .route("/api/temperature", post(handlers::add_temperature))
        .route("/api/average", get(handlers::get_global_average))
        .with_state(pool)
        .split_for_parts();

    router
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
}
