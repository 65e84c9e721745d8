use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use sqlx::PgPool;
use tracing::info;
use utoipa::OpenApi;

use super::{
    dto::{
        AddTemperatureRequest, CreateRoomRequest, CreateRoomResponse, GlobalAverageDto,
        MessageResponse,
    },
    errors::AppError,
};
use crate::db::repository;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Create a room and return its generated id.
#[utoipa::path(
    post,
    path = "/api/room",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = CreateRoomResponse),
        (status = 500, description = "Missing field or database error"),
    ),
    tag = "rooms"
)]
pub async fn create_room(
    State(pool): State<PgPool>,
    payload: Result<Json<CreateRoomRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), AppError> {
    let Json(req) = payload?;

    let mut tx = pool.begin().await?;
    repository::create_rooms_table(&mut tx).await?;
    let room = repository::insert_room(&mut tx, &req.name).await?;
    tx.commit().await?;

    info!(room_id = room.id, name = %room.name, "Room created");

    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse {
            id: room.id,
            message: format!("Room {} created.", room.name),
        }),
    ))
}

/// Record a temperature reading for an existing room. Without `date` the
/// reading is stamped with the current UTC time.
#[utoipa::path(
    post,
    path = "/api/temperature",
    request_body = AddTemperatureRequest,
    responses(
        (status = 201, description = "Reading stored", body = MessageResponse),
        (status = 500, description = "Missing field, malformed date, unknown room or database error"),
    ),
    tag = "temperatures"
)]
pub async fn add_temperature(
    State(pool): State<PgPool>,
    payload: Result<Json<AddTemperatureRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(req) = payload?;
    let temperature = req.temperature.clone();
    let reading = req.into_reading()?;

    let mut tx = pool.begin().await?;
    repository::create_temperatures_table(&mut tx).await?;
    repository::insert_temperature(&mut tx, &reading).await?;
    tx.commit().await?;

    info!(room_id = reading.room_id, temperature = %temperature, date = %reading.date, "Temperature recorded");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!(
                "Temperature {temperature} added to room {}.",
                reading.room_id
            ),
        }),
    ))
}

/// Mean temperature over every reading and the number of distinct days seen.
#[utoipa::path(
    get,
    path = "/api/average",
    responses(
        (status = 200, description = "Global average", body = GlobalAverageDto),
        (status = 500, description = "Internal server error"),
    ),
    tag = "temperatures"
)]
pub async fn get_global_average(
    State(pool): State<PgPool>,
) -> Result<Json<GlobalAverageDto>, AppError> {
    let mut tx = pool.begin().await?;
    repository::create_temperatures_table(&mut tx).await?;
    let avg = repository::global_average(&mut tx).await?;
    tx.commit().await?;

    Ok(Json(avg.into()))
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain"),
    ),
    tag = "system"
)]
pub async fn home() -> &'static str {
    "Hello, world!!"
}

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(create_room, add_temperature, get_global_average, home, health),
    components(schemas(
        CreateRoomRequest,
        CreateRoomResponse,
        AddTemperatureRequest,
        MessageResponse,
        GlobalAverageDto
    )),
    tags(
        (name = "rooms",        description = "Room endpoints"),
        (name = "temperatures", description = "Temperature reading endpoints"),
        (name = "system",       description = "System endpoints"),
    ),
    info(
        title = "Room Temperature API",
        version = "0.1.0",
        description = "REST API for recording room temperatures"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
