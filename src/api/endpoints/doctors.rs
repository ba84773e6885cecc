//! Doctor CRUD endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::endpoints::{DeleteResponse, Pagination};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{Doctor, NewDoctor};

/// `POST /doctors/` — create a doctor.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<NewDoctor>,
) -> Result<(StatusCode, Json<Doctor>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let conn = ctx.open_db()?;
    let doctor = repository::insert_doctor(&conn, &payload)?;
    tracing::info!(id = doctor.id, "doctor created");

    Ok((StatusCode::CREATED, Json(doctor)))
}

/// `GET /doctors/` — list doctors with `skip`/`limit`.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let conn = ctx.open_db()?;
    let doctors = repository::list_doctors(&conn, page.skip, page.limit)?;
    Ok(Json(doctors))
}

/// `GET /doctors/:id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Doctor>, ApiError> {
    let conn = ctx.open_db()?;
    let doctor = repository::get_doctor(&conn, id)?;
    Ok(Json(doctor))
}

/// `PUT /doctors/:id` — full-field replace.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(payload): Json<NewDoctor>,
) -> Result<Json<Doctor>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let conn = ctx.open_db()?;
    let doctor = repository::update_doctor(&conn, id, &payload)?;
    tracing::info!(id, "doctor updated");

    Ok(Json(doctor))
}

/// `DELETE /doctors/:id` — restricted while appointments reference the row.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let conn = ctx.open_db()?;
    repository::delete_doctor(&conn, id)?;
    tracing::info!(id, "doctor deleted");

    Ok(Json(DeleteResponse {
        message: "Doctor deleted successfully".into(),
    }))
}
