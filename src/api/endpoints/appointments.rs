//! Appointment CRUD endpoints.
//!
//! Creation and update verify that the referenced patient and doctor
//! exist; a dangling reference is a 400, not a 500.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::endpoints::{DeleteResponse, Pagination};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{Appointment, NewAppointment};

/// `POST /appointments/` — create an appointment.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<NewAppointment>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let conn = ctx.open_db()?;
    let appointment = repository::insert_appointment(&conn, &payload)?;
    tracing::info!(id = appointment.id, "appointment created");

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// `GET /appointments/` — list appointments with `skip`/`limit`.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let conn = ctx.open_db()?;
    let appointments = repository::list_appointments(&conn, page.skip, page.limit)?;
    Ok(Json(appointments))
}

/// `GET /appointments/:id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, ApiError> {
    let conn = ctx.open_db()?;
    let appointment = repository::get_appointment(&conn, id)?;
    Ok(Json(appointment))
}

/// `PUT /appointments/:id` — full-field replace.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(payload): Json<NewAppointment>,
) -> Result<Json<Appointment>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let conn = ctx.open_db()?;
    let appointment = repository::update_appointment(&conn, id, &payload)?;
    tracing::info!(id, "appointment updated");

    Ok(Json(appointment))
}

/// `DELETE /appointments/:id`
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let conn = ctx.open_db()?;
    repository::delete_appointment(&conn, id)?;
    tracing::info!(id, "appointment deleted");

    Ok(Json(DeleteResponse {
        message: "Appointment deleted successfully".into(),
    }))
}
