//! Patient CRUD endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::endpoints::{DeleteResponse, Pagination};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{NewPatient, Patient};

/// `POST /patients/` — create a patient.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let conn = ctx.open_db()?;
    let patient = repository::insert_patient(&conn, &payload)?;
    tracing::info!(id = patient.id, "patient created");

    Ok((StatusCode::CREATED, Json(patient)))
}

/// `GET /patients/` — list patients with `skip`/`limit`.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let conn = ctx.open_db()?;
    let patients = repository::list_patients(&conn, page.skip, page.limit)?;
    Ok(Json(patients))
}

/// `GET /patients/:id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Patient>, ApiError> {
    let conn = ctx.open_db()?;
    let patient = repository::get_patient(&conn, id)?;
    Ok(Json(patient))
}

/// `PUT /patients/:id` — full-field replace.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(payload): Json<NewPatient>,
) -> Result<Json<Patient>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let conn = ctx.open_db()?;
    let patient = repository::update_patient(&conn, id, &payload)?;
    tracing::info!(id, "patient updated");

    Ok(Json(patient))
}

/// `DELETE /patients/:id` — restricted while appointments reference the row.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let conn = ctx.open_db()?;
    repository::delete_patient(&conn, id)?;
    tracing::info!(id, "patient deleted");

    Ok(Json(DeleteResponse {
        message: "Patient deleted successfully".into(),
    }))
}
