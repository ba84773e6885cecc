//! Statistics endpoints.
//!
//! Each request takes a fresh point-in-time snapshot of the dataset and
//! computes in memory; nothing is cached between requests. A failure
//! aborts the whole computation — no partial results.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::stats::{appointments_by_month, basic_stats, BasicStats, Snapshot};

/// `GET /stats/basic` — entity counts, patient age summary, and the
/// doctor specialization frequency table.
pub async fn basic(State(ctx): State<ApiContext>) -> Result<Json<BasicStats>, ApiError> {
    let conn = ctx.open_db()?;
    let snapshot = Snapshot::load(&conn).map_err(ApiError::from)?;
    Ok(Json(basic_stats(&snapshot)))
}

#[derive(Serialize)]
pub struct MonthlyAppointmentsResponse {
    /// Calendar month (1–12) → appointment count, ascending.
    pub appointments_by_month: BTreeMap<u32, u64>,
}

/// `GET /stats/appointments/monthly` — appointment frequency by calendar
/// month of their date.
pub async fn monthly_appointments(
    State(ctx): State<ApiContext>,
) -> Result<Json<MonthlyAppointmentsResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let snapshot = Snapshot::load(&conn).map_err(ApiError::from)?;
    Ok(Json(MonthlyAppointmentsResponse {
        appointments_by_month: appointments_by_month(&snapshot),
    }))
}
