pub mod appointments;
pub mod doctors;
pub mod health;
pub mod patients;
pub mod stats;

use serde::{Deserialize, Serialize};

fn default_limit() -> u32 {
    10
}

/// `skip`/`limit` query parameters for list endpoints, defaulting to 0/10.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Confirmation body for delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
