//! HTTP API layer.
//!
//! Exposes the repository and statistics layers as JSON endpoints. The
//! router is composable — `app_router()` returns a `Router` that can be
//! mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::app_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
