//! API layer
//!
//! HTTP handlers for:
//! - Newspaper generation
//! - Saved newspapers and the sample newspaper
//! - Settings
//! - Metrics (Prometheus)

mod dto;
mod generate;
pub mod metrics;
mod newspapers;
mod settings;

pub use dto::*;

pub use metrics::metrics_router;

use axum::Router;
use axum::routing::{get, post};

use crate::AppState;

/// Router for everything under `/api`
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate::generate_newspaper))
        .route("/sample", get(newspapers::sample_newspaper))
        .route(
            "/newspapers",
            get(newspapers::list_newspapers).post(newspapers::save_newspaper),
        )
        .route(
            "/newspapers/:id",
            get(newspapers::get_newspaper).delete(newspapers::delete_newspaper),
        )
        .route(
            "/settings/:key",
            get(settings::get_setting).put(settings::put_setting),
        )
        .with_state(state)
}
