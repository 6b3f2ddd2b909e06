pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API — one route per user action, plus the state view
        .route("/api/v1/interviews", post(handlers::handle_start))
        .route(
            "/api/v1/interviews/:id",
            get(handlers::handle_get).delete(handlers::handle_restart),
        )
        .route(
            "/api/v1/interviews/:id/recording",
            post(handlers::handle_record),
        )
        .route(
            "/api/v1/interviews/:id/submission",
            post(handlers::handle_submit),
        )
        .route(
            "/api/v1/interviews/:id/advance",
            post(handlers::handle_advance),
        )
        .with_state(state)
}
