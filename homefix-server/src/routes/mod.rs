//! HTTP route handlers.

pub mod contact;
pub mod health;
pub mod waitlist;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::intake::IntakeService;

pub use contact::submit_contact;
pub use health::{health, ready};
pub use waitlist::{join_waitlist, waitlist_count};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub intake: IntakeService,
}

/// Build the full router with middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Intake
        .route("/api/waitlist", post(join_waitlist))
        .route("/api/waitlist/count", get(waitlist_count))
        .route("/api/contact", post(submit_contact))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}
