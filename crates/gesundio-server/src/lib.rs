//! gesundio-server
//!
//! HTTP surface for the patient forms: form descriptors, intake,
//! registration and appointment submissions, patient lookup and the admin
//! appointment summary.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Largest registration body accepted, document included. Same as the
/// synchronous Lambda invocation payload limit.
pub const MAX_REGISTRATION_BODY: usize = 6 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/forms", get(routes::forms::list_forms))
        .route("/forms/{id}", get(routes::forms::get_form_descriptor))
        .route("/users", post(routes::users::create_user))
        .route("/patients/{user_id}", get(routes::patients::get_patient))
        .route(
            "/patients/{user_id}/register",
            post(routes::patients::register_patient)
                .layer(DefaultBodyLimit::max(MAX_REGISTRATION_BODY)),
        )
        .route(
            "/patients/{user_id}/appointments",
            post(routes::patients::request_appointment),
        )
        .route(
            "/admin/appointments",
            get(routes::admin::recent_appointments),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
