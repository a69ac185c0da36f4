//! HTTP route handlers for Vidgate.

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use vidpass_common::{RegistrationError, types::ErrorBody};

use crate::state::AppState;

mod health;
mod registration;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.registration.max_body_bytes;

    Router::new()
        // Health & Status
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))

        // Registration flow
        .route("/api/id-reg", post(registration::id_reg))
        .route("/api/photo-reg", post(registration::photo_reg))
        .route("/api/registration/{vid_number}", get(registration::status))

        // The browser capture client calls cross-origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit))

        // Add shared state
        .with_state(state)
}

/// Maps the shared error taxonomy onto HTTP responses: the taxonomy's
/// status code plus an `{"error": "<message>"}` body.
pub struct ApiError(RegistrationError);

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if !self.0.is_client_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
