use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{add_booking_handler, check_handler, health_handler, root_handler};
use crate::state::AppState;

// Route path constants - single source of truth for all API paths

pub const ROOT: &str = "/";
pub const CHECK: &str = "/check";
pub const ADD_BOOKING: &str = "/addBooking";
pub const HEALTH: &str = "/health";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the service router with every route, CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ROOT, get(root_handler))
        .route(CHECK, post(check_handler))
        .route(ADD_BOOKING, post(add_booking_handler))
        .route(HEALTH, get(health_handler))
        .with_state(state)
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
