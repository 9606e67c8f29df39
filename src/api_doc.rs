use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{AddBookingResponse, HealthResponse, Slot, UnhealthyResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "studio-booking API",
        version = "1.0.0",
        description = "Check and record studio booking slots backed by MongoDB"
    ),
    paths(
        handlers::root::root_handler,
        handlers::check::check_handler,
        handlers::add_booking::add_booking_handler,
        handlers::health::health_handler
    ),
    components(
        schemas(
            Slot,
            AddBookingResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "booking", description = "Slot availability and booking operations")
    )
)]
pub struct ApiDoc;
