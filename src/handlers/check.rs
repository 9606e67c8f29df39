use crate::error::{ApiError, ErrorResponse};
use crate::models::{Slot, SLOT_AVAILABLE, SLOT_TAKEN};
use crate::routes;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde_json::Value as JsonValue;

/// POST /check handler - Report whether a slot is still free
///
/// Answers with the JSON string `"true"` when no booking matches the
/// studio, date and time exactly, `"false"` otherwise. The answer is advisory:
/// nothing reserves the slot between this call and `/addBooking`.
#[utoipa::path(
    post,
    path = routes::CHECK,
    request_body = Slot,
    responses(
        (status = 200, description = "\"true\" if the slot is free, \"false\" if it is booked", body = String),
        (status = 400, description = "Missing required fields or invalid JSON", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "booking"
)]
pub async fn check_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<&'static str>, ApiError> {
    let body = check_body(&headers, &body)?;
    let slot = Slot::from_body(&body).ok_or(ApiError::MissingFields)?;

    let taken = state.store.slot_taken(&slot).await?;

    tracing::info!(
        "Slot studio={} date={} time={} is {}",
        slot.studio,
        slot.date,
        slot.time,
        if taken { "taken" } else { "available" }
    );

    Ok(Json(if taken { SLOT_TAKEN } else { SLOT_AVAILABLE }))
}

/// Parses a check request body.
///
/// An empty body or one not sent as JSON carries no fields, so it reads as
/// `null` and fails the field check. A JSON body that does not parse is
/// rejected with the parser's message.
fn check_body(headers: &HeaderMap, body: &Bytes) -> Result<JsonValue, ApiError> {
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonValue::Null);
    }

    let Json(value) = Json::<JsonValue>::from_bytes(body)?;
    Ok(value)
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
