use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Body returned by `/check` when nothing is booked for the slot.
pub const SLOT_AVAILABLE: &str = "true";
/// Body returned by `/check` when the slot already has a booking.
pub const SLOT_TAKEN: &str = "false";

/// A bookable unit: the (studio, date, time) triple.
///
/// Components keep whatever JSON value the caller sent so the lookup matches
/// documents stored verbatim by `/addBooking`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Slot {
    pub studio: JsonValue,
    pub date: JsonValue,
    pub time: JsonValue,
}

impl Slot {
    /// Extracts a slot from a `/check` body.
    ///
    /// Returns `None` when any of the three fields is missing or falsy
    /// (`null`, `false`, `0`, `""`). A body that is not an object has no fields.
    pub fn from_body(body: &JsonValue) -> Option<Self> {
        let field = |name: &str| body.get(name).filter(|value| is_truthy(value)).cloned();

        Some(Slot {
            studio: field("studio")?,
            date: field("date")?,
            time: field("time")?,
        })
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// Response type for successful `/addBooking` operations
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddBookingResponse {
    pub acknowledged: bool,
    /// Hex string for a generated ObjectId, otherwise the caller's `_id`.
    pub inserted_id: JsonValue,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}
