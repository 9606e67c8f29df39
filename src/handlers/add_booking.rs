use crate::error::{ApiError, ErrorResponse};
use crate::models::AddBookingResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value as JsonValue;

/// POST /addBooking handler - Store a booking document
///
/// The body is persisted verbatim. No check against existing bookings is made.
#[utoipa::path(
    post,
    path = routes::ADD_BOOKING,
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Booking stored", body = AddBookingResponse),
        (status = 400, description = "Body is not a JSON object or is invalid JSON", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "booking"
)]
pub async fn add_booking_handler(
    State(state): State<AppState>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<AddBookingResponse>, ApiError> {
    let Json(body) = payload?;
    let JsonValue::Object(booking) = body else {
        return Err(ApiError::InvalidBooking);
    };

    let inserted = state.store.insert_booking(booking).await?;

    tracing::info!("Stored booking with id: {}", inserted.inserted_id);
    Ok(Json(AddBookingResponse {
        acknowledged: true,
        inserted_id: inserted.inserted_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use axum::{body::Body, http::Request, http::StatusCode, routing::post, Router};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn setup_test_app(store: Arc<MemoryStore>) -> Router {
        let state = AppState { store };

        Router::new()
            .route(routes::ADD_BOOKING, post(add_booking_handler))
            .with_state(state)
    }

    fn post_booking(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/addBooking")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_booking_success() {
        let store = Arc::new(MemoryStore::new());
        let app = setup_test_app(store.clone());

        let booking = json!({
            "studio": "A",
            "date": "2024-01-01",
            "time": "10:00",
            "customer": { "name": "Ada", "phone": "555-0100" },
            "hours": 2
        });

        let response = app
            .oneshot(post_booking(serde_json::to_string(&booking).unwrap()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let response_json: AddBookingResponse = serde_json::from_slice(&body).unwrap();
        assert!(response_json.acknowledged);
        assert_eq!(response_json.inserted_id.as_str().map(str::len), Some(24));

        let stored = store.bookings();
        assert_eq!(stored.len(), 1);
        let mut expected = booking.as_object().unwrap().clone();
        expected.insert("_id".to_string(), response_json.inserted_id);
        assert_eq!(stored[0], expected);
    }

    #[tokio::test]
    async fn test_add_booking_keeps_caller_id() {
        let app = setup_test_app(Arc::new(MemoryStore::new()));

        let response = app
            .oneshot(post_booking(r#"{"_id": "booking-7", "studio": "A"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let response_json: JsonValue = serde_json::from_slice(&body).unwrap();
        assert_eq!(response_json, json!({ "acknowledged": true, "insertedId": "booking-7" }));
    }

    #[tokio::test]
    async fn test_add_booking_does_not_check_slot() {
        let store = Arc::new(MemoryStore::new());
        let app = setup_test_app(store.clone());
        let booking = r#"{"studio": "A", "date": "2024-01-01", "time": "10:00"}"#;

        for _ in 0..2 {
            let response = app.clone().oneshot(post_booking(booking)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(store.bookings().len(), 2);
    }

    #[tokio::test]
    async fn test_add_booking_rejects_non_object() {
        let store = Arc::new(MemoryStore::new());
        let app = setup_test_app(store.clone());

        for body in [r#"[1, 2, 3]"#, r#""studio A""#, "42"] {
            let response = app.clone().oneshot(post_booking(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let error_response: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(error_response.message, "Booking must be a JSON object");
        }

        assert!(store.bookings().is_empty());
    }

    #[tokio::test]
    async fn test_add_booking_invalid_json() {
        let app = setup_test_app(Arc::new(MemoryStore::new()));

        let response = app.oneshot(post_booking("{invalid json}")).await.unwrap();

        // Axum's Json extractor returns 400 for invalid JSON
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_booking_missing_content_type() {
        let app = setup_test_app(Arc::new(MemoryStore::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/addBooking")
                    .body(Body::from(r#"{"studio": "A"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error_response.message.contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_add_booking_store_error() {
        let app = setup_test_app(Arc::new(MemoryStore::unavailable()));

        let response = app
            .oneshot(post_booking(r#"{"studio": "A"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error_response.message, "Server error");
    }
}
