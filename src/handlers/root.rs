use crate::routes;

pub const GREETING: &str = "Hello to the server of studio";

/// GET / handler - Plaintext greeting
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    ),
    tag = "health"
)]
pub async fn root_handler() -> &'static str {
    GREETING
}
