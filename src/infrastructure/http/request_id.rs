use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Identifier tying one synthesis request to all of its log output
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Tags every request with a fresh id. Handlers can read it from the
/// request extensions, the response echoes it in `x-request-id`, and the
/// whole request runs inside a span carrying it, so segmentation, chunk
/// progress and stitching logs for one document share the same id.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(request).instrument(span).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(X_REQUEST_ID, header_value);
    }

    response
}
