//! Request logging middleware
//!
//! Emits one `HTTP_REQUEST` line per request and tags the response with an
//! `x-request-id` header carrying the same id.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::observability::{Logger, Severity};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Severity and event name for a finished request.
///
/// 501 marks the SOAP/gRPC placeholders, not a server fault.
fn request_event(status: StatusCode) -> (Severity, &'static str) {
    if status == StatusCode::NOT_IMPLEMENTED {
        (Severity::Warn, "NOT_IMPLEMENTED")
    } else if status.is_server_error() {
        (Severity::Error, "HTTP_REQUEST")
    } else {
        (Severity::Info, "HTTP_REQUEST")
    }
}

pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let status = response.status();
    let status_str = status.as_u16().to_string();
    let duration_ms = started.elapsed().as_millis().to_string();
    let fields = [
        ("duration_ms", duration_ms.as_str()),
        ("method", method.as_str()),
        ("path", path.as_str()),
        ("request_id", request_id.as_str()),
        ("status", status_str.as_str()),
    ];
    match request_event(status) {
        (Severity::Error, event) => Logger::error(event, &fields),
        (Severity::Warn, event) => Logger::warn(event, &fields),
        (_, event) => Logger::info(event, &fields),
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
