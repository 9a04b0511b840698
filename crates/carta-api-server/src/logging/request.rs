//! Per-request access log: method, path, status, duration.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_millis();
    info!(
        "{} {} -> {} ({}ms)",
        method,
        path,
        response.status().as_u16(),
        elapsed_ms
    );

    response
}
