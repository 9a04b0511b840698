//! Request body size guard.
//!
//! Checks the declared Content-Length before the body is read: an oversized
//! declaration answers 413, an unparsable one 400. Bodies streamed without
//! the header fall through to the router's `DefaultBodyLimit`.

use axum::{
    extract::Request,
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::Response,
};

use crate::utils::error::ApiError;

pub const MAX_BODY_BYTES: usize = 1024 * 1024; // 1 MiB

pub async fn limit_body_size(request: Request, next: Next) -> Result<Response, ApiError> {
    if let Some(value) = request.headers().get(CONTENT_LENGTH) {
        match value.to_str().ok().and_then(|v| v.parse::<usize>().ok()) {
            Some(length) if length > MAX_BODY_BYTES => return Err(ApiError::PayloadTooLarge),
            Some(_) => {}
            None => return Err(ApiError::InvalidContentLength),
        }
    }

    Ok(next.run(request).await)
}
