use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::FieldViolation;

/// Client-visible error taxonomy. NotFound is deliberately absent: a bar
/// without a stored menu is a well-formed 200 response, not an error.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("JSON inválido")]
    Validation(Vec<FieldViolation>),

    #[error("Body demasiado grande")]
    PayloadTooLarge,

    #[error("Content-Length inválido")]
    InvalidContentLength,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Single-detail validation error, used for structural rejections
    /// (malformed JSON body, bad barId query) that never reach the schema.
    pub fn validation_detail(campo: &str, mensaje: &str) -> Self {
        ApiError::Validation(vec![FieldViolation {
            campo: campo.to_string(),
            mensaje: mensaje.to_string(),
        }])
    }
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detalles: Option<Vec<FieldViolation>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, detalles) = match self {
            ApiError::Validation(detalles) => {
                tracing::warn!("Validation rejected payload: {} violation(s)", detalles.len());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "JSON inválido",
                    Some(detalles),
                )
            }
            ApiError::PayloadTooLarge => {
                tracing::warn!("Request body over size limit");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Body demasiado grande",
                    None,
                )
            }
            ApiError::InvalidContentLength => {
                tracing::warn!("Malformed Content-Length header");
                (StatusCode::BAD_REQUEST, "Content-Length inválido", None)
            }
            // Internal detail goes to the log only, never to the caller
            ApiError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error interno", None)
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error interno", None)
            }
        };

        let body = Json(ErrorBody {
            ok: false,
            error: error.to_string(),
            detalles,
        });

        (status, body).into_response()
    }
}

/// Outermost panic boundary: log the detail, answer with the generic 500
/// body so no stack trace or internal path ever reaches the caller.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("Panic while handling request: {}", detail);
    let body = Json(ErrorBody {
        ok: false,
        error: "Error interno".to_string(),
        detalles: None,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
