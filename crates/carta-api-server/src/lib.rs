//! HTTP backend that persists bar menu documents ("cartas") and serves the
//! most recently saved version per bar.
//!
//! Request flow: payload validation -> canonical JSON document -> append-only
//! insert; reads resolve the latest record for a bar id. The store is an
//! async trait so the router can be exercised against non-Postgres
//! implementations in tests.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Extension, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod config;
pub mod database;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod security;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test;

use database::MenuStore;
use security::body_limit::MAX_BODY_BYTES;
use services::MenuService;

pub fn build_router<S: MenuStore + 'static>(service: Arc<MenuService<S>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/menus/guardar", post(handlers::menus::guardar_menu_handler::<S>))
        .route("/menus/{barId}", get(handlers::menus::obtener_menu_handler::<S>))
        .layer(Extension(service))
        // Backstop for bodies streamed without a Content-Length header
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(security::body_limit::limit_body_size))
        .layer(CatchPanicLayer::custom(utils::error::handle_panic))
        .layer(middleware::from_fn(security::headers::security_headers))
        .layer(middleware::from_fn(logging::request::log_requests))
        .layer(TraceLayer::new_for_http())
}
