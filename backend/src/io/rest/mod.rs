//! # REST API Interface Layer
//!
//! HTTP endpoints of the capture inspector. This layer handles:
//! - Query parameter extraction
//! - Error translation from domain to HTTP status codes
//! - JSON and raw byte responses, including conditional and ranged downloads
//! - Request logging
//!
//! Handlers hold no business logic; they call [`crate::domain::RecordService`]
//! and translate the result.

pub mod content_apis;
pub mod download;
pub mod record_apis;
pub mod responses;

use axum::Router;

use crate::AppState;

/// All inspector routes, mounted at the root
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(record_apis::router())
        .merge(content_apis::router())
}
