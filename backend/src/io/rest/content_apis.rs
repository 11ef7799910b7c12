//! # REST API for Record Payloads
//!
//! Each side of an exchange is served three ways: the bare body as a
//! download, headers in wire format followed by the body as a download, and
//! the bare body inline as plain text.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::domain::content::render;
use crate::domain::{ContentMode, Part, Presentation};
use crate::io::rest::download::serve_attachment;
use crate::io::rest::responses::reply_error;
use crate::AppState;

/// Create a router for the six payload views
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/records/:uuid/request", get(request_content))
        .route("/records/:uuid/request/raw", get(request_wire))
        .route("/records/:uuid/request/embed", get(request_embed))
        .route("/records/:uuid/response", get(response_content))
        .route("/records/:uuid/response/raw", get(response_wire))
        .route("/records/:uuid/response/embed", get(response_embed))
}

pub async fn request_content(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    headers: HeaderMap,
) -> Response {
    serve_content(&state, &uuid, &headers, ContentMode::content(Part::Request)).await
}

pub async fn request_wire(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    headers: HeaderMap,
) -> Response {
    serve_content(&state, &uuid, &headers, ContentMode::wire(Part::Request)).await
}

pub async fn request_embed(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    headers: HeaderMap,
) -> Response {
    serve_content(&state, &uuid, &headers, ContentMode::embed(Part::Request)).await
}

pub async fn response_content(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    headers: HeaderMap,
) -> Response {
    serve_content(&state, &uuid, &headers, ContentMode::content(Part::Response)).await
}

pub async fn response_wire(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    headers: HeaderMap,
) -> Response {
    serve_content(&state, &uuid, &headers, ContentMode::wire(Part::Response)).await
}

pub async fn response_embed(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    headers: HeaderMap,
) -> Response {
    serve_content(&state, &uuid, &headers, ContentMode::embed(Part::Response)).await
}

/// Load the record, render it for `mode` and hand it to the client
async fn serve_content(
    state: &AppState,
    uuid: &str,
    request_headers: &HeaderMap,
    mode: ContentMode,
) -> Response {
    info!("GET /records/{} - mode: {:?}", uuid, mode);

    let rendered = match state.record_service.load_record(uuid).await {
        Ok(record) => render(&record, mode),
        Err(e) => Err(e),
    };

    match rendered {
        Ok(content) => match content.presentation {
            Presentation::Inline { content_type } => {
                ([(header::CONTENT_TYPE, content_type)], content.bytes).into_response()
            }
            Presentation::Attachment {
                filename,
                last_modified,
            } => serve_attachment(request_headers, content.bytes, &filename, last_modified),
        },
        Err(e) => {
            error!("Failed to serve content for {}: {}", uuid, e);
            reply_error(&e)
        }
    }
}
