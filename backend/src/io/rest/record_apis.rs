//! # REST API for Record Browsing
//!
//! Paged search over captured records and single-record metadata.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::RecordListResponse;
use tracing::{error, info};

use crate::domain::SearchQuery;
use crate::io::rest::responses::{reply_error, reply_json};
use crate::AppState;

/// Raw query parameters; both are sanitized by [`SearchQuery::parse`]
#[derive(Debug, Default, Deserialize)]
pub struct RecordListQuery {
    pub q: Option<String>,
    pub page: Option<String>,
}

/// Create a router for record listing and metadata
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records))
        .route("/records/", get(list_records))
        .route("/records/:uuid", get(get_record_meta))
}

/// List one page of records matching the search terms
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<RecordListQuery>,
) -> Response {
    info!("GET /records - query: {:?}", params);

    let query = SearchQuery::parse(params.q.as_deref(), params.page.as_deref());
    match state.record_service.list_records(&query).await {
        Ok(page) => reply_json(&RecordListResponse::from(page)),
        Err(e) => {
            error!("Failed to list records: {}", e);
            reply_error(&e)
        }
    }
}

/// Metadata for a single record, without payloads
pub async fn get_record_meta(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Response {
    info!("GET /records/{}", uuid);

    match state.record_service.load_record(&uuid).await {
        Ok(record) => reply_json(&record.meta),
        Err(e) => {
            error!("Failed to load record {}: {}", uuid, e);
            reply_error(&e)
        }
    }
}
