//! # Capture Inspector Backend
//!
//! Read-only HTTP inspection of a capture database populated by an
//! intercepting proxy.
//!
//! This crate brings together:
//! - **Domain**: record loading, search and payload reconstruction
//! - **Storage**: SQLite access to the `records` table
//! - **IO**: the REST interface
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, rendering)
//!     ↓
//! Storage Layer (SQLite)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize the application state from a [`config::Config`]
//! - Build the router with request tracing
//! - Keep the server strictly read-only toward the store

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::domain::RecordService;
use crate::storage::{DbConnection, RecordRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub record_service: RecordService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model");
    let repository = RecordRepository::new(db_conn);
    let record_service = RecordService::new(Arc::new(repository));

    Ok(AppState { record_service })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    io::router()
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
