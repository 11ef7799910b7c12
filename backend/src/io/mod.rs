//! # IO Module
//!
//! The adapter layer between HTTP clients and the domain logic.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: read-only REST endpoints over captured records
//! - **Error Translation**: domain errors become bare status responses
//! - **Downloads**: payloads offered as attachments honour `Range` and the
//!   `If-*` precondition headers
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum
//! - **Serialization**: Serde for JSON responses
//! - **State Management**: Axum `State` extractor carrying [`crate::AppState`]

pub mod rest;

pub use rest::router;
