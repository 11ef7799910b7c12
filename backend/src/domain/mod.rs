//! # Domain Module
//!
//! The read side of the capture inspector: everything between the store and
//! the HTTP layer.
//!
//! ## Module Organization
//!
//! - **record_service**: loads single records (decoding their hex payloads)
//!   and serves paged search results
//! - **search**: query sanitizing, term splitting and page arithmetic
//! - **content**: rebuilds request/response payloads, optionally with a
//!   wire-format header block
//! - **filename**: safe download names derived from a record's URL
//!
//! ## Rules
//!
//! - Records are never created or modified here
//! - A search matches a record when any term matches any searchable field
//! - A payload that fails to decode fails the whole load

pub mod content;
pub mod filename;
pub mod models;
pub mod record_service;
pub mod search;

pub use content::{ContentMode, Part, Presentation, RenderedContent, WriteOptions};
pub use models::{Record, RecordPage};
pub use record_service::RecordService;
pub use search::{SearchQuery, PAGE_SIZE};
