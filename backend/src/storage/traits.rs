//! # Storage Traits
//!
//! The domain layer reads captures through [`RecordStorage`] so that the
//! SQLite repository can be swapped for an in-memory double in tests.

use async_trait::async_trait;
use shared::RecordMeta;

use crate::error::RecordError;

/// A record as read from the store, bodies still hex encoded
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRecord {
    pub meta: RecordMeta,
    /// `hex(request_body)` as returned by the store
    pub request_body_hex: String,
    /// `hex(body)` as returned by the store
    pub body_hex: String,
}

/// Read-only access to captured records
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Fetch one record by its identifier
    async fn find_record(&self, uuid: &str) -> Result<Option<EncodedRecord>, RecordError>;

    /// Records matching any of `terms`, ordered by insertion.
    /// An empty term list matches everything.
    async fn list_records(
        &self,
        terms: &[String],
        limit: u32,
        offset: u64,
    ) -> Result<Vec<RecordMeta>, RecordError>;

    /// Number of records matching any of `terms`, ignoring paging
    async fn count_records(&self, terms: &[String]) -> Result<u64, RecordError>;
}
