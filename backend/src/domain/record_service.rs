//! Loading and searching captured records.
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::models::{Record, RecordPage};
use crate::domain::search::{page_count, SearchQuery, PAGE_SIZE};
use crate::error::RecordError;
use crate::storage::{EncodedRecord, RecordStorage};

#[derive(Clone)]
pub struct RecordService {
    storage: Arc<dyn RecordStorage>,
}

impl RecordService {
    pub fn new(storage: Arc<dyn RecordStorage>) -> Self {
        Self { storage }
    }

    /// Fetch one record and decode both payloads. Nothing is cached; every
    /// call goes back to the store.
    pub async fn load_record(&self, uuid: &str) -> Result<Record, RecordError> {
        let encoded = self
            .storage
            .find_record(uuid)
            .await?
            .ok_or_else(|| RecordError::NotFound(uuid.to_string()))?;

        decode_record(encoded)
    }

    /// Serve one page of records matching any of the query terms
    pub async fn list_records(&self, query: &SearchQuery) -> Result<RecordPage, RecordError> {
        info!(
            "Listing records: terms={:?} page={}",
            query.terms, query.page
        );

        let records = self
            .storage
            .list_records(&query.terms, PAGE_SIZE, query.offset())
            .await?;
        let total = self.storage.count_records(&query.terms).await?;

        debug!("Returning {} of {} matching records", records.len(), total);
        Ok(RecordPage {
            records,
            page: query.page,
            pages: page_count(total),
        })
    }
}

fn decode_record(encoded: EncodedRecord) -> Result<Record, RecordError> {
    let request_body = decode_hex("request_body", &encoded.request_body_hex)?;
    let body = decode_hex("body", &encoded.body_hex)?;

    Ok(Record {
        meta: encoded.meta,
        request_body,
        body,
    })
}

fn decode_hex(field: &'static str, encoded: &str) -> Result<Vec<u8>, RecordError> {
    hex::decode(encoded).map_err(|err| RecordError::corrupt(field, err))
}
