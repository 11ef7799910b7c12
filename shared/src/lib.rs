use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header name to ordered values, as captured on the wire.
///
/// A name may repeat with several values; the order of values under one name
/// is preserved. Names iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderCollection(BTreeMap<String, Vec<String>>);

impl HeaderCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`, after any values already stored there
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.entry(name.into()).or_default().push(value.into());
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, Vec<String>)> for HeaderCollection {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Metadata of one captured request/response exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Opaque unique identifier assigned by the capture engine
    pub uuid: String,
    /// Address of the client that issued the request
    pub origin: String,
    pub method: String,
    /// Response status code
    pub status: i64,
    /// Response content type
    pub content_type: String,
    /// Response content length as reported by the upstream
    pub content_length: i64,
    pub host: String,
    pub url: String,
    pub path: String,
    pub scheme: String,
    /// When the request was received (RFC 3339)
    pub date_start: DateTime<Utc>,
    /// When the response was completed (RFC 3339)
    pub date_end: DateTime<Utc>,
    /// Elapsed time in nanoseconds
    pub time_taken: i64,
    /// Response headers
    pub header: HeaderCollection,
    /// Request headers
    pub request_header: HeaderCollection,
}

/// One page of the capture history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordListResponse {
    pub requests: Vec<RecordMeta>,
    /// Total number of pages for the current filter
    pub pages: u32,
    /// 1-based page number that was served
    pub page: u32,
}
