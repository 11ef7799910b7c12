use shared::{RecordListResponse, RecordMeta};

/// A captured exchange with its payloads decoded to raw bytes
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub meta: RecordMeta,
    pub request_body: Vec<u8>,
    /// Response body
    pub body: Vec<u8>,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
    pub records: Vec<RecordMeta>,
    pub page: u32,
    pub pages: u32,
}

impl From<RecordPage> for RecordListResponse {
    fn from(page: RecordPage) -> Self {
        RecordListResponse {
            requests: page.records,
            pages: page.pages,
            page: page.page,
        }
    }
}
