//! Helpers for seeding the records table in tests. The server itself never
//! writes to the store.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::storage::connection::DbConnection;

/// A row to insert into `records`, with defaults for every column
#[derive(Debug, Clone)]
pub struct RecordFixture {
    pub uuid: String,
    pub origin: String,
    pub method: String,
    pub status: i64,
    pub content_type: String,
    pub host: String,
    pub url: String,
    pub path: String,
    pub scheme: String,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
    pub header: String,
    pub request_header: String,
    pub body: Vec<u8>,
    pub request_body: Vec<u8>,
}

impl RecordFixture {
    pub fn new(uuid: &str) -> Self {
        let date_start = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();
        Self {
            uuid: uuid.to_string(),
            origin: "127.0.0.1:5000".to_string(),
            method: "GET".to_string(),
            status: 200,
            content_type: "text/plain".to_string(),
            host: "capture.test".to_string(),
            url: "http://capture.test/".to_string(),
            path: "/".to_string(),
            scheme: "http".to_string(),
            date_start,
            date_end: date_start + Duration::milliseconds(250),
            header: r#"{"Content-Type":["text/plain"]}"#.to_string(),
            request_header: r#"{"Accept":["*/*"]}"#.to_string(),
            body: Vec::new(),
            request_body: Vec::new(),
        }
    }

    pub fn origin(mut self, origin: &str) -> Self {
        self.origin = origin.to_string();
        self
    }

    pub fn method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    pub fn status(mut self, status: i64) -> Self {
        self.status = status;
        self
    }

    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    pub fn raw_header(mut self, json: &str) -> Self {
        self.header = json.to_string();
        self
    }

    pub fn raw_request_header(mut self, json: &str) -> Self {
        self.request_header = json.to_string();
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn request_body(mut self, body: Vec<u8>) -> Self {
        self.request_body = body;
        self
    }
}

/// Insert a fixture row, panicking on failure
pub async fn insert_record(db: &DbConnection, fixture: &RecordFixture) {
    let elapsed = fixture.date_end - fixture.date_start;

    sqlx::query(
        r#"
        INSERT INTO records (
            uuid, origin, method, status, content_type, content_length,
            host, url, path, scheme, date_start, date_end, time_taken,
            header, request_header, body, request_body
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fixture.uuid)
    .bind(&fixture.origin)
    .bind(&fixture.method)
    .bind(fixture.status)
    .bind(&fixture.content_type)
    .bind(fixture.body.len() as i64)
    .bind(&fixture.host)
    .bind(&fixture.url)
    .bind(&fixture.path)
    .bind(&fixture.scheme)
    .bind(fixture.date_start.to_rfc3339())
    .bind(fixture.date_end.to_rfc3339())
    .bind(elapsed.num_nanoseconds().unwrap_or_default())
    .bind(&fixture.header)
    .bind(&fixture.request_header)
    .bind(&fixture.body)
    .bind(&fixture.request_body)
    .execute(db.pool())
    .await
    .expect("Failed to insert record fixture");
}
