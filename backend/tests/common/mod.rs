use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use backend::{config::Config, create_router, initialize_backend, storage::DbConnection};
use tower::util::ServiceExt; // for `oneshot`

/// A router over a private in-memory store, plus a handle for seeding it
pub struct TestApp {
    pub db: DbConnection,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_url = format!(
            "sqlite:file:capture_it_{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4().simple()
        );
        let config = Config::from_lookup(|name| {
            (name == backend::config::DATABASE_URL_VAR).then(|| db_url.clone())
        })
        .expect("config");

        // Keeps the shared in-memory database alive while the app is used
        let db = DbConnection::new(&config.database_url).await.expect("db");
        let state = initialize_backend(&config).await.expect("backend");

        Self {
            db,
            router: create_router(state),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.get_with(uri, &[]).await
    }

    pub async fn get_with(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

/// One row of the records table as the capture engine would write it
pub struct Row<'a> {
    pub uuid: &'a str,
    pub method: &'a str,
    pub status: i64,
    pub host: &'a str,
    pub url: &'a str,
    pub path: &'a str,
    pub header: &'a str,
    pub request_header: &'a str,
    pub body: &'a [u8],
    pub request_body: &'a [u8],
}

impl<'a> Row<'a> {
    pub fn new(uuid: &'a str) -> Self {
        Self {
            uuid,
            method: "GET",
            status: 200,
            host: "example.com",
            url: "http://example.com/",
            path: "/",
            header: r#"{"Content-Type":["text/plain"]}"#,
            request_header: r#"{"Accept":["*/*"]}"#,
            body: b"",
            request_body: b"",
        }
    }
}

pub const DATE_START: &str = "2024-06-01T08:00:00Z";
pub const DATE_END: &str = "2024-06-01T08:00:01Z";
pub const DATE_END_HTTP: &str = "Sat, 01 Jun 2024 08:00:01 GMT";

pub async fn insert(db: &DbConnection, row: &Row<'_>) {
    sqlx::query(
        r#"
        INSERT INTO records (
            uuid, origin, method, status, content_type, content_length,
            host, url, path, scheme, date_start, date_end, time_taken,
            header, request_header, body, request_body
        )
        VALUES (?, '10.0.0.1:4000', ?, ?, 'text/plain', ?, ?, ?, ?, 'http', ?, ?, 1000000000, ?, ?, ?, ?)
        "#,
    )
    .bind(row.uuid)
    .bind(row.method)
    .bind(row.status)
    .bind(row.body.len() as i64)
    .bind(row.host)
    .bind(row.url)
    .bind(row.path)
    .bind(DATE_START)
    .bind(DATE_END)
    .bind(row.header)
    .bind(row.request_header)
    .bind(row.body)
    .bind(row.request_body)
    .execute(db.pool())
    .await
    .expect("insert record");
}
