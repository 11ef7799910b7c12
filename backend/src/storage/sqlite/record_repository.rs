use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{HeaderCollection, RecordMeta};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};
use tracing::debug;

use crate::error::RecordError;
use crate::storage::connection::DbConnection;
use crate::storage::traits::{EncodedRecord, RecordStorage};

// Columns shared by the listing and the single record lookup
const META_COLUMNS: &str = "uuid, origin, method, status, content_type, content_length, \
     host, url, path, scheme, date_start, date_end, time_taken, header, request_header";

/// Repository for captured records
#[derive(Clone)]
pub struct RecordRepository {
    db: DbConnection,
}

impl RecordRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStorage for RecordRepository {
    async fn find_record(&self, uuid: &str) -> Result<Option<EncodedRecord>, RecordError> {
        let sql = format!(
            "SELECT {META_COLUMNS}, hex(body) AS body, hex(request_body) AS request_body \
             FROM records WHERE uuid = ?"
        );
        let row = sqlx::query(&sql)
            .bind(uuid)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(EncodedRecord {
                meta: meta_from_row(&r)?,
                request_body_hex: r.try_get("request_body")?,
                body_hex: r.try_get("body")?,
            })),
            None => Ok(None),
        }
    }

    async fn list_records(
        &self,
        terms: &[String],
        limit: u32,
        offset: u64,
    ) -> Result<Vec<RecordMeta>, RecordError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {META_COLUMNS} FROM records"));
        push_term_filter(&mut builder, terms);
        builder
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        debug!(sql = builder.sql(), "listing records");
        let rows = builder.build().fetch_all(self.db.pool()).await?;

        rows.iter().map(meta_from_row).collect()
    }

    async fn count_records(&self, terms: &[String]) -> Result<u64, RecordError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) AS total FROM records");
        push_term_filter(&mut builder, terms);

        let row = builder.build().fetch_one(self.db.pool()).await?;
        let total: i64 = row.try_get("total")?;
        Ok(u64::try_from(total).unwrap_or(0))
    }
}

/// Append `WHERE (term 1 matches) OR (term 2 matches) ...`.
///
/// A term matches when host, origin, path or content type contain it, or
/// when method, scheme or status equal it.
fn push_term_filter(builder: &mut QueryBuilder<'_, Sqlite>, terms: &[String]) {
    if terms.is_empty() {
        return;
    }

    builder.push(" WHERE ");
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }

        builder.push("(");
        for (j, column) in ["host", "origin", "path", "content_type"].iter().enumerate() {
            if j > 0 {
                builder.push(" OR ");
            }
            builder
                .push(*column)
                .push(" LIKE ")
                .push_bind(like_pattern(term))
                .push(" ESCAPE '\\'");
        }
        builder
            .push(" OR method = ")
            .push_bind(term.clone())
            .push(" OR scheme = ")
            .push_bind(term.clone())
            // Bound as text; the column's integer affinity converts numeric terms
            .push(" OR status = ")
            .push_bind(term.clone());
        builder.push(")");
    }
}

/// `%term%` with LIKE wildcards in the term escaped
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn meta_from_row(row: &SqliteRow) -> Result<RecordMeta, RecordError> {
    Ok(RecordMeta {
        uuid: row.try_get("uuid")?,
        origin: row.try_get("origin")?,
        method: row.try_get("method")?,
        status: row.try_get("status")?,
        content_type: row.try_get("content_type")?,
        content_length: row.try_get("content_length")?,
        host: row.try_get("host")?,
        url: row.try_get("url")?,
        path: row.try_get("path")?,
        scheme: row.try_get("scheme")?,
        date_start: row.try_get::<DateTime<Utc>, _>("date_start")?,
        date_end: row.try_get::<DateTime<Utc>, _>("date_end")?,
        time_taken: row.try_get("time_taken")?,
        header: headers_from_row(row, "header")?,
        request_header: headers_from_row(row, "request_header")?,
    })
}

fn headers_from_row(row: &SqliteRow, column: &'static str) -> Result<HeaderCollection, RecordError> {
    let raw: Option<String> = row.try_get(column)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("null") => Ok(HeaderCollection::new()),
        Some(json) => serde_json::from_str(json).map_err(|err| RecordError::corrupt(column, err)),
    }
}
