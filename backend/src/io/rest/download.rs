//! Attachment responses with `Last-Modified`, conditional requests and
//! single byte ranges.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use crate::io::rest::responses::reply_code;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
const SNIFF_LEN: usize = 512;

/// A satisfiable byte range within a payload of known size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub length: u64,
}

impl ByteRange {
    fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.start + self.length - 1, size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// The header is not a valid `bytes=` range set
    Invalid,
    /// Every range starts beyond the end of the payload
    NoOverlap,
}

/// Serve `bytes` as a download named `filename`
pub fn serve_attachment(
    request: &HeaderMap,
    bytes: Vec<u8>,
    filename: &str,
    last_modified: DateTime<Utc>,
) -> Response {
    let modified = (last_modified.timestamp() > 0).then_some(last_modified);

    if let Some(modified) = modified {
        if let Some(since) = header_date(request, header::IF_UNMODIFIED_SINCE) {
            if modified.timestamp() > since.timestamp() {
                return reply_code(StatusCode::PRECONDITION_FAILED);
            }
        }
        if let Some(since) = header_date(request, header::IF_MODIFIED_SINCE) {
            if modified.timestamp() <= since.timestamp() {
                let mut response = StatusCode::NOT_MODIFIED.into_response();
                set_last_modified(response.headers_mut(), modified);
                return response;
            }
        }
    }

    let size = bytes.len() as u64;
    let mut builder = Response::builder()
        .header(header::CONTENT_TYPE, sniff_content_type(&bytes))
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .header(header::ACCEPT_RANGES, "bytes");
    if let Some(modified) = modified {
        builder = builder.header(header::LAST_MODIFIED, format_http_date(modified));
    }

    let range = request
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok())
        .filter(|_| range_still_valid(request, modified));

    let (status, body) = match range.map(|value| parse_range(value, size)) {
        None => (StatusCode::OK, bytes),
        Some(Err(err)) => {
            let mut response = reply_code(StatusCode::RANGE_NOT_SATISFIABLE);
            if err == RangeError::NoOverlap {
                if let Ok(value) = HeaderValue::from_str(&format!("bytes */{size}")) {
                    response.headers_mut().insert(header::CONTENT_RANGE, value);
                }
            }
            return response;
        }
        Some(Ok(ranges)) if ranges.len() == 1 => {
            let range = ranges[0];
            builder = builder.header(header::CONTENT_RANGE, range.content_range(size));
            let start = range.start as usize;
            let end = start + range.length as usize;
            (StatusCode::PARTIAL_CONTENT, bytes[start..end].to_vec())
        }
        // Multiple ranges and empty range sets get the full payload
        Some(Ok(_)) => (StatusCode::OK, bytes),
    };

    builder
        .status(status)
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap_or_else(|_| reply_code(StatusCode::INTERNAL_SERVER_ERROR))
}

/// Parse a `Range` header against a payload of `size` bytes
pub fn parse_range(value: &str, size: u64) -> Result<Vec<ByteRange>, RangeError> {
    let range_set = value.strip_prefix("bytes=").ok_or(RangeError::Invalid)?;

    let mut ranges = Vec::new();
    let mut no_overlap = false;
    for part in range_set.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let (start, end) = part.split_once('-').ok_or(RangeError::Invalid)?;
        let (start, end) = (start.trim(), end.trim());

        if start.is_empty() {
            // Suffix range: the last `end` bytes
            let suffix: u64 = end.parse().map_err(|_| RangeError::Invalid)?;
            if suffix == 0 || size == 0 {
                no_overlap = true;
                continue;
            }
            let length = suffix.min(size);
            ranges.push(ByteRange {
                start: size - length,
                length,
            });
            continue;
        }

        let start: u64 = start.parse().map_err(|_| RangeError::Invalid)?;
        if start >= size {
            no_overlap = true;
            continue;
        }
        let length = if end.is_empty() {
            size - start
        } else {
            let end: u64 = end.parse().map_err(|_| RangeError::Invalid)?;
            if start > end {
                return Err(RangeError::Invalid);
            }
            end.min(size - 1) - start + 1
        };
        ranges.push(ByteRange { start, length });
    }

    if no_overlap && ranges.is_empty() {
        return Err(RangeError::NoOverlap);
    }
    Ok(ranges)
}

pub fn format_http_date(date: DateTime<Utc>) -> String {
    date.format(HTTP_DATE_FORMAT).to_string()
}

pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

fn header_date(headers: &HeaderMap, name: header::HeaderName) -> Option<DateTime<Utc>> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_http_date)
}

fn set_last_modified(headers: &mut HeaderMap, modified: DateTime<Utc>) {
    if let Ok(value) = HeaderValue::from_str(&format_http_date(modified)) {
        headers.insert(header::LAST_MODIFIED, value);
    }
}

/// `If-Range` keeps the range only when it names the current modification time
fn range_still_valid(request: &HeaderMap, modified: Option<DateTime<Utc>>) -> bool {
    if !request.contains_key(header::IF_RANGE) {
        return true;
    }
    match (header_date(request, header::IF_RANGE), modified) {
        (Some(since), Some(modified)) => since.timestamp() == modified.timestamp(),
        _ => false,
    }
}

/// Text unless the leading bytes hold a binary control character. Only the
/// text/binary split is detected; HTML, images and other formats are not
/// recognised by signature.
fn sniff_content_type(bytes: &[u8]) -> &'static str {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let binary = head
        .iter()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0b | 0x0e..=0x1a | 0x1c..=0x1f));
    if binary {
        "application/octet-stream"
    } else {
        "text/plain; charset=utf-8"
    }
}
