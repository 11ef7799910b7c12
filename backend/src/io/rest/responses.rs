use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::RecordError;

/// A bare status code with its canonical reason phrase as the body
pub fn reply_code(status: StatusCode) -> Response {
    let phrase = status.canonical_reason().unwrap_or_default();
    (status, phrase).into_response()
}

/// Map a domain error onto its status code without leaking the detail
pub fn reply_error(err: &RecordError) -> Response {
    reply_code(err.status_code())
}

/// 200 with a JSON body, open to any origin
pub fn reply_json<T: Serialize>(data: &T) -> Response {
    let mut response = Json(data).into_response();
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
