//! # Content Reconstruction
//!
//! Turns a loaded [`Record`] into the bytes served by the content routes.
//!
//! A [`ContentMode`] picks one side of the exchange and decides whether the
//! header block is written in wire format and whether the result is shown
//! inline or offered as a download. Callers holding the four independent
//! write flags go through [`WriteOptions::into_mode`], which rejects the one
//! combination a mode cannot express: both bodies at once.

use chrono::{DateTime, Utc};
use shared::HeaderCollection;
use url::Url;

use crate::domain::filename::safe_filename;
use crate::domain::models::Record;
use crate::error::RecordError;

pub const EMBED_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Which side of the exchange to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Request,
    Response,
}

/// A legal combination of write options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentMode {
    pub part: Part,
    /// Prefix the body with `name: value` header lines and a blank line
    pub wire: bool,
    /// Serve inline as text instead of as an attachment
    pub embed: bool,
}

impl ContentMode {
    /// Body only, as a download
    pub const fn content(part: Part) -> Self {
        Self {
            part,
            wire: false,
            embed: false,
        }
    }

    /// Headers and body, as a download
    pub const fn wire(part: Part) -> Self {
        Self {
            part,
            wire: true,
            embed: false,
        }
    }

    /// Body only, inline
    pub const fn embed(part: Part) -> Self {
        Self {
            part,
            wire: false,
            embed: true,
        }
    }
}

/// The raw flag set as four independent switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub wire: bool,
    pub embed: bool,
    pub request_body: bool,
    pub response_body: bool,
}

impl WriteOptions {
    /// `Ok(None)` when nothing is selected
    pub fn into_mode(self) -> Result<Option<ContentMode>, RecordError> {
        let part = match (self.request_body, self.response_body) {
            (true, true) => return Err(RecordError::InvalidOptionCombination),
            (true, false) => Part::Request,
            (false, true) => Part::Response,
            (false, false) => return Ok(None),
        };

        Ok(Some(ContentMode {
            part,
            wire: self.wire,
            embed: self.embed,
        }))
    }
}

/// How the bytes are handed to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Inline {
        content_type: &'static str,
    },
    Attachment {
        filename: String,
        last_modified: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub bytes: Vec<u8>,
    pub presentation: Presentation,
}

/// Build the payload for `mode`
pub fn render(record: &Record, mode: ContentMode) -> Result<RenderedContent, RecordError> {
    let (headers, body) = match mode.part {
        Part::Request => (&record.meta.request_header, &record.request_body),
        Part::Response => (&record.meta.header, &record.body),
    };

    let mut bytes = Vec::with_capacity(body.len());
    if mode.wire {
        write_wire_headers(headers, &mut bytes);
    }
    bytes.extend_from_slice(body);

    let presentation = if mode.embed {
        Presentation::Inline {
            content_type: EMBED_CONTENT_TYPE,
        }
    } else {
        let url = Url::parse(&record.meta.url)?;
        Presentation::Attachment {
            filename: safe_filename(&url),
            last_modified: record.meta.date_end,
        }
    };

    Ok(RenderedContent {
        bytes,
        presentation,
    })
}

/// Render from the raw flag set; `Ok(None)` when no body was selected
pub fn render_with_options(
    record: &Record,
    options: WriteOptions,
) -> Result<Option<RenderedContent>, RecordError> {
    match options.into_mode()? {
        Some(mode) => render(record, mode).map(Some),
        None => Ok(None),
    }
}

/// `name: value\r\n` for every value of every header, then `\r\n`
pub fn write_wire_headers(headers: &HeaderCollection, buf: &mut Vec<u8>) {
    for (name, values) in headers.iter() {
        for value in values {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
    }
    buf.extend_from_slice(b"\r\n");
}
