// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types and body resolution

use std::fmt;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{Error, Result};

/// HTTP response representation
///
/// The body is buffered once by the transport; [`resolve_body`] only borrows
/// it, so the JSON attempt never consumes what the text fallback needs.
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

/// Which branch of body resolution succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Text,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyKind::Json => write!(f, "json"),
            BodyKind::Text => write!(f, "text"),
        }
    }
}

/// A response body classified as JSON or text
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    Json(Value),
    Text(String),
}

impl ParsedBody {
    /// The branch that produced this body
    pub fn kind(&self) -> BodyKind {
        match self {
            ParsedBody::Json(_) => BodyKind::Json,
            ParsedBody::Text(_) => BodyKind::Text,
        }
    }
}

/// Parse a response body, JSON first, UTF-8 text as fallback
///
/// Invalid JSON is the normal path to text, not an error. Only a body that is
/// not valid UTF-8 fails, with [`Error::InvalidBodyType`].
pub fn resolve_body(response: &Response) -> Result<ParsedBody> {
    let body = strip_bom(&response.body);

    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        return Ok(ParsedBody::Json(value));
    }

    match std::str::from_utf8(body) {
        Ok(text) => Ok(ParsedBody::Text(text.to_owned())),
        Err(e) => Err(Error::invalid_body_type(
            response.status_code(),
            format!("body is neither JSON nor UTF-8 text: {}", e),
        )),
    }
}

/// Drop a leading UTF-8 byte order mark, as UTF-8 decoding does
fn strip_bom(body: &[u8]) -> &[u8] {
    body.strip_prefix(UTF8_BOM).unwrap_or(body)
}

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];
