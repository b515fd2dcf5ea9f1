// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The uniform result shape returned by every successful call
//!
//! A JSON object body is spread into the result and `statusCode` is added on
//! top, overwriting any body field of that name. Anything else (text, or JSON
//! that is not an object) lands under `body`.

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::response::ParsedBody;
use crate::error::Result;

/// Field carrying the HTTP status code
pub const STATUS_CODE_FIELD: &str = "statusCode";

/// Field carrying a non-object body
pub const BODY_FIELD: &str = "body";

/// Normalized response: body fields plus `statusCode`
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    status: u16,
    fields: Map<String, Value>,
}

impl Normalized {
    /// Build the normalized shape from a parsed body and its status
    pub fn from_parsed(parsed: ParsedBody, status: u16) -> Self {
        let mut fields = match parsed {
            ParsedBody::Json(Value::Object(map)) => map,
            ParsedBody::Json(other) => single(BODY_FIELD, other),
            ParsedBody::Text(text) => single(BODY_FIELD, Value::String(text)),
        };
        fields.insert(STATUS_CODE_FIELD.to_string(), Value::from(status));

        Self { status, fields }
    }

    /// A result with no body fields, only the status
    ///
    /// Useful for error sinks that want to recover with a placeholder.
    pub fn status_only(status: u16) -> Self {
        Self {
            status,
            fields: single(STATUS_CODE_FIELD, Value::from(status)),
        }
    }

    /// HTTP status code of the response
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a field, `statusCode` included
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The `body` field as text, when the response was text
    pub fn body_text(&self) -> Option<&str> {
        self.fields.get(BODY_FIELD).and_then(Value::as_str)
    }

    /// All fields as a JSON map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Convert into a JSON object value
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Deserialize the fields into a typed value
    ///
    /// Unknown fields (including `statusCode`) are ignored unless `T` denies them.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }
}

impl From<Normalized> for Value {
    fn from(normalized: Normalized) -> Self {
        normalized.into_value()
    }
}

impl Serialize for Normalized {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

fn single(key: &str, value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    map
}
