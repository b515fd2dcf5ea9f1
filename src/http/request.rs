// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request options, caller overrides and the typed merge between them
//!
//! Every call starts from the built-in default for its verb
//! ([`RequestOptions::for_verb`]) and then has the client's
//! [`RequestOverrides`] applied on top. Overrides can replace headers (per
//! name) and the body, never the method.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{headers, APPLICATION_JSON};
use crate::error::Result;

/// HTTP verbs the client exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// The reqwest method for this verb
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
        }
    }

    /// Whether requests with this verb may carry a body
    pub fn allows_body(self) -> bool {
        !matches!(self, Verb::Get)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// Fully merged options for one outgoing request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Request method, fixed by the verb
    pub method: Method,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
}

impl RequestOptions {
    /// Build the built-in default options for `verb`
    ///
    /// `authorization` is attached verbatim when present. For verbs that take a
    /// body, `data` is JSON-encoded and `content-type` is set to JSON; without
    /// `data` there is neither body nor content type. GET ignores `data`.
    pub fn for_verb(verb: Verb, authorization: Option<&str>, data: Option<&Value>) -> Result<Self> {
        let mut options = Self {
            method: verb.method(),
            headers: HeaderMap::new(),
            body: None,
        };

        if let Some(value) = authorization {
            options = options.header(headers::AUTHORIZATION, value);
        }

        if verb.allows_body() {
            if let Some(data) = data {
                options.body = Some(Bytes::from(serde_json::to_vec(data)?));
                options = options.header(headers::CONTENT_TYPE, APPLICATION_JSON);
            }
        }

        Ok(options)
    }

    /// Set a header, replacing any existing value
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        insert_header(&mut self.headers, name.as_ref(), value.as_ref());
        self
    }

    /// Apply caller overrides on top of these options
    ///
    /// Override headers replace same-named headers and leave the rest alone.
    /// An override body replaces the body, except on GET which never has one.
    pub fn apply(mut self, overrides: &RequestOverrides) -> Self {
        for (name, value) in overrides.headers.iter() {
            self.headers.insert(name.clone(), value.clone());
        }

        if self.method != Method::GET {
            if let Some(ref body) = overrides.body {
                self.body = Some(body.clone());
            }
        }

        self
    }

    /// Get a header value
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the body as text, lossy conversion
    pub fn body_lossy(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

/// Caller-supplied overrides merged into every request a client sends
#[derive(Debug, Clone, Default)]
pub struct RequestOverrides {
    /// Headers to set, replacing same-named defaults
    pub headers: HeaderMap,
    /// Body to send instead of the one built from `data`
    pub body: Option<Bytes>,
}

impl RequestOverrides {
    /// Create empty overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        insert_header(&mut self.headers, name.as_ref(), value.as_ref());
        self
    }

    /// Set multiple headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        for (name, value) in headers {
            insert_header(&mut self.headers, &name, &value);
        }
        self
    }

    /// Set the body
    ///
    /// No content type is implied; add one with [`header`](Self::header) if the
    /// server needs it.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body and the matching content type
    pub fn json<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self> {
        self.body = Some(Bytes::from(serde_json::to_vec(data)?));
        Ok(self.header(headers::CONTENT_TYPE, APPLICATION_JSON))
    }

    /// Merge `other` into these overrides, `other` winning on conflicts
    pub fn merge(mut self, other: &RequestOverrides) -> Self {
        for (name, value) in other.headers.iter() {
            self.headers.insert(name.clone(), value.clone());
        }
        if let Some(ref body) = other.body {
            self.body = Some(body.clone());
        }
        self
    }

    /// True when nothing would be overridden
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.body.is_none()
    }
}

fn insert_header(map: &mut HeaderMap, name: &str, value: &str) {
    match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
        (Ok(name), Ok(value)) => {
            map.insert(name, value);
        }
        _ => tracing::warn!(header = name, "Dropping invalid header"),
    }
}
