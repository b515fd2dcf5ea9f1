// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for apifetch
//!
//! Request options and their merge rules, response body resolution, the
//! normalized result shape, and the transport that actually hits the network.

mod normalized;
mod request;
mod response;
mod transport;

pub use normalized::{Normalized, BODY_FIELD, STATUS_CODE_FIELD};
pub use request::{RequestOptions, RequestOverrides, Verb};
pub use response::{resolve_body, BodyKind, ParsedBody, Response};
pub use transport::{ReqwestTransport, Transport, TransportConfig};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("apifetch/", env!("CARGO_PKG_VERSION"));

/// Media type attached to JSON request bodies
pub const APPLICATION_JSON: &str = "application/json";

/// Common HTTP headers
pub mod headers {
    pub const AUTHORIZATION: &str = "authorization";
    pub const CONTENT_TYPE: &str = "content-type";
}
