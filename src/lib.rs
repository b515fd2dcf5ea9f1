// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # apifetch - Thin Authenticated HTTP Helper
//!
//! Wraps a plain HTTP transport with the three things every API call in an
//! app ends up needing.
//!
//! ## Features
//!
//! - Base URL: every path is appended verbatim to a configured prefix
//! - Bearer auth: `Authorization: Bearer <token>` from a pluggable identity provider,
//!   omitted entirely when nobody is signed in
//! - Normalized results: JSON object bodies come back with `statusCode` merged in,
//!   anything else as `{ body, statusCode }`
//! - Error sink: one callback sees every failure and decides what the caller gets
//! - Scoped overrides: `modify` returns a new client with extra headers or body
//!
//! ## Example
//!
//! ```rust,no_run
//! use apifetch::{ApiClient, SharedToken};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = SharedToken::new();
//!     let api = ApiClient::new(session.clone(), "https://api.example.com")?;
//!
//!     session.set("eyJhbGciOi...");
//!     let user = api.get("/users/1").await?;
//!     println!("{} -> {:?}", user.status_code(), user.get("name"));
//!
//!     let created = api.post("/users", Some(json!({ "name": "Ann" }))).await?;
//!     println!("created: {}", created.status_code());
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod sink;

// Re-exports for convenience

// Client
pub use client::{ApiClient, ClientBuilder};

// Identity
pub use auth::{
    resolve_authorization, Anonymous, IdentityProvider, Principal, SharedToken, StaticToken,
};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{
    BodyKind, Normalized, ParsedBody, RequestOptions, RequestOverrides, ReqwestTransport, Response,
    Transport, TransportConfig, Verb,
};

// Error sinks
pub use sink::{ErrorSink, LogAndReturn};

/// apifetch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
