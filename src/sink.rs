// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error sinks
//!
//! Every failure during dispatch is handed to the client's sink exactly once,
//! and whatever the sink returns becomes the result of the call. The default
//! [`LogAndReturn`] logs and passes the error back unchanged. A sink can also
//! recover by returning `Ok`:
//!
//! ```rust,no_run
//! use apifetch::{ApiClient, Anonymous, Error, Normalized, Result};
//!
//! # fn demo() -> Result<()> {
//! let client = ApiClient::builder()
//!     .base_url("https://api.example.com")
//!     .identity_provider(Anonymous)
//!     .error_sink(|_err: Error| -> Result<Normalized> { Ok(Normalized::status_only(0)) })
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::http::Normalized;

/// Receives every dispatch-time failure of a client
pub trait ErrorSink: Send + Sync {
    /// Handle `error`; the return value is what the caller receives
    fn handle(&self, error: Error) -> Result<Normalized>;
}

impl<F> ErrorSink for F
where
    F: Fn(Error) -> Result<Normalized> + Send + Sync,
{
    fn handle(&self, error: Error) -> Result<Normalized> {
        self(error)
    }
}

/// Default sink: log the error and hand it back
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAndReturn;

impl ErrorSink for LogAndReturn {
    fn handle(&self, error: Error) -> Result<Normalized> {
        tracing::error!(error = %error, "Request failed");
        Err(error)
    }
}
