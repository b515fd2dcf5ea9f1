// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Identity provider contract and bearer header resolution
//!
//! An [`IdentityProvider`] answers "who is signed in right now". When someone
//! is, the returned [`Principal`] hands out a token asynchronously; a provider
//! backed by a real auth service may refresh silently before answering.
//!
//! ```rust,no_run
//! use apifetch::auth::{resolve_authorization, StaticToken};
//!
//! # async fn demo() -> apifetch::Result<()> {
//! let provider = StaticToken::new("abc123");
//! let header = resolve_authorization(&provider).await?;
//! assert_eq!(header.as_deref(), Some("Bearer abc123"));
//! # Ok(())
//! # }
//! ```

mod provider;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use provider::{Anonymous, SharedToken, StaticToken};

/// An authenticated user able to produce a bearer token
#[async_trait]
pub trait Principal: Send + Sync {
    /// Fetch the current token, refreshing if the provider needs to
    async fn token(&self) -> Result<String>;
}

/// Source of the currently authenticated principal
///
/// `current_user` must not fail when nobody is signed in; it returns `None`.
pub trait IdentityProvider: Send + Sync {
    /// The signed-in principal, if any
    fn current_user(&self) -> Option<Arc<dyn Principal>>;
}

impl<P: IdentityProvider + ?Sized> IdentityProvider for Arc<P> {
    fn current_user(&self) -> Option<Arc<dyn Principal>> {
        (**self).current_user()
    }
}

/// Resolve the `Authorization` header value for the current principal
///
/// Returns `Ok(None)` when nobody is signed in or the provider hands back an
/// empty token. Errors only come from the token retrieval itself.
pub async fn resolve_authorization(provider: &dyn IdentityProvider) -> Result<Option<String>> {
    let Some(user) = provider.current_user() else {
        return Ok(None);
    };

    let token = user.token().await?;
    if token.is_empty() {
        tracing::debug!("Identity provider returned an empty token, omitting authorization");
        return Ok(None);
    }

    Ok(Some(format!("Bearer {}", token)))
}
