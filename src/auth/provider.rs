// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Ready-made identity providers

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{IdentityProvider, Principal};
use crate::error::Result;

/// Provider for which nobody is ever signed in
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current_user(&self) -> Option<Arc<dyn Principal>> {
        None
    }
}

/// Provider with a fixed token that never changes
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    /// Create a provider that always answers with `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl Principal for StaticToken {
    async fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

impl IdentityProvider for StaticToken {
    fn current_user(&self) -> Option<Arc<dyn Principal>> {
        Some(Arc::new(self.clone()))
    }
}

/// Provider whose token can be swapped at runtime
///
/// Clones share the same slot, so signing in through one handle is seen by
/// every client built from another.
#[derive(Debug, Clone, Default)]
pub struct SharedToken {
    slot: Arc<RwLock<Option<String>>>,
}

impl SharedToken {
    /// Create a provider with nobody signed in
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in with `token`
    pub fn set(&self, token: impl Into<String>) {
        *self.slot.write() = Some(token.into());
    }

    /// Sign out
    pub fn clear(&self) {
        *self.slot.write() = None;
    }

    /// Whether a token is currently set
    pub fn is_signed_in(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl IdentityProvider for SharedToken {
    fn current_user(&self) -> Option<Arc<dyn Principal>> {
        // Snapshot: a sign-out mid-request does not affect the token already handed out.
        let token = self.slot.read().clone()?;
        Some(Arc::new(StaticToken::new(token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::resolve_authorization;

    #[test]
    fn test_anonymous_has_no_user() {
        assert!(Anonymous.current_user().is_none());
    }

    #[tokio::test]
    async fn test_static_token() {
        let user = StaticToken::new("fixed").current_user().unwrap();
        assert_eq!(user.token().await.unwrap(), "fixed");
    }

    #[tokio::test]
    async fn test_shared_token_sign_in_and_out() {
        let provider = SharedToken::new();
        let handle = provider.clone();
        assert!(!provider.is_signed_in());
        assert!(resolve_authorization(&provider).await.unwrap().is_none());

        handle.set("fresh");
        assert!(provider.is_signed_in());
        assert_eq!(
            resolve_authorization(&provider).await.unwrap().as_deref(),
            Some("Bearer fresh")
        );

        handle.clear();
        assert!(resolve_authorization(&provider).await.unwrap().is_none());
    }
}
