// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! API client facade
//!
//! [`ApiClient`] owns its configuration: base URL, identity provider, error
//! sink, transport and default overrides. Cloning is cheap and clones never
//! affect one another; every way of changing configuration returns a new
//! client value.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::auth::{resolve_authorization, IdentityProvider};
use crate::error::{Error, Result};
use crate::http::{
    headers, resolve_body, Normalized, ReqwestTransport, RequestOptions, RequestOverrides,
    Transport, TransportConfig, Verb,
};
use crate::sink::{ErrorSink, LogAndReturn};

/// HTTP client that prefixes a base URL, attaches a bearer token and
/// normalizes responses
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    identity: Arc<dyn IdentityProvider>,
    sink: Arc<dyn ErrorSink>,
    transport: Arc<dyn Transport>,
    overrides: RequestOverrides,
}

impl ApiClient {
    /// Create a client with the default transport and error sink
    pub fn new(
        identity: impl IdentityProvider + 'static,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::builder()
            .identity_provider(identity)
            .base_url(base_url)
            .build()
    }

    /// Start building a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Base URL every path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Overrides merged into every request
    pub fn overrides(&self) -> &RequestOverrides {
        &self.overrides
    }

    /// Return this client with a different base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Return this client with a different error sink
    pub fn with_error_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// A new client with `overrides` merged into every call
    ///
    /// `self` is left untouched, so other holders of this client keep their
    /// behavior.
    pub fn modify(&self, overrides: RequestOverrides) -> Self {
        self.clone().rebind(overrides)
    }

    /// Consume this client and return it with `overrides` merged in
    pub fn rebind(mut self, overrides: RequestOverrides) -> Self {
        self.overrides = self.overrides.merge(&overrides);
        self
    }

    /// Send a GET request
    pub async fn get(&self, path: &str) -> Result<Normalized> {
        self.request(Verb::Get, path, None).await
    }

    /// Send a POST request, with `data` as JSON body when given
    pub async fn post(&self, path: &str, data: Option<Value>) -> Result<Normalized> {
        self.request(Verb::Post, path, data).await
    }

    /// Send a PUT request, with `data` as JSON body when given
    pub async fn put(&self, path: &str, data: Option<Value>) -> Result<Normalized> {
        self.request(Verb::Put, path, data).await
    }

    /// Send a PATCH request, with `data` as JSON body when given
    pub async fn patch(&self, path: &str, data: Option<Value>) -> Result<Normalized> {
        self.request(Verb::Patch, path, data).await
    }

    /// Send a DELETE request, with `data` as JSON body when given
    pub async fn delete(&self, path: &str, data: Option<Value>) -> Result<Normalized> {
        self.request(Verb::Delete, path, data).await
    }

    /// Send any serializable value as the JSON body
    ///
    /// An encoding failure goes to the error sink like any other failure.
    pub async fn send_json<T: Serialize + ?Sized>(
        &self,
        verb: Verb,
        path: &str,
        data: &T,
    ) -> Result<Normalized> {
        match serde_json::to_value(data) {
            Ok(value) => self.request(verb, path, Some(value)).await,
            Err(e) => self.sink.handle(e.into()),
        }
    }

    /// Send a request and route any failure through the error sink
    pub async fn request(&self, verb: Verb, path: &str, data: Option<Value>) -> Result<Normalized> {
        match self.dispatch(verb, path, data).await {
            Ok(normalized) => Ok(normalized),
            Err(error) => self.sink.handle(error),
        }
    }

    async fn dispatch(&self, verb: Verb, path: &str, data: Option<Value>) -> Result<Normalized> {
        let authorization = resolve_authorization(self.identity.as_ref()).await?;
        let options = RequestOptions::for_verb(verb, authorization.as_deref(), data.as_ref())?
            .apply(&self.overrides);

        // Verbatim: no separator, no normalization, no encoding.
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(
            method = %options.method,
            url = %url,
            authorized = options.headers.contains_key(headers::AUTHORIZATION),
            "Request"
        );

        let response = self.transport.send(&url, &options).await?;
        let parsed = resolve_body(&response)?;

        tracing::debug!(
            url = %url,
            status = %response.status,
            content_type = response.content_type().unwrap_or("-"),
            kind = %parsed.kind(),
            "Response"
        );

        Ok(Normalized::from_parsed(parsed, response.status_code()))
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ClientBuilder {
    base_url: String,
    identity: Option<Arc<dyn IdentityProvider>>,
    sink: Option<Arc<dyn ErrorSink>>,
    transport: Option<Arc<dyn Transport>>,
    transport_config: TransportConfig,
    overrides: RequestOverrides,
}

impl ClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the identity provider (required)
    pub fn identity_provider(mut self, provider: impl IdentityProvider + 'static) -> Self {
        self.identity = Some(Arc::new(provider));
        self
    }

    /// Set the error sink (defaults to [`LogAndReturn`])
    pub fn error_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Use a custom transport instead of reqwest
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Configure the reqwest transport
    ///
    /// Ignored when a custom transport is set.
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport_config = config;
        self
    }

    /// Overrides merged into every request
    pub fn defaults(mut self, overrides: RequestOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Build the client
    ///
    /// Fails with [`Error::Config`] when no identity provider was given or the
    /// transport cannot be created.
    pub fn build(self) -> Result<ApiClient> {
        let identity = self
            .identity
            .ok_or_else(|| Error::config("an identity provider is required"))?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_config(self.transport_config)?),
        };

        Ok(ApiClient {
            base_url: self.base_url,
            identity,
            sink: self.sink.unwrap_or_else(|| Arc::new(LogAndReturn)),
            transport,
            overrides: self.overrides,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Anonymous, SharedToken, StaticToken};
    use crate::http::Response;
    use async_trait::async_trait;
    use bytes::Bytes;
    use parking_lot::Mutex;
    use reqwest::header::HeaderMap;
    use reqwest::{Method, StatusCode};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records every request and answers with a fixed response
    #[derive(Clone)]
    struct Recording {
        sent: Arc<Mutex<Vec<(String, RequestOptions)>>>,
        status: StatusCode,
        body: Bytes,
    }

    impl Recording {
        fn new(status: u16, body: impl Into<Bytes>) -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                status: StatusCode::from_u16(status).unwrap(),
                body: body.into(),
            }
        }

        fn last(&self) -> (String, RequestOptions) {
            self.sent.lock().last().cloned().expect("no request sent")
        }

        fn count(&self) -> usize {
            self.sent.lock().len()
        }
    }

    #[async_trait]
    impl Transport for Recording {
        async fn send(&self, url: &str, options: &RequestOptions) -> Result<Response> {
            self.sent.lock().push((url.to_string(), options.clone()));
            Ok(Response::new(self.status, HeaderMap::new(), self.body.clone()))
        }
    }

    struct Refused;

    #[async_trait]
    impl Transport for Refused {
        async fn send(&self, _url: &str, _options: &RequestOptions) -> Result<Response> {
            Err(Error::transport("connection refused"))
        }
    }

    fn client(identity: impl IdentityProvider + 'static, transport: Recording) -> ApiClient {
        ApiClient::builder()
            .base_url("https://api.example.com")
            .identity_provider(identity)
            .transport(transport)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_json_unauthenticated() {
        let transport = Recording::new(200, r#"{"id":1}"#);
        let result = client(Anonymous, transport.clone())
            .get("/users/1")
            .await
            .unwrap();

        assert_eq!(result.into_value(), json!({"id": 1, "statusCode": 200}));
        let (url, options) = transport.last();
        assert_eq!(url, "https://api.example.com/users/1");
        assert_eq!(options.method, Method::GET);
        assert!(!options.headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_text_error_body() {
        let transport = Recording::new(500, "internal error");
        let result = client(Anonymous, transport).get("/users/1").await.unwrap();

        assert_eq!(
            result.into_value(),
            json!({"body": "internal error", "statusCode": 500})
        );
    }

    #[tokio::test]
    async fn test_bearer_attached_when_signed_in() {
        let transport = Recording::new(200, "{}");
        client(StaticToken::new("K"), transport.clone())
            .delete("/users/1", None)
            .await
            .unwrap();

        let (_, options) = transport.last();
        assert_eq!(options.method, Method::DELETE);
        assert_eq!(options.header_value("authorization"), Some("Bearer K"));
        assert!(options.body.is_none());
        assert!(options.header_value("content-type").is_none());
    }

    #[tokio::test]
    async fn test_token_read_per_call() {
        let provider = SharedToken::new();
        let transport = Recording::new(200, "{}");
        let api = client(provider.clone(), transport.clone());

        api.get("/a").await.unwrap();
        assert!(transport.last().1.header_value("authorization").is_none());

        provider.set("later");
        api.get("/a").await.unwrap();
        assert_eq!(
            transport.last().1.header_value("authorization"),
            Some("Bearer later")
        );
    }

    #[tokio::test]
    async fn test_post_sends_json() {
        let transport = Recording::new(201, r#"{"id":9}"#);
        let result = client(Anonymous, transport.clone())
            .post("/users", Some(json!({"name": "Ann"})))
            .await
            .unwrap();

        assert_eq!(result.status_code(), 201);
        let (url, options) = transport.last();
        assert_eq!(url, "https://api.example.com/users");
        assert_eq!(options.method, Method::POST);
        assert_eq!(options.header_value("content-type"), Some("application/json"));
        let sent: Value = serde_json::from_slice(options.body.as_ref().unwrap()).unwrap();
        assert_eq!(sent, json!({"name": "Ann"}));
    }

    #[tokio::test]
    async fn test_put_and_patch_methods() {
        let transport = Recording::new(200, "{}");
        let api = client(Anonymous, transport.clone());

        api.put("/x", Some(json!({"a": 1}))).await.unwrap();
        assert_eq!(transport.last().1.method, Method::PUT);

        api.patch("/x", None).await.unwrap();
        let (_, options) = transport.last();
        assert_eq!(options.method, Method::PATCH);
        assert!(options.body.is_none());
    }

    #[tokio::test]
    async fn test_send_json_typed() {
        #[derive(Serialize)]
        struct NewUser<'a> {
            name: &'a str,
        }

        let transport = Recording::new(201, "{}");
        client(Anonymous, transport.clone())
            .send_json(Verb::Put, "/users/2", &NewUser { name: "Bo" })
            .await
            .unwrap();

        let (_, options) = transport.last();
        assert_eq!(options.method, Method::PUT);
        assert_eq!(options.body_lossy().as_deref(), Some(r#"{"name":"Bo"}"#));
    }

    #[tokio::test]
    async fn test_path_appended_verbatim() {
        let transport = Recording::new(200, "{}");
        let api = ApiClient::builder()
            .base_url("https://api.example.com/v1")
            .identity_provider(Anonymous)
            .transport(transport.clone())
            .build()
            .unwrap();

        api.get("users?q=a b").await.unwrap();
        assert_eq!(transport.last().0, "https://api.example.com/v1users?q=a b");

        api.get("").await.unwrap();
        assert_eq!(transport.last().0, "https://api.example.com/v1");
    }

    #[tokio::test]
    async fn test_modify_does_not_touch_original() {
        let transport = Recording::new(200, "{}");
        let original = client(StaticToken::new("K"), transport.clone());
        let modified = original.modify(RequestOverrides::new().header("X-Test", "1"));

        modified.get("/p").await.unwrap();
        let (_, options) = transport.last();
        assert_eq!(options.header_value("x-test"), Some("1"));
        assert_eq!(options.header_value("authorization"), Some("Bearer K"));

        original.get("/p").await.unwrap();
        assert!(transport.last().1.header_value("x-test").is_none());
        assert!(original.overrides().is_empty());
    }

    #[tokio::test]
    async fn test_modify_stacks_and_latest_wins() {
        let transport = Recording::new(200, "{}");
        let api = client(Anonymous, transport.clone())
            .modify(RequestOverrides::new().header("x-a", "1").header("x-b", "1"))
            .modify(RequestOverrides::new().header("x-b", "2"));

        api.get("/p").await.unwrap();
        let (_, options) = transport.last();
        assert_eq!(options.header_value("x-a"), Some("1"));
        assert_eq!(options.header_value("x-b"), Some("2"));
    }

    #[tokio::test]
    async fn test_rebind_and_builder_defaults() {
        let transport = Recording::new(200, "{}");
        let api = ApiClient::builder()
            .base_url("https://api.example.com")
            .identity_provider(Anonymous)
            .transport(transport.clone())
            .defaults(RequestOverrides::new().header("x-tenant", "acme"))
            .build()
            .unwrap()
            .rebind(RequestOverrides::new().header("x-trace", "t1"));

        api.get("/p").await.unwrap();
        let (_, options) = transport.last();
        assert_eq!(options.header_value("x-tenant"), Some("acme"));
        assert_eq!(options.header_value("x-trace"), Some("t1"));
    }

    #[tokio::test]
    async fn test_with_base_url() {
        let transport = Recording::new(200, "{}");
        let api = client(Anonymous, transport.clone()).with_base_url("http://localhost:8080");

        assert_eq!(api.base_url(), "http://localhost:8080");
        api.get("/health").await.unwrap();
        assert_eq!(transport.last().0, "http://localhost:8080/health");
    }

    #[tokio::test]
    async fn test_idempotent_results() {
        let transport = Recording::new(200, r#"{"id":1,"tags":["a"]}"#);
        let api = client(Anonymous, transport.clone());

        let first = api.get("/users/1").await.unwrap();
        let second = api.get("/users/1").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(transport.count(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_goes_to_sink_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let api = ApiClient::builder()
            .base_url("https://api.example.com")
            .identity_provider(Anonymous)
            .transport(Refused)
            .error_sink(move |err: Error| -> Result<Normalized> {
                seen.fetch_add(1, Ordering::SeqCst);
                Err(err)
            })
            .build()
            .unwrap();

        let err = api.get("/users/1").await.unwrap_err();
        assert!(matches!(err, Error::Transport(ref m) if m == "connection refused"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_default_sink_returns_error() {
        let api = ApiClient::builder()
            .identity_provider(Anonymous)
            .transport(Refused)
            .build()
            .unwrap();

        let err = api.post("/x", Some(json!({}))).await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_sink_recovery_becomes_result() {
        let api = client(Anonymous, Recording::new(200, vec![0xff, 0xfe]))
            .with_error_sink(|err: Error| -> Result<Normalized> {
                Ok(Normalized::status_only(err.status_code().unwrap_or(0)))
            });

        let result = api.get("/bin").await.unwrap();
        assert_eq!(result.status_code(), 200);
        assert_eq!(result.as_map().len(), 1);
    }

    #[tokio::test]
    async fn test_identity_failure_goes_to_sink() {
        use crate::auth::Principal;

        struct Expired;

        #[async_trait]
        impl Principal for Expired {
            async fn token(&self) -> Result<String> {
                Err(Error::identity("refresh token expired"))
            }
        }

        struct Session;

        impl IdentityProvider for Session {
            fn current_user(&self) -> Option<Arc<dyn crate::auth::Principal>> {
                Some(Arc::new(Expired))
            }
        }

        let transport = Recording::new(200, "{}");
        let err = client(Session, transport.clone())
            .get("/me")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Identity { .. }));
        assert_eq!(transport.count(), 0);
    }

    #[test]
    fn test_missing_identity_provider_is_precondition() {
        let err = ApiClient::builder()
            .base_url("https://api.example.com")
            .build()
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_unbuildable_transport_is_precondition() {
        let err = ApiClient::builder()
            .base_url("https://api.example.com")
            .identity_provider(Anonymous)
            .transport_config(TransportConfig::new().proxy("::not a url::"))
            .build()
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_new_uses_reqwest_transport() {
        let api = ApiClient::new(Anonymous, "https://api.example.com").unwrap();
        assert_eq!(api.base_url(), "https://api.example.com");
        assert!(format!("{:?}", api).contains("api.example.com"));
    }
}
