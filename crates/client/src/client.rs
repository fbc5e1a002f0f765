//! Authenticated HTTP pipeline.
//!
//! Every outbound request goes through [`AuthenticatedClient`]: bearer token
//! injection, 401 detection with a single refresh-and-retry, and error
//! normalization so no caller ever parses a raw error payload.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::auth::{CredentialStore, RefreshCoordinator};
use crate::config::ApiConfig;
use crate::error::{ApiError, NormalizedError};

/// Session-level signals for the embedding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Credentials were cleared after an unrecoverable 401; navigate to the
    /// login entry point.
    SessionInvalidated,
    /// The backend answered 5xx; show the degraded-service screen.
    ServiceUnavailable,
}

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// HTTP client with session credentials attached.
///
/// Request pipeline:
/// 1. attach `Authorization: Bearer <access>` when a credential is present;
/// 2. send; a 2xx response is returned as-is;
/// 3. on 401, run the single-flight refresh and re-issue the original request
///    exactly once — a second 401 surfaces as an authentication failure;
/// 4. 5xx broadcasts [`SessionEvent::ServiceUnavailable`] and surfaces as a
///    service failure;
/// 5. every failed response is normalized before it crosses this boundary.
pub struct AuthenticatedClient {
    http: reqwest::Client,
    config: ApiConfig,
    store: Arc<CredentialStore>,
    refresh: RefreshCoordinator,
    events: broadcast::Sender<SessionEvent>,
}

impl AuthenticatedClient {
    pub fn new(config: ApiConfig, store: Arc<CredentialStore>) -> Self {
        Self::with_http_client(reqwest::Client::new(), config, store)
    }

    /// Build on a caller-provided `reqwest::Client` (custom timeouts, proxy,
    /// TLS settings).
    pub fn with_http_client(
        http: reqwest::Client,
        config: ApiConfig,
        store: Arc<CredentialStore>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let refresh =
            RefreshCoordinator::new(http.clone(), &config, Arc::clone(&store), events.clone());
        Self {
            http,
            config,
            store,
            refresh,
            events,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// Subscribe to session events. Receivers created after an event miss it.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.dispatch(Method::GET, url, None).await?;
        response.json().await.map_err(ApiError::from)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        // Serialized once up front so the retry after a refresh re-sends an
        // identical body.
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::Validation(format!("unserializable request body: {err}")))?;
        let response = self.dispatch(Method::POST, url, Some(body)).await?;
        response.json().await.map_err(ApiError::from)
    }

    /// DELETE, discarding any response body.
    pub async fn delete(&self, url: &str) -> Result<(), ApiError> {
        self.dispatch(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let token = self.store.access_token();
        let response = self
            .send(method.clone(), url, body.as_ref(), token.as_deref())
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return self.classify(response).await;
        }

        // Hold on to the original 401 payload: if the refresh fails, that is
        // the error the caller sees.
        let original = response.json::<Value>().await.unwrap_or(Value::Null);

        match self.refresh.ensure_fresh_credential(token.as_deref()).await {
            Ok(pair) => {
                debug!(url, "retrying request with refreshed access token");
                let retried = self
                    .send(method, url, body.as_ref(), Some(&pair.access_token))
                    .await?;
                // classify maps a repeated 401 to an authentication failure;
                // no second refresh.
                self.classify(retried).await
            }
            Err(err) => {
                debug!(url, error = %err, "refresh failed; surfacing original 401");
                Err(ApiError::Authentication(NormalizedError::from_payload(
                    Some(StatusCode::UNAUTHORIZED.as_u16()),
                    &original,
                )))
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self.http.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await
    }

    async fn classify(&self, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let payload = response.json::<Value>().await.unwrap_or(Value::Null);
        let normalized = NormalizedError::from_payload(Some(status.as_u16()), &payload);

        if status == StatusCode::UNAUTHORIZED {
            // Only the post-refresh retry reaches this arm; a 401 that
            // survived a refresh means the session is not recoverable.
            self.store.clear();
            let _ = self.events.send(SessionEvent::SessionInvalidated);
            Err(ApiError::Authentication(normalized))
        } else if status.is_server_error() {
            warn!(status = status.as_u16(), "Backend reported a server error");
            let _ = self.events.send(SessionEvent::ServiceUnavailable);
            Err(ApiError::Service(normalized))
        } else {
            Err(ApiError::Api(normalized))
        }
    }
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("base_url", &self.config.base_url())
            .finish()
    }
}
