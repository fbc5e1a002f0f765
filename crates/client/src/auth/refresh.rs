//! Single-flight token refresh.
//!
//! Any number of requests may observe a 401 concurrently; exactly one refresh
//! call goes to the backend and every caller settles on its outcome. Callers
//! report the access token they saw rejected, so one that lost the race to an
//! already-completed refresh reuses the fresh token without a network call.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, warn};

use crate::client::SessionEvent;
use crate::config::ApiConfig;
use crate::error::NormalizedError;
use crate::models::{RefreshRequest, RefreshResponse};

use super::credentials::{CredentialPair, CredentialStore};

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("no refresh token available")]
    MissingRefreshToken,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("refresh rejected: {0}")]
    Rejected(NormalizedError),
    #[error("refresh response missing access token")]
    MissingAccessToken,
}

/// Owns the refresh protocol for one session.
///
/// The sole writer of the credential store during refresh; everything else
/// reads. State machine is Idle → Refreshing → Idle, with the Refreshing
/// window held closed by an async mutex.
pub struct RefreshCoordinator {
    http: reqwest::Client,
    refresh_url: String,
    store: Arc<CredentialStore>,
    events: broadcast::Sender<SessionEvent>,
    refresh_lock: Mutex<()>,
}

impl RefreshCoordinator {
    pub fn new(
        http: reqwest::Client,
        config: &ApiConfig,
        store: Arc<CredentialStore>,
        events: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            http,
            refresh_url: config.refresh_url(),
            store,
            events,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Obtain a credential pair fresher than `observed_access`, the token the
    /// caller saw rejected (`None` if it sent unauthenticated).
    ///
    /// Concurrent callers serialize on the refresh window; whoever enters
    /// after a completed refresh observes the replaced token and returns it
    /// directly. On failure the store is cleared, a session-invalidated event
    /// is broadcast, and late callers fail on the missing refresh token
    /// without issuing another backend call.
    pub async fn ensure_fresh_credential(
        &self,
        observed_access: Option<&str>,
    ) -> Result<CredentialPair, RefreshError> {
        let _window = self.refresh_lock.lock().await;

        if let Some(current) = self.store.get() {
            if Some(current.access_token.as_str()) != observed_access {
                debug!("access token already replaced while waiting; skipping refresh");
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.store.refresh_token() else {
            self.invalidate_session();
            return Err(RefreshError::MissingRefreshToken);
        };

        match self.call_refresh(&refresh_token).await {
            Ok(pair) => {
                debug!("token refresh succeeded");
                self.store.set(pair.clone());
                Ok(pair)
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed; invalidating session");
                self.invalidate_session();
                Err(err)
            }
        }
    }

    async fn call_refresh(&self, refresh_token: &str) -> Result<CredentialPair, RefreshError> {
        let response = self
            .http
            .post(&self.refresh_url)
            .json(&RefreshRequest {
                refresh: refresh_token.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let payload = response.json::<Value>().await.unwrap_or(Value::Null);
            return Err(RefreshError::Rejected(NormalizedError::from_payload(
                Some(status.as_u16()),
                &payload,
            )));
        }

        let body: RefreshResponse = response.json().await?;
        if body.access.is_empty() {
            return Err(RefreshError::MissingAccessToken);
        }

        // A rotated refresh token is optional; keep the old one otherwise.
        let refresh = body
            .refresh
            .filter(|token| !token.is_empty())
            .unwrap_or_else(|| refresh_token.to_string());

        Ok(CredentialPair::new(body.access, refresh))
    }

    fn invalidate_session(&self) {
        self.store.clear();
        let _ = self.events.send(SessionEvent::SessionInvalidated);
    }
}
