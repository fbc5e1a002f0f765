//! Endpoint façade over [`AuthenticatedClient`].

mod account;
mod education;
mod internship;
mod student;

pub use student::IdentifierKind;

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::auth::CredentialStore;
use crate::client::{AuthenticatedClient, SessionEvent};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// Typed access to every backend operation. Cheap to share via [`Arc`].
#[derive(Debug)]
pub struct ApiClient {
    client: Arc<AuthenticatedClient>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, store: Arc<CredentialStore>) -> Self {
        Self {
            client: Arc::new(AuthenticatedClient::new(config, store)),
        }
    }

    pub fn with_client(client: Arc<AuthenticatedClient>) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &Arc<AuthenticatedClient> {
        &self.client
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.client.subscribe()
    }

    pub(crate) fn config(&self) -> &ApiConfig {
        self.client.config()
    }
}

/// Reject empty or whitespace-only identifiers before they reach the network.
pub(crate) fn validated_identifier(identifier: &str) -> Result<&str, ApiError> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("invalid student number".to_string()));
    }
    Ok(trimmed)
}
