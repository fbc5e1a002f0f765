//! Login and logout.

use tracing::{debug, info};

use crate::auth::CredentialPair;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};

use super::ApiClient;

impl ApiClient {
    /// Exchange username/password for a credential pair and store it.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "username and password are required".to_string(),
            ));
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .inner()
            .post(&self.config().login_url(), &request)
            .await?;

        self.inner()
            .credentials()
            .set(CredentialPair::new(response.access, response.refresh));
        info!(username, "login succeeded");
        Ok(())
    }

    /// End the session. The backend call is best-effort; local credentials
    /// are cleared regardless of its outcome.
    pub async fn logout(&self) {
        if let Err(err) = self.inner().delete(&self.config().logout_url()).await {
            debug!(error = %err, "logout call failed; clearing local session anyway");
        }
        self.inner().credentials().clear();
    }
}
