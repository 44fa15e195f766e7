//! Email/password login and bearer-token refresh for DUPR endpoints.

use super::constants::LOGIN_PATH;
use super::Credentials;
use crate::core::error::DuprError;
use crate::core::wire::Envelope;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResult {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

impl super::DuprClient {
    /// Log in with the held credentials and store the returned bearer token.
    ///
    /// Calling this repeatedly is harmless; each call replaces the token.
    ///
    /// # Errors
    ///
    /// Returns [`DuprError::Auth`] if no credentials are held or the login is refused.
    #[tracing::instrument(skip(self), err)]
    pub async fn login(&self) -> Result<(), DuprError> {
        let creds = self
            .credentials()
            .await
            .ok_or_else(|| DuprError::Auth("no credentials configured".into()))?;
        self.login_as(&creds).await
    }

    /// Replace the held credentials and log in with them.
    ///
    /// # Errors
    ///
    /// Returns [`DuprError::Auth`] if the login is refused.
    pub async fn login_with(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), DuprError> {
        let creds = Credentials::new(email, password);
        self.state.write().await.credentials = Some(creds.clone());
        self.login_as(&creds).await
    }

    /// Refresh the bearer token after the API rejected it.
    ///
    /// # Errors
    ///
    /// Same as [`DuprClient::login`].
    pub async fn reauthenticate(&self) -> Result<(), DuprError> {
        tracing::debug!("refreshing DUPR session token");
        self.login().await
    }

    /// Drop the current bearer token.
    pub async fn clear_token(&self) {
        self.state.write().await.access_token = None;
    }

    async fn login_as(&self, creds: &Credentials) -> Result<(), DuprError> {
        // Only one login in flight per session.
        let _guard = self.login_lock.lock().await;

        let url = self.endpoint(LOGIN_PATH)?;
        let body = LoginBody {
            email: &creds.email,
            password: &creds.password,
        };
        let resp = self.http().post(url.clone()).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DuprError::Auth(format!(
                "login for {} refused with status {}",
                creds.email,
                status.as_u16()
            )));
        }

        let text = resp.text().await?;
        let env: Envelope<LoginResult> = serde_json::from_str(&text)
            .map_err(|e| DuprError::Auth(format!("login response parse: {e}")))?;

        let token = env
            .result
            .and_then(|r| r.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DuprError::Auth("login response carried no access token".into()))?;

        self.state.write().await.access_token = Some(token);
        tracing::info!(email = %creds.email, "logged in to DUPR");
        Ok(())
    }
}
