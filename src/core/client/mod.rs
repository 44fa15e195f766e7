//! Public client surface + builder.
//! Internals are split into `auth` (login/bearer token), `constants` (UA + defaults)
//! and `retry` (match-history retry policy and request pacing).

mod auth;
mod constants;
pub mod retry;

pub use retry::{Backoff, Pacing, RetryConfig};

use crate::core::DuprError;
use constants::{
    DEFAULT_BASE_URL, DEFAULT_ROSTER_PAGE_SIZE, ENV_BASE_URL, ENV_EMAIL, ENV_PASSWORD, USER_AGENT,
};
use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use url::Url;

/// Email/password pair used to (re)authenticate the session.
#[derive(Clone)]
pub struct Credentials {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Default)]
struct SessionState {
    credentials: Option<Credentials>,
    access_token: Option<String>,
}

/// Authenticated DUPR API session.
///
/// Cloning is cheap and clones share the session: a token refreshed through one
/// handle is seen by every other.
#[derive(Debug, Clone)]
pub struct DuprClient {
    http: Client,
    base_url: Url,
    roster_page_size: u32,

    state: Arc<RwLock<SessionState>>,
    login_lock: Arc<Mutex<()>>,
}

impl DuprClient {
    /// Create a new builder.
    pub fn builder() -> DuprClientBuilder {
        DuprClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) const fn roster_page_size(&self) -> u32 {
        self.roster_page_size
    }

    /// The API base every endpoint path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, DuprError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Whether a bearer token is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.access_token.is_some()
    }

    pub(crate) async fn access_token(&self) -> Option<String> {
        self.state.read().await.access_token.clone()
    }

    pub(crate) async fn credentials(&self) -> Option<Credentials> {
        self.state.read().await.credentials.clone()
    }

    async fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.access_token().await {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// POST a JSON body to `path` (relative to the base URL) with the session's bearer token.
    ///
    /// The response is returned whatever its status; callers classify it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built or the request fails in transport.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, DuprError> {
        let url = self.endpoint(path)?;
        let req = self.authorize(self.http.post(url).json(body)).await;
        Ok(req.send().await?)
    }

    /// GET `path` (relative to the base URL) with the session's bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built or the request fails in transport.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, DuprError> {
        let url = self.endpoint(path)?;
        let req = self.authorize(self.http.get(url)).await;
        Ok(req.send().await?)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct DuprClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    credentials: Option<Credentials>,
    preauth_token: Option<String>,
    roster_page_size: Option<u32>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl DuprClientBuilder {
    /// Start from the environment: `DUPR_EMAIL` and `DUPR_PASSWORD` set the
    /// credentials, `DUPR_BASE_URL` overrides the API base.
    ///
    /// # Errors
    ///
    /// Returns an error if `DUPR_BASE_URL` is set but is not a valid URL.
    pub fn from_env() -> Result<Self, DuprError> {
        let mut b = Self::default();
        if let (Ok(email), Ok(password)) = (std::env::var(ENV_EMAIL), std::env::var(ENV_PASSWORD)) {
            b = b.credentials(email, password);
        }
        if let Ok(base) = std::env::var(ENV_BASE_URL) {
            b = b.base_url(Url::parse(&base)?);
        }
        Ok(b)
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the API base (e.g., `https://api.dupr.gg/`).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Credentials used by [`DuprClient::login`] and for reauthentication.
    #[must_use]
    pub fn credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(email, password));
        self
    }

    /// Start with a bearer token already in place (skips the initial login).
    #[must_use]
    pub fn preauth(mut self, token: impl Into<String>) -> Self {
        self.preauth_token = Some(token.into());
        self
    }

    /// Page size used while walking a club roster. Default: 20.
    #[must_use]
    pub const fn roster_page_size(mut self, n: u32) -> Self {
        self.roster_page_size = Some(n);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// # Errors
    ///
    /// Returns an error if the default base URL cannot be parsed or the HTTP client fails to build.
    pub fn build(self) -> Result<DuprClient, DuprError> {
        let mut base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        // `Url::join` drops the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(DuprClient {
            http,
            base_url,
            roster_page_size: self
                .roster_page_size
                .unwrap_or(DEFAULT_ROSTER_PAGE_SIZE)
                .max(1),
            state: Arc::new(RwLock::new(SessionState {
                credentials: self.credentials,
                access_token: self.preauth_token,
            })),
            login_lock: Arc::new(Mutex::new(())),
        })
    }
}
