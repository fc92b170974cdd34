//! Main client entry point.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::api;
use crate::config;
use crate::error::{Error, Result};
use crate::models::auth::{AdminProfile, LoginRequest};
use crate::session::{FileSessionStorage, SessionStore, SessionStorage};
use crate::surface::{Navigator, Notifier};
use crate::transport::http::HttpClient;

/// Console API client.
///
/// Owns the session store and the authenticated request pipeline; the
/// resource wrappers in [`crate::api`] run through [`ConsoleClient::http`].
///
/// # Examples
///
/// ```rust,no_run
/// use console_client::{ConsoleClient, PageQuery};
///
/// # async fn example() -> console_client::Result<()> {
/// let client = ConsoleClient::builder()
///     .base_url("https://console.example.com")
///     .build()
///     .await?;
///
/// client.login("admin", "secret").await?;
/// let users = console_client::api::users::list(client.http(), &PageQuery::page(1, 20)).await?;
/// println!("{} users", users.total);
/// # Ok(())
/// # }
/// ```
pub struct ConsoleClient {
    session: Arc<SessionStore>,
    http: Arc<HttpClient>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl ConsoleClient {
    /// Create a builder for configuring the client.
    pub fn builder() -> ConsoleClientBuilder {
        ConsoleClientBuilder::new()
    }

    /// Log in, store the returned credential, and cache the profile.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminProfile> {
        let request = LoginRequest::new(username, password);
        let response = api::auth::login(&self.http, &self.login_path, &request).await?;
        self.session.set_token(response.token).await?;
        info!(username, "Logged in");

        // The profile fetch rides on the freshly stored credential; a failure
        // here fails the login as a whole.
        self.fetch_profile().await
    }

    /// Log out: best-effort server call, then local teardown and immediate
    /// navigation to login. No grace delay; the user asked to leave.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = api::auth::logout(&self.http).await {
            debug!("Server-side logout failed: {}", e);
        }
        self.http.cancel_redirect().await;
        self.session.clear().await?;
        self.navigator.go_to_login();
        Ok(())
    }

    /// Explicitly refresh the cached profile snapshot.
    ///
    /// Requires a stored credential; without one the call short-circuits
    /// instead of sending a request the server would only 401.
    pub async fn fetch_profile(&self) -> Result<AdminProfile> {
        if !self.session.is_authenticated().await {
            return Err(Error::NotAuthenticated);
        }
        let profile = api::auth::get_profile(&self.http).await?;
        self.session.set_profile(profile.clone()).await?;
        Ok(profile)
    }

    /// Whether a non-blank credential is stored.
    pub async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    /// The session store.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// The request pipeline, for the resource wrappers in [`crate::api`].
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }
}

impl std::fmt::Debug for ConsoleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleClient")
            .field("session", &self.session)
            .field("login_path", &self.login_path)
            .finish()
    }
}

/// Builder for [`ConsoleClient`].
pub struct ConsoleClientBuilder {
    base_url: Option<String>,
    storage: Option<Arc<dyn SessionStorage>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
    redirect_delay: Option<Duration>,
    reqwest_client: Option<reqwest::Client>,
    login_path: Option<String>,
}

impl ConsoleClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            storage: None,
            notifier: None,
            navigator: None,
            redirect_delay: None,
            reqwest_client: None,
            login_path: None,
        }
    }

    /// Base URL of the console backend. Required.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Session persistence backend. Defaults to the JSON session file under
    /// the user config directory.
    pub fn storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Notification surface for user-visible error messages.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Navigation surface for the go-to-login side effect.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Delay before the deferred redirect fires.
    pub fn redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = Some(delay);
        self
    }

    /// Use a custom reqwest client.
    pub fn reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.reqwest_client = Some(client);
        self
    }

    /// Login endpoint path; deployments with a versioned admin login route
    /// set it here. Defaults to `/auth/login`.
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Build the client, hydrating the session from storage.
    pub async fn build(self) -> Result<ConsoleClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".into()))?;

        let storage: Arc<dyn SessionStorage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(FileSessionStorage::default_path()?),
        };
        let session = Arc::new(SessionStore::open(storage).await?);

        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(crate::surface::NoopNavigator));

        let mut http = HttpClient::new(base_url, Arc::clone(&session))
            .with_navigator(Arc::clone(&navigator));
        if let Some(notifier) = self.notifier {
            http = http.with_notifier(notifier);
        }
        if let Some(delay) = self.redirect_delay {
            http = http.with_redirect_delay(delay);
        }
        if let Some(client) = self.reqwest_client {
            http = http.with_client(client);
        }

        info!("ConsoleClient initialized");
        Ok(ConsoleClient {
            session,
            http: Arc::new(http),
            navigator,
            login_path: self
                .login_path
                .unwrap_or_else(|| config::DEFAULT_LOGIN_PATH.to_string()),
        })
    }
}

impl Default for ConsoleClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
