//! Pipeline orchestrator.
//!
//! Wraps a `reqwest::Client` with the two interceptor stages: credential
//! injection on the way out, classification on the way in. Side effects
//! (notification, session teardown, deferred redirect) all live here so the
//! classifier stays pure. No call is ever retried; every failure is terminal
//! for that call and callers resubmit if they want to.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::{self, CONNECT_TIMEOUT, REQUEST_TIMEOUT};
use crate::error::{Error, Result};
use crate::models::envelope::Envelope;
use crate::session::SessionStore;
use crate::surface::{Navigator, NoopNavigator, Notifier, TracingNotifier};
use crate::transport::classify::{self, Outcome};
use crate::transport::headers;

/// A pending deferred redirect to the login entry point.
///
/// Represented as an explicit handle so tests (and logout) can observe or
/// cancel the scheduled navigation instead of racing a real clock.
#[derive(Debug)]
pub struct ScheduledRedirect {
    handle: JoinHandle<()>,
}

impl ScheduledRedirect {
    fn spawn(delay: Duration, navigator: Arc<dyn Navigator>) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("Redirecting to login");
            navigator.go_to_login();
        });
        Self { handle }
    }

    /// Whether the redirect has not fired yet.
    pub fn is_pending(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the redirect before it fires.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

/// HTTP client for the console API with credential injection and centralized
/// error classification.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    redirect_delay: Duration,
    pending_redirect: Mutex<Option<ScheduledRedirect>>,
}

impl HttpClient {
    /// Create a new pipeline over the given session store.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            session,
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(NoopNavigator),
            redirect_delay: config::REDIRECT_DELAY,
            pending_redirect: Mutex::new(None),
        }
    }

    /// Replace the notification surface.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the navigation surface.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Override the redirect delay (tests use a short one).
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Use a custom reqwest client (custom TLS, proxies, timeouts).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The session store this pipeline reads credentials from.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Send a GET request.
    pub async fn get<Q>(&self, path: &str, query: Option<&Q>) -> Result<serde_json::Value>
    where
        Q: Serialize + ?Sized + Sync,
    {
        let mut req = self.prepare(Method::GET, path).await;
        if let Some(query) = query {
            req = req.map(|r| r.query(query));
        }
        self.dispatch(req).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<serde_json::Value>
    where
        B: Serialize + ?Sized + Sync,
    {
        let req = self.prepare(Method::POST, path).await.map(|r| r.json(body));
        self.dispatch(req).await
    }

    /// Send a POST request with no body.
    pub async fn post_empty(&self, path: &str) -> Result<serde_json::Value> {
        let req = self.prepare(Method::POST, path).await;
        self.dispatch(req).await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<serde_json::Value>
    where
        B: Serialize + ?Sized + Sync,
    {
        let req = self.prepare(Method::PUT, path).await.map(|r| r.json(body));
        self.dispatch(req).await
    }

    /// Send a DELETE request, optionally with query parameters.
    pub async fn delete<Q>(&self, path: &str, query: Option<&Q>) -> Result<serde_json::Value>
    where
        Q: Serialize + ?Sized + Sync,
    {
        let mut req = self.prepare(Method::DELETE, path).await;
        if let Some(query) = query {
            req = req.map(|r| r.query(query));
        }
        self.dispatch(req).await
    }

    /// Whether a deferred redirect is currently scheduled and has not fired.
    pub async fn redirect_pending(&self) -> bool {
        self.pending_redirect
            .lock()
            .await
            .as_ref()
            .is_some_and(ScheduledRedirect::is_pending)
    }

    /// Cancel any pending deferred redirect (used by explicit logout, which
    /// navigates immediately).
    pub async fn cancel_redirect(&self) {
        if let Some(redirect) = self.pending_redirect.lock().await.take() {
            redirect.cancel();
        }
    }

    /// Outbound stage: resolve the URL and attach headers, injecting the
    /// bearer credential when one is stored. A credential that cannot be
    /// encoded fails here, before the call is attempted.
    async fn prepare(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = config::join_url(&self.base_url, path);
        let token = self.session.token().await;
        debug!(%method, %url, authenticated = token.is_some(), "Dispatching request");
        let headers = headers::request_headers(token.as_deref())?;
        Ok(self.client.request(method, url).headers(headers))
    }

    /// Inbound stage: classify the result and interpret the outcome.
    async fn dispatch(&self, req: Result<reqwest::RequestBuilder>) -> Result<serde_json::Value> {
        let req = match req {
            // Request construction failed; surface without attempting the call
            Err(e) => return self.fail(e),
            Ok(req) => req,
        };
        let response = match req.send().await {
            Ok(response) => response,
            // No-response failures land here; none touches session state
            Err(e) => return self.fail(classify::classify_send_error(e)),
        };

        let status = response.status();
        let envelope = if status.is_success() {
            response.json::<Envelope>().await.ok()
        } else {
            None
        };

        match classify::classify_response(status, envelope) {
            Outcome::Success(data) => Ok(data),
            Outcome::Business { code, message } => self.fail(Error::Business { code, message }),
            Outcome::Transport(err) => self.fail(err),
            Outcome::SessionInvalid => self.invalidate_session().await,
        }
    }

    /// Surface an error through the notifier and return it to the caller.
    /// Both channels are mandatory: a caller that ignores the rejection still
    /// observes the notification.
    fn fail(&self, err: Error) -> Result<serde_json::Value> {
        self.notifier.error(&err.user_message());
        Err(err)
    }

    /// Recovery for session-invalidating outcomes: tear down the stored
    /// credential, schedule the deferred redirect, surface the message.
    async fn invalidate_session(&self) -> Result<serde_json::Value> {
        warn!("Session invalidated by server response");
        if let Err(e) = self.session.clear().await {
            warn!("Failed to clear session: {}", e);
        }
        self.schedule_redirect().await;
        self.fail(Error::SessionExpired)
    }

    /// Schedule the redirect unless one is already pending. Once navigation
    /// is committed there is nothing to gain from stacking timers.
    async fn schedule_redirect(&self) {
        let mut pending = self.pending_redirect.lock().await;
        if pending.as_ref().is_some_and(ScheduledRedirect::is_pending) {
            debug!("Redirect already pending");
            return;
        }
        *pending = Some(ScheduledRedirect::spawn(
            self.redirect_delay,
            Arc::clone(&self.navigator),
        ));
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}
