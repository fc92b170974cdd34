//! Contract tests for the authenticated request pipeline against a mock
//! backend: credential injection, classification, and session recovery.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use console_client::transport::http::HttpClient;
use console_client::{
    ConsoleClient, Error, MemorySessionStorage, Navigator, Notifier, SessionStore,
};

const REDIRECT_DELAY: Duration = Duration::from_millis(50);

/// Route pipeline tracing through the test harness; `RUST_LOG` controls
/// verbosity when a test needs debugging.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
struct RecordingNavigator {
    calls: AtomicUsize,
}

impl RecordingNavigator {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn go_to_login(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    http: HttpClient,
    session: Arc<SessionStore>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
}

fn harness(base_url: &str) -> Harness {
    init_tracing();
    let session = Arc::new(SessionStore::in_memory());
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let http = HttpClient::new(base_url, Arc::clone(&session))
        .with_notifier(Arc::clone(&notifier) as Arc<dyn Notifier>)
        .with_navigator(Arc::clone(&navigator) as Arc<dyn Navigator>)
        .with_redirect_delay(REDIRECT_DELAY);
    Harness {
        http,
        session,
        notifier,
        navigator,
    }
}

fn ok_envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 200, "msg": "ok", "data": data}))
}

#[tokio::test]
async fn test_no_credential_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ok_envelope(json!(null)))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.http.get::<()>("/ping", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_stored_credential_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ok_envelope(json!(null)))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.session.set_token("tok-123").await.unwrap();
    h.http.get::<()>("/ping", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        "Bearer tok-123"
    );
}

#[tokio::test]
async fn test_success_payload_unwrapped_and_silent() {
    let server = MockServer::start().await;
    let data = json!({"id": 7, "list": ["a", "b"], "total": 2});
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ok_envelope(data.clone()))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    let payload = h.http.get::<()>("/users", None).await.unwrap();

    // Callers receive exactly the data field, not the envelope
    assert_eq!(payload, data);
    assert!(h.notifier.messages().is_empty());
    assert!(!h.http.redirect_pending().await);
}

#[tokio::test]
async fn test_http_401_clears_session_and_schedules_redirect_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.session.set_token("tok-123").await.unwrap();

    let err = h.http.get::<()>("/users", None).await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired));

    // Credential torn down, redirect deferred but scheduled
    assert!(h.session.token().await.is_none());
    assert!(h.http.redirect_pending().await);
    assert_eq!(h.navigator.calls(), 0);
    assert_eq!(
        h.notifier.messages(),
        vec!["session expired, please log in again".to_string()]
    );

    tokio::time::sleep(REDIRECT_DELAY * 4).await;
    assert_eq!(h.navigator.calls(), 1);
    assert!(!h.http.redirect_pending().await);
}

#[tokio::test]
async fn test_embedded_401_behaves_like_http_401() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 401, "msg": "token expired", "data": null})),
        )
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.session.set_token("tok-123").await.unwrap();

    let err = h.http.get::<()>("/users", None).await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired));
    assert!(h.session.token().await.is_none());
    assert!(h.http.redirect_pending().await);

    tokio::time::sleep(REDIRECT_DELAY * 4).await;
    assert_eq!(h.navigator.calls(), 1);
}

#[tokio::test]
async fn test_second_session_invalid_does_not_stack_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.session.set_token("tok-123").await.unwrap();

    h.http.get::<()>("/users", None).await.unwrap_err();
    h.http.get::<()>("/users", None).await.unwrap_err();

    tokio::time::sleep(REDIRECT_DELAY * 4).await;
    assert_eq!(h.navigator.calls(), 1);
    // Both failures were surfaced, though
    assert_eq!(h.notifier.messages().len(), 2);
}

#[tokio::test]
async fn test_business_error_rejects_keeps_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 400, "msg": "name already taken", "data": null})),
        )
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.session.set_token("tok-123").await.unwrap();

    let err = h.http.post("/users", &json!({"username": "x"})).await.unwrap_err();
    match err {
        Error::Business { code, ref message } => {
            assert_eq!(code, 400);
            assert_eq!(message, "name already taken");
        }
        other => panic!("expected business error, got {:?}", other),
    }

    // Session untouched, no redirect, message surfaced verbatim
    assert_eq!(h.session.token().await.as_deref(), Some("tok-123"));
    assert!(!h.http.redirect_pending().await);
    assert_eq!(h.notifier.messages(), vec!["name already taken".to_string()]);
}

#[tokio::test]
async fn test_business_error_message_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 500, "data": null})),
        )
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.http.get::<()>("/users", None).await.unwrap_err();
    assert_eq!(h.notifier.messages(), vec!["system error".to_string()]);
}

#[tokio::test]
async fn test_404_and_500_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.session.set_token("tok-123").await.unwrap();

    h.http.get::<()>("/missing", None).await.unwrap_err();
    h.http.get::<()>("/broken", None).await.unwrap_err();

    assert_eq!(
        h.notifier.messages(),
        vec![
            "requested resource not found".to_string(),
            "internal server error".to_string(),
        ]
    );
    // Neither status touches the session
    assert_eq!(h.session.token().await.as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn test_other_status_message_includes_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.http.get::<()>("/busy", None).await.unwrap_err();
    assert_eq!(h.notifier.messages(), vec!["request failed (503)".to_string()]);
}

#[tokio::test]
async fn test_timeout_and_connect_failure_messages_are_distinct() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ok_envelope(json!(null)).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    // Short timeout so the delayed response classifies as a timeout
    let slow = harness(&server.uri());
    let slow_http = slow.http.with_client(
        reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap(),
    );
    let err = slow_http.get::<()>("/slow", None).await.unwrap_err();
    assert!(matches!(err, Error::Timeout));

    // Nothing listens on this port, so the call fails to connect
    let dead = harness("http://127.0.0.1:9");
    let err = dead.http.get::<()>("/ping", None).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));

    let timeout_msg = slow.notifier.messages()[0].clone();
    let network_msg = dead.notifier.messages()[0].clone();
    let generic_msg = Error::NoResponse("connection reset".into()).user_message();

    assert_eq!(timeout_msg, "request timed out, try again");
    assert_eq!(network_msg, "network error, check your connection");
    assert_ne!(timeout_msg, network_msg);
    assert_ne!(timeout_msg, generic_msg);
    assert_ne!(network_msg, generic_msg);

    // Transport failures never tear the session down
    assert!(!slow_http.redirect_pending().await);
    assert!(!dead.http.redirect_pending().await);
}

#[tokio::test]
async fn test_malformed_credential_fails_without_dispatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ok_envelope(json!(null)))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.session.set_token("tok\nwith-newline").await.unwrap();

    let err = h.http.get::<()>("/users", None).await.unwrap_err();
    assert!(matches!(err, Error::Request(_)));

    // Surfaced through the notifier, never sent, session left alone
    assert_eq!(
        h.notifier.messages(),
        vec!["request failed, please try again".to_string()]
    );
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(h.session.token().await.is_some());
    assert!(!h.http.redirect_pending().await);
}

#[tokio::test]
async fn test_undecodable_success_body_rejects_generically() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weird"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    let err = h.http.get::<()>("/weird", None).await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert_eq!(
        h.notifier.messages(),
        vec!["request failed, please try again".to_string()]
    );
}

// ── Client-level flows ──────────────────────────────────────────────────────

async fn mock_login_endpoints(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ok_envelope(json!({"token": "tok-login"})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/info"))
        .respond_with(ok_envelope(json!({
            "id": 1,
            "username": "admin",
            "roles": ["admin"]
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ok_envelope(json!(null)))
        .mount(server)
        .await;
}

async fn client_with(
    server: &MockServer,
    navigator: Arc<RecordingNavigator>,
) -> ConsoleClient {
    init_tracing();
    ConsoleClient::builder()
        .base_url(server.uri())
        .storage(Arc::new(MemorySessionStorage::new()))
        .notifier(Arc::new(RecordingNotifier::default()))
        .navigator(navigator)
        .redirect_delay(REDIRECT_DELAY)
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_login_stores_token_and_profile() {
    let server = MockServer::start().await;
    mock_login_endpoints(&server).await;

    let client = client_with(&server, Arc::new(RecordingNavigator::default())).await;
    assert!(!client.is_authenticated().await);

    let profile = client.login("admin", "secret").await.unwrap();
    assert_eq!(profile.username, "admin");
    assert!(client.is_authenticated().await);
    assert_eq!(client.session().token().await.as_deref(), Some("tok-login"));
    assert_eq!(client.session().profile().await.unwrap().roles, vec!["admin"]);

    // The profile fetch carried the freshly stored credential
    let requests = server.received_requests().await.unwrap();
    let info_req = requests
        .iter()
        .find(|r| r.url.path() == "/auth/info")
        .unwrap();
    assert_eq!(
        info_req.headers.get("authorization").unwrap(),
        "Bearer tok-login"
    );
}

#[tokio::test]
async fn test_fetch_profile_without_credential_short_circuits() {
    let server = MockServer::start().await;
    mock_login_endpoints(&server).await;

    let client = client_with(&server, Arc::new(RecordingNavigator::default())).await;
    let err = client.fetch_profile().await.unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));

    // The server never saw a doomed profile request
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_clears_session_and_navigates_immediately() {
    let server = MockServer::start().await;
    mock_login_endpoints(&server).await;

    let navigator = Arc::new(RecordingNavigator::default());
    let client = client_with(&server, Arc::clone(&navigator)).await;
    client.login("admin", "secret").await.unwrap();

    client.logout().await.unwrap();
    assert!(!client.is_authenticated().await);
    assert!(client.session().profile().await.is_none());
    assert_eq!(navigator.calls(), 1);
    assert!(!client.http().redirect_pending().await);
}
