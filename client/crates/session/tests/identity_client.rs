//! Integration tests for the HTTP identity client using wiremock mock server

use std::sync::Arc;
use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::retry::RetryPolicy;
use serde_json::json;
use session::domain::entity::credentials::Credentials;
use session::domain::repository::{IdentityGateway, SessionStore};
use session::domain::value_object::{session_token::SessionToken, user_role::UserRole};
use session::infra::navigator::NavigationKind;
use session::{
    CookieJarStore, HistoryNavigator, HttpIdentityClient, InMemorySessionStore, SessionConfig,
    SessionContext, SessionError, SessionState,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

fn config(server: &MockServer) -> SessionConfig {
    SessionConfig {
        api_base_url: server.uri(),
        retry: RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            jitter: false,
        },
        ..Default::default()
    }
}

fn client_with_token(
    server: &MockServer,
    token: Option<&str>,
) -> HttpIdentityClient<InMemorySessionStore> {
    let store = match token {
        Some(token) => InMemorySessionStore::with_token(SessionToken::new(token).unwrap()),
        None => InMemorySessionStore::new(),
    };
    HttpIdentityClient::new(&config(server), Arc::new(store)).unwrap()
}

fn user_info_body() -> serde_json::Value {
    json!({
        "id": 1,
        "email": "a@x.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "role": "ADMIN"
    })
}

#[tokio::test]
async fn test_who_am_i_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test/user-info"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_info_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_token(&mock_server, Some("tok-123"));
    let info = client.who_am_i().await.unwrap();

    assert_eq!(info.id.value(), 1);
    assert_eq!(info.email.as_str(), "a@x.com");
    assert_eq!(info.role, UserRole::Admin);
}

#[tokio::test]
async fn test_who_am_i_without_token_skips_request() {
    let mock_server = MockServer::start().await;

    let client = client_with_token(&mock_server, None);
    let err = client.who_am_i().await.unwrap_err();

    assert_eq!(err, SessionError::Unauthorized);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_omits_authorization_without_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@x.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-new",
            "email": "a@x.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "role": "MANAGER"
        })))
        .mount(&mock_server)
        .await;

    let client = client_with_token(&mock_server, None);
    let creds = Credentials::new("a@x.com", "secret").unwrap();
    let grant = client.login(&creds).await.unwrap();

    assert_eq!(grant.token, "tok-new");
    assert_eq!(grant.role, UserRole::Manager);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_rejected_is_invalid_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_token(&mock_server, None);
    let creds = Credentials::new("a@x.com", "wrong").unwrap();
    let err = client.login(&creds).await.unwrap_err();

    assert_eq!(err, SessionError::InvalidCredentials);
}

#[tokio::test]
async fn test_who_am_i_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test/user-info"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_token(&mock_server, Some("tok-expired"));
    let err = client.who_am_i().await.unwrap_err();

    assert_eq!(err, SessionError::Unauthorized);
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test/user-info"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/test/user-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_info_body()))
        .mount(&mock_server)
        .await;

    let client = client_with_token(&mock_server, Some("tok"));
    let info = client.who_am_i().await.unwrap();

    assert_eq!(info.email.as_str(), "a@x.com");
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_server_error_gives_up_after_max_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/roles/check-permissions"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client_with_token(&mock_server, Some("tok"));
    let err = client.check_permissions().await.unwrap_err();

    assert_eq!(err, SessionError::Server { status: 502 });
}

#[tokio::test]
async fn test_check_permissions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/roles/check-permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "role": "EMPLOYEE",
            "permissions": {
                "canAccessAdmin": false,
                "canAccessEmployee": true,
                "canAccessManager": false,
                "canManageUsers": false,
                "canManageEmployees": false,
                "canManageTeam": false
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_with_token(&mock_server, Some("tok"));
    let report = client.check_permissions().await.unwrap();

    assert_eq!(report.role, UserRole::Employee);
    assert_eq!(report.permissions, UserRole::Employee.permissions());
}

#[tokio::test]
async fn test_role_dashboard_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/roles/admin"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_token(&mock_server, Some("tok"));
    let err = client.role_dashboard(UserRole::Admin).await.unwrap_err();

    assert_eq!(err, SessionError::Forbidden);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test/user-info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_token(&mock_server, Some("tok"));
    let err = client.who_am_i().await.unwrap_err();

    assert!(matches!(err, SessionError::Decode(_)));
}

#[tokio::test]
async fn test_expired_token_mid_session_clears_cookie_jar() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("cookies.jar");
    std::fs::write(&jar, "theme=dark\n").unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-live",
            "email": "a@x.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "role": "EMPLOYEE"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/test/protected"))
        .and(header("authorization", "Bearer tok-live"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Arc::new(config(&mock_server));
    let store = Arc::new(CookieJarStore::new(&jar, CookieConfig::default()));
    let gateway = Arc::new(HttpIdentityClient::new(&config, store.clone()).unwrap());
    let navigator = Arc::new(HistoryNavigator::new());
    let ctx = SessionContext::new(store.clone(), gateway, navigator.clone(), config);

    ctx.mount().await;
    assert_eq!(ctx.state(), SessionState::Anonymous);

    ctx.login("a@x.com", "secret").await.unwrap();
    assert_eq!(store.get().unwrap().unwrap().as_str(), "tok-live");

    let err = ctx.protected_message().await.unwrap_err();
    assert_eq!(err, SessionError::Unauthorized);

    assert_eq!(ctx.state(), SessionState::Anonymous);
    assert_eq!(store.get().unwrap(), None);
    assert_eq!(std::fs::read_to_string(&jar).unwrap(), "theme=dark\n");

    let last = navigator.history().pop().unwrap();
    assert_eq!(last.kind, NavigationKind::Hard);
    assert_eq!(last.path, "/login");
}

#[tokio::test]
async fn test_reload_restores_session_from_cookie_jar() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("cookies.jar");
    std::fs::write(&jar, "token=tok-persisted\n").unwrap();

    Mock::given(method("GET"))
        .and(path("/test/user-info"))
        .and(header("authorization", "Bearer tok-persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_info_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Arc::new(config(&mock_server));
    let store = Arc::new(CookieJarStore::new(&jar, CookieConfig::default()));
    let gateway = Arc::new(HttpIdentityClient::new(&config, store.clone()).unwrap());
    let ctx = SessionContext::new(store, gateway, Arc::new(HistoryNavigator::new()), config);

    ctx.mount().await;

    let identity = ctx.identity().unwrap();
    assert_eq!(identity.token.as_str(), "tok-persisted");
    assert_eq!(identity.role, UserRole::Admin);
}

#[tokio::test]
async fn test_mount_resolves_account_without_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test/user-info"))
        .and(header("authorization", "Bearer tok-nameless"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "email": "nameless@x.com",
            "firstName": null,
            "lastName": null,
            "role": "EMPLOYEE"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Arc::new(config(&mock_server));
    let store = Arc::new(InMemorySessionStore::with_token(
        SessionToken::new("tok-nameless").unwrap(),
    ));
    let gateway = Arc::new(HttpIdentityClient::new(&config, store.clone()).unwrap());
    let ctx = SessionContext::new(store.clone(), gateway, Arc::new(HistoryNavigator::new()), config);

    ctx.mount().await;

    let identity = ctx.identity().unwrap();
    assert_eq!(identity.token.as_str(), "tok-nameless");
    assert_eq!(identity.display_name(), "nameless@x.com");
    assert!(store.has_token());
}

#[tokio::test]
async fn test_login_accepts_grant_without_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-fresh",
            "email": "a@x.com",
            "firstName": null,
            "lastName": null,
            "role": "MANAGER"
        })))
        .mount(&mock_server)
        .await;

    let config = Arc::new(config(&mock_server));
    let store = Arc::new(InMemorySessionStore::new());
    let gateway = Arc::new(HttpIdentityClient::new(&config, store.clone()).unwrap());
    let ctx = SessionContext::new(store.clone(), gateway, Arc::new(HistoryNavigator::new()), config);

    ctx.mount().await;
    let identity = ctx.login("a@x.com", "secret").await.unwrap();

    assert_eq!(identity.role, UserRole::Manager);
    assert_eq!(store.get().unwrap().unwrap().as_str(), "tok-fresh");
}
