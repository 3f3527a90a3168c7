//! HTTP Identity Client
//!
//! `reqwest` implementation of [`IdentityGateway`]. Every request carries
//! `Authorization: Bearer <token>` when a token is stored. Idempotent calls
//! are retried on transient failures; login and registration are not.

use std::sync::Arc;

use platform::client::{bearer_header, build_http_client, join_url};
use platform::retry::RetryPolicy;
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::config::SessionConfig;
use crate::domain::entity::{
    access::{PermissionReport, RoleDashboard},
    credentials::{Credentials, RegisterInput},
    user_info::{AuthGrant, UserInfo},
};
use crate::domain::repository::{IdentityGateway, SessionStore};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{SessionError, SessionResult};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const USER_INFO_PATH: &str = "/test/user-info";
pub const PROTECTED_PATH: &str = "/test/protected";
pub const PERMISSIONS_PATH: &str = "/roles/check-permissions";

/// HTTP client for the identity service
pub struct HttpIdentityClient<S>
where
    S: SessionStore + 'static,
{
    http: reqwest::Client,
    base_url: String,
    store: Arc<S>,
    retry: RetryPolicy,
}

impl<S> HttpIdentityClient<S>
where
    S: SessionStore + 'static,
{
    /// Create a client reading tokens from `store`
    pub fn new(config: &SessionConfig, store: Arc<S>) -> SessionResult<Self> {
        let http_config = config.http_client_config();
        let http = build_http_client(&http_config)
            .map_err(|e| SessionError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: http_config.base_url,
            store,
            retry: config.retry.clone(),
        })
    }

    /// Attach the stored token, if any
    fn authorize(&self, request: RequestBuilder) -> SessionResult<RequestBuilder> {
        match self.store.get()? {
            Some(token) => {
                let value = bearer_header(token.as_str()).map_err(|_| SessionError::Unauthorized)?;
                Ok(request.header(AUTHORIZATION, value))
            }
            None => Ok(request),
        }
    }

    async fn get_once(&self, path: &str) -> SessionResult<Response> {
        let request = self.authorize(self.http.get(join_url(&self.base_url, path)))?;
        let response = request.send().await?;
        let status = response.status();

        tracing::debug!(path = %path, status = status.as_u16(), "GET");

        if status.is_success() {
            Ok(response)
        } else {
            Err(SessionError::from_status(status.as_u16()))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> SessionResult<T> {
        self.retry
            .run(
                move || async move {
                    let response = self.get_once(path).await?;
                    let body = response.bytes().await?;
                    Ok::<T, SessionError>(serde_json::from_slice(&body)?)
                },
                SessionError::is_transient,
            )
            .await
    }

    async fn get_text(&self, path: &str) -> SessionResult<String> {
        self.retry
            .run(
                move || async move {
                    let response = self.get_once(path).await?;
                    Ok::<String, SessionError>(response.text().await?)
                },
                SessionError::is_transient,
            )
            .await
    }

    /// POST a credential exchange, mapping rejections with `classify`
    async fn post_grant<B>(
        &self,
        path: &str,
        body: &B,
        classify: fn(StatusCode, String) -> SessionError,
    ) -> SessionResult<AuthGrant>
    where
        B: Serialize + ?Sized,
    {
        let request = self.authorize(self.http.post(join_url(&self.base_url, path)).json(body))?;
        let response = request.send().await?;
        let status = response.status();

        tracing::debug!(path = %path, status = status.as_u16(), "POST");

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify(status, error_message(&detail)));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn classify_login(status: StatusCode, _detail: String) -> SessionError {
    match status.as_u16() {
        400 | 401 | 403 => SessionError::InvalidCredentials,
        code => SessionError::from_status(code),
    }
}

fn classify_register(status: StatusCode, detail: String) -> SessionError {
    match status.as_u16() {
        400 | 409 => SessionError::RegistrationRejected(detail),
        401 | 403 => SessionError::InvalidCredentials,
        code => SessionError::from_status(code),
    }
}

/// Best-effort human message from an error body
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(*key)?.as_str().map(str::to_string))
        });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => "Request was refused".to_string(),
    }
}

/// Unwrap a body that may be a JSON-encoded string
fn plain_text(body: String) -> String {
    match serde_json::from_str::<String>(&body) {
        Ok(text) => text,
        Err(_) => body,
    }
}

impl<S> IdentityGateway for HttpIdentityClient<S>
where
    S: SessionStore + 'static,
{
    async fn login(&self, credentials: &Credentials) -> SessionResult<AuthGrant> {
        tracing::debug!(email = %credentials.email, "Signing in");
        self.post_grant(LOGIN_PATH, credentials, classify_login).await
    }

    async fn register(&self, input: &RegisterInput) -> SessionResult<AuthGrant> {
        tracing::debug!(email = %input.email, "Registering account");
        self.post_grant(REGISTER_PATH, input, classify_register).await
    }

    async fn who_am_i(&self) -> SessionResult<UserInfo> {
        // トークンがなければ問い合わせない
        if self.store.get()?.is_none() {
            return Err(SessionError::Unauthorized);
        }
        self.get_json(USER_INFO_PATH).await
    }

    async fn protected_message(&self) -> SessionResult<String> {
        self.get_text(PROTECTED_PATH).await.map(plain_text)
    }

    async fn check_permissions(&self) -> SessionResult<PermissionReport> {
        self.get_json(PERMISSIONS_PATH).await
    }

    async fn role_dashboard(&self, role: UserRole) -> SessionResult<RoleDashboard> {
        self.get_json(&format!("/roles/{}", role.endpoint_segment()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_login() {
        for code in [400, 401, 403] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(
                classify_login(status, String::new()),
                SessionError::InvalidCredentials
            );
        }
        assert_eq!(
            classify_login(StatusCode::SERVICE_UNAVAILABLE, String::new()),
            SessionError::Server { status: 503 }
        );
    }

    #[test]
    fn test_classify_register() {
        assert_eq!(
            classify_register(StatusCode::BAD_REQUEST, "Email already exists".into()),
            SessionError::RegistrationRejected("Email already exists".into())
        );
        assert_eq!(
            classify_register(StatusCode::UNAUTHORIZED, String::new()),
            SessionError::InvalidCredentials
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"message":"Email taken"}"#), "Email taken");
        assert_eq!(error_message(r#"{"error":"Bad request"}"#), "Bad request");
        assert_eq!(error_message("  plain text "), "plain text");
        assert_eq!(error_message(""), "Request was refused");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("\"hello\"".to_string()), "hello");
        assert_eq!(plain_text("hello".to_string()), "hello");
    }
}
