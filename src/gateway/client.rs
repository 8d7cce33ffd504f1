//! The token gateway: the sole place where the bearer token is read,
//! attached to outgoing requests, and where authentication failures are
//! detected and handled.
//!
//! The 401 policy is global: any bearer-authenticated call that comes back
//! unauthorized clears the stored token and fires the injected
//! session-expired hook, no matter which endpoint triggered it. The two
//! credential-exchange endpoints (`register`, `login`) are exempt so their
//! failures can be shown on the form that initiated them.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use http::StatusCode;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::ApiError;
use crate::config::ApiConfig;
use crate::models::{TokenResponse, User};
use crate::storage::{Store, ACCESS_TOKEN_KEY};

/// Invoked whenever the global 401 policy fires. The hosting application
/// wires this to its own session teardown and navigation; the gateway never
/// navigates by itself. Must be safe to invoke redundantly.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Error body shape the backend uses for all failures.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

pub struct ApiGateway {
    http: Client,
    base_url: String,
    store: Arc<dyn Store>,
    on_session_expired: Mutex<Option<SessionExpiredHook>>,
}

impl ApiGateway {
    pub fn new(config: &ApiConfig, store: Arc<dyn Store>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()
            .expect("Could not build the HTTP client");

        ApiGateway {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            on_session_expired: Mutex::new(None),
        }
    }

    /// Install the session-expired hook. Replaces any previous hook.
    pub fn set_session_expired_hook(&self, hook: SessionExpiredHook) {
        if let Ok(mut guard) = self.on_session_expired.lock() {
            *guard = Some(hook);
        }
    }

    /// Build a request with the bearer header attached when a token exists.
    /// Calls proceed without the header if no token is stored; the server
    /// will reject them.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, url);
        match self.store.get(ACCESS_TOKEN_KEY) {
            Ok(Some(token)) => req = req.bearer_auth(token),
            Ok(None) => {}
            Err(e) => warn!("Could not read the stored token: {}", e),
        }
        req
    }

    /// Send a bearer-authenticated request under the global expiry policy.
    async fn run(&self, req: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, path, "Sending API request");

        let response = req.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        debug!(%request_id, path, status = %status, "API response received");

        if status == StatusCode::UNAUTHORIZED {
            self.handle_expired(path);
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(ApiError::Api { status, message });
        }
        Ok(response)
    }

    /// Send a credential-exchange request. No expiry interception here:
    /// a 401 from `/auth/login` means wrong credentials, not an expired
    /// session, and must reach the form verbatim.
    async fn run_public(&self, req: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, path, "Sending credential-exchange request");

        let response = req.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        debug!(%request_id, path, status = %status, "Credential-exchange response received");

        if status.is_success() {
            return Ok(response);
        }
        let message = error_message(response).await;
        if status.is_client_error() {
            Err(ApiError::Credentials(message))
        } else {
            Err(ApiError::Api { status, message })
        }
    }

    /// The global expiry policy: clear the stored token and signal the host.
    /// Clearing an already-cleared token and signalling redundantly are both
    /// harmless, so concurrent 401s need no coordination.
    fn handle_expired(&self, path: &str) {
        warn!(path, "Server returned 401; clearing stored token and signalling session expiry");
        if let Err(e) = self.store.remove(ACCESS_TOKEN_KEY) {
            warn!("Could not clear the stored token: {}", e);
        }
        let hook = self
            .on_session_expired
            .lock()
            .ok()
            .and_then(|guard| guard.clone());
        if let Some(hook) = hook {
            hook();
        }
    }

    // --- Auth endpoints

    /// `POST /auth/register`: create an account. Returns the created user;
    /// the caller still has to log in (the server issues no token here).
    pub async fn register(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let req = self
            .request(Method::POST, "/auth/register")
            .json(&serde_json::json!({ "email": email, "password": password }));
        let response = self.run_public(req, "/auth/register").await?;
        response.json::<User>().await.map_err(ApiError::from_reqwest)
    }

    /// `POST /auth/login`: exchange credentials for a bearer token. The
    /// server speaks the OAuth2 password flow, so the email travels as the
    /// form-encoded `username` field.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let req = self
            .request(Method::POST, "/auth/login")
            .form(&[("username", email), ("password", password)]);
        let response = self.run_public(req, "/auth/login").await?;
        response
            .json::<TokenResponse>()
            .await
            .map_err(ApiError::from_reqwest)
    }

    /// `GET /auth/me`: fetch the identity record for the stored token. This
    /// is the only way token validity is ever confirmed.
    pub async fn fetch_me(&self) -> Result<User, ApiError> {
        let response = self.run(self.request(Method::GET, "/auth/me"), "/auth/me").await?;
        response.json::<User>().await.map_err(ApiError::from_reqwest)
    }

    // --- OAuth redirect targets. Pure URL construction, no token handling.

    pub fn google_auth_url(&self) -> String {
        format!("{}/auth/google", self.base_url)
    }

    pub fn github_auth_url(&self) -> String {
        format!("{}/auth/github", self.base_url)
    }

    // --- Generic JSON helpers for the typed endpoint wrappers.

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut req = self.request(Method::GET, path);
        if !query.is_empty() {
            req = req.query(query);
        }
        let response = self.run(req, path).await?;
        response.json::<T>().await.map_err(ApiError::from_reqwest)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.request(Method::POST, path).json(body);
        let response = self.run(req, path).await?;
        response.json::<T>().await.map_err(ApiError::from_reqwest)
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.request(Method::PUT, path).json(body);
        let response = self.run(req, path).await?;
        response.json::<T>().await.map_err(ApiError::from_reqwest)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.run(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }
}

/// Pull the human-readable message out of an error response. The backend
/// wraps everything as `{"detail": "..."}`; fall back to the raw body.
async fn error_message(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.detail,
        Err(_) if !body.trim().is_empty() => body,
        Err(_) => "request failed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::MemoryStore;

    fn gateway_for(url: &str) -> ApiGateway {
        let config = ApiConfig {
            base_url: url.to_string(),
            timeout_in_ms: 10_000,
        };
        ApiGateway::new(&config, Arc::new(MemoryStore::new()))
    }

    /// The OAuth redirect URLs are the base address plus a fixed path.
    #[test]
    fn test_oauth_urls() {
        let gateway = gateway_for("http://localhost:8000");
        assert_eq!(gateway.google_auth_url(), "http://localhost:8000/auth/google");
        assert_eq!(gateway.github_auth_url(), "http://localhost:8000/auth/github");
    }

    /// A trailing slash on the configured base URL must not double up.
    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let gateway = gateway_for("http://localhost:8000/");
        assert_eq!(gateway.github_auth_url(), "http://localhost:8000/auth/github");
    }

    /// Test that a successful login returns the token payload.
    #[tokio::test]
    async fn test_login_success() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "tok-abc", "token_type": "bearer"}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server.url());
        let token = gateway.login("a@b.com", "secret").await.expect("login should succeed");
        m.assert_async().await;
        assert_eq!(token.access_token, "tok-abc");
    }

    /// A 401 from the login endpoint is a credential error, not an expired
    /// session: the stored token survives and no hook fires.
    #[tokio::test]
    async fn test_login_failure_is_credentials_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "Incorrect email or password"}"#)
            .create_async()
            .await;

        let store = Arc::new(MemoryStore::new());
        store.set(ACCESS_TOKEN_KEY, "existing-token").unwrap();
        let config = ApiConfig {
            base_url: server.url(),
            timeout_in_ms: 10_000,
        };
        let gateway = ApiGateway::new(&config, store.clone());

        let err = gateway.login("a@b.com", "wrong").await.unwrap_err();
        match err {
            ApiError::Credentials(message) => assert_eq!(message, "Incorrect email or password"),
            other => panic!("expected Credentials error, got {:?}", other),
        }
        // The previously stored token was not touched.
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Ok(Some("existing-token".to_string())));
    }

    /// A 401 on a bearer-authenticated call clears the token and fires the
    /// session-expired hook.
    #[tokio::test]
    async fn test_unauthorized_clears_token_and_fires_hook() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/auth/me")
            .with_status(401)
            .with_body(r#"{"detail": "Could not validate credentials"}"#)
            .create_async()
            .await;

        let store = Arc::new(MemoryStore::new());
        store.set(ACCESS_TOKEN_KEY, "stale-token").unwrap();
        let config = ApiConfig {
            base_url: server.url(),
            timeout_in_ms: 10_000,
        };
        let gateway = ApiGateway::new(&config, store.clone());

        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        gateway.set_session_expired_hook(Arc::new(move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let err = gateway.fetch_me().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Ok(None));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    /// Non-401 server errors map to Api with the backend's detail message.
    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/auth/me")
            .with_status(500)
            .with_body(r#"{"detail": "boom"}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server.url());
        let err = gateway.fetch_me().await.unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
