//! OAuth callback reconciliation: the one-shot step that completes a
//! third-party login round trip from the redirect's query parameters.

use tracing::warn;
use url::form_urlencoded;

use super::store::SessionStore;

/// Shown when the provider redirected back with neither a token nor an
/// error parameter.
pub const MISSING_TOKEN_ERROR: &str = "No token received";

/// Where the hosting application should navigate after reconciliation.
/// Returned as data; this crate never performs navigation itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Home,
    Login { error: Option<String> },
}

/// The parameters carried by the OAuth redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    pub token: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Parse a redirect query string. A leading '?' is tolerated so callers
    /// can pass either the raw query or the tail of the URL.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut token = None;
        let mut error = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "token" => token = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }
        CallbackParams { token, error }
    }
}

/// Complete the round trip. One shot per redirect landing; never retries.
///
/// A provider error (or a missing token) routes back to the login surface
/// with the message, leaving session state untouched. A token is handed to
/// the session store and the caller is sent home; if the token turns out
/// to be invalid the session has already settled back to unauthenticated,
/// and the route guard on the home surface bounces.
pub async fn reconcile(store: &SessionStore, query: &str) -> Navigation {
    let params = CallbackParams::parse(query);

    if let Some(error) = params.error {
        warn!(error = %error, "OAuth provider returned an error");
        return Navigation::Login { error: Some(error) };
    }

    match params.token {
        Some(token) => {
            if let Err(e) = store.handle_oauth_callback(&token).await {
                warn!("OAuth token failed validation: {}", e);
            }
            Navigation::Home
        }
        None => {
            warn!("OAuth callback carried neither a token nor an error");
            Navigation::Login {
                error: Some(MISSING_TOKEN_ERROR.to_string()),
            }
        }
    }
}
