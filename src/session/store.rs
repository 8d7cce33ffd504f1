//! The session store: the single authoritative in-memory representation of
//! "who is logged in", broadcast to subscribers through a watch channel.
//!
//! All writes go through the operations on `SessionStore`; subscribers only
//! ever observe state. The session record itself is never persisted; only
//! the token is, and the user is always rehydrated from the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::gateway::{ApiError, ApiGateway};
use crate::models::User;
use crate::storage::{Store, ACCESS_TOKEN_KEY};

/// Where the session currently is in its lifecycle.
///
/// `Bootstrapping` and `Authenticating` are transient: route guards must
/// render a loading affordance for them and never treat them as settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Bootstrapping,
    Unauthenticated,
    Authenticating,
    Authenticated,
}

/// A snapshot of the session, as observed by subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<User>,
}

impl SessionState {
    /// The state every session starts in, before `bootstrap` has run.
    pub fn initial() -> Self {
        SessionState {
            phase: SessionPhase::Bootstrapping,
            user: None,
        }
    }

    fn unauthenticated() -> Self {
        SessionState {
            phase: SessionPhase::Unauthenticated,
            user: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    /// True during bootstrap and during explicit re-fetch after a token was
    /// acquired.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Bootstrapping | SessionPhase::Authenticating
        )
    }
}

pub struct SessionStore {
    gateway: Arc<ApiGateway>,
    store: Arc<dyn Store>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(gateway: Arc<ApiGateway>, store: Arc<dyn Store>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::initial());
        SessionStore {
            gateway,
            store,
            state_tx,
        }
    }

    /// Subscribe to session state changes. The receiver immediately sees the
    /// current state and is notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    fn set_state(&self, state: SessionState) {
        self.state_tx.send_replace(state);
    }

    /// Invoked once at process start. Without a stored token this settles to
    /// unauthenticated immediately, with no network call; with one, the
    /// token is validated via a profile fetch.
    pub async fn bootstrap(&self) {
        let token = match self.store.get(ACCESS_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read the stored token: {}", e);
                None
            }
        };

        if token.is_none() {
            debug!("No stored token; starting unauthenticated");
            self.set_state(SessionState::unauthenticated());
            return;
        }

        debug!("Found a stored token; validating it via profile fetch");
        if let Err(e) = self.refresh_profile().await {
            warn!("Stored token failed validation: {}", e);
        }
    }

    /// Exchange credentials for a token, persist it, and fetch the profile.
    /// On failure the prior state is restored and the error is returned for
    /// the form to display.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let prior = self.state();
        self.set_state(SessionState {
            phase: SessionPhase::Authenticating,
            user: prior.user.clone(),
        });

        let token = match self.gateway.login(email, password).await {
            Ok(token) => token,
            Err(e) => {
                warn!(email, "Credential exchange failed: {}", e);
                self.set_state(prior);
                return Err(e);
            }
        };

        if let Err(e) = self.store.set(ACCESS_TOKEN_KEY, &token.access_token) {
            warn!("Could not persist the token: {}", e);
            self.set_state(prior);
            return Err(ApiError::Storage(e));
        }

        self.refresh_profile().await.map(|_| ())
    }

    /// Create the account, then log in with the same credentials. If
    /// registration fails, login is never attempted and no token is stored.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let prior = self.state();
        self.set_state(SessionState {
            phase: SessionPhase::Authenticating,
            user: prior.user.clone(),
        });

        if let Err(e) = self.gateway.register(email, password).await {
            warn!(email, "Registration failed: {}", e);
            self.set_state(prior);
            return Err(e);
        }

        info!(email, "Account registered; continuing with login");
        self.login(email, password).await
    }

    /// Synchronous teardown: clear the token, reset the session. Succeeds
    /// without any network call and is idempotent.
    pub fn logout(&self) {
        if let Err(e) = self.store.remove(ACCESS_TOKEN_KEY) {
            // The in-memory session resets regardless: fail closed.
            warn!("Could not clear the stored token on logout: {}", e);
        }
        self.set_state(SessionState::unauthenticated());
        info!("Logged out");
    }

    /// Complete a third-party login: the identity provider round trip has
    /// already produced a token, so persist it and fetch the profile.
    pub async fn handle_oauth_callback(&self, token: &str) -> Result<(), ApiError> {
        self.set_state(SessionState {
            phase: SessionPhase::Authenticating,
            user: None,
        });

        if let Err(e) = self.store.set(ACCESS_TOKEN_KEY, token) {
            warn!("Could not persist the OAuth token: {}", e);
            self.set_state(SessionState::unauthenticated());
            return Err(ApiError::Storage(e));
        }

        self.refresh_profile().await.map(|_| ())
    }

    /// Where to send the user for a Google sign-in. Navigation itself is the
    /// hosting application's job; the provider round trip lands on the OAuth
    /// callback surface.
    pub fn google_auth_url(&self) -> String {
        self.gateway.google_auth_url()
    }

    /// Where to send the user for a GitHub sign-in.
    pub fn github_auth_url(&self) -> String {
        self.gateway.github_auth_url()
    }

    /// Reset to unauthenticated without touching the network or the store.
    /// The hosting application wires this (plus its own navigation) into the
    /// gateway's session-expired hook; invoking it redundantly is harmless.
    pub fn invalidate(&self) {
        debug!("Session invalidated");
        self.set_state(SessionState::unauthenticated());
    }

    /// Validate the stored token by fetching the identity record. Fails
    /// closed: any error, auth failure or plain transport failure alike,
    /// removes the token and lands the session in unauthenticated.
    async fn refresh_profile(&self) -> Result<User, ApiError> {
        match self.gateway.fetch_me().await {
            Ok(user) => {
                info!(email = %user.email, "Profile fetch succeeded; session authenticated");
                self.set_state(SessionState {
                    phase: SessionPhase::Authenticated,
                    user: Some(user.clone()),
                });
                Ok(user)
            }
            Err(e) => {
                // On a 401 the gateway has already cleared the token;
                // removing it again is a no-op.
                if let Err(store_err) = self.store.remove(ACCESS_TOKEN_KEY) {
                    warn!("Could not clear the stored token: {}", store_err);
                }
                self.set_state(SessionState::unauthenticated());
                Err(e)
            }
        }
    }
}
