use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use moneta::config::ApiConfig;
use moneta::gateway::ApiGateway;
use moneta::session::SessionStore;
use moneta::storage::memory_store::MemoryStore;

/// Everything a test needs: the wired-up client pieces plus hooks to observe
/// side effects. The session-expired hook is wired the way a hosting
/// application would wire it (session teardown + "navigate to login"), with
/// the navigation recorded as a counter.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<ApiGateway>,
    pub session: Arc<SessionStore>,
    pub expired: Arc<AtomicUsize>,
}

impl Harness {
    /// How many times the session-expired hook (i.e. the redirect to the
    /// login surface) has fired.
    pub fn expired_count(&self) -> usize {
        self.expired.load(Ordering::SeqCst)
    }
}

pub fn build_harness(server_url: &str) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let config = ApiConfig {
        base_url: server_url.to_string(),
        timeout_in_ms: 10_000,
    };
    let gateway = Arc::new(ApiGateway::new(&config, store.clone()));
    let session = Arc::new(SessionStore::new(gateway.clone(), store.clone()));

    let expired = Arc::new(AtomicUsize::new(0));
    {
        let session = session.clone();
        let expired = expired.clone();
        gateway.set_session_expired_hook(Arc::new(move || {
            session.invalidate();
            expired.fetch_add(1, Ordering::SeqCst);
        }));
    }

    Harness {
        store,
        gateway,
        session,
        expired,
    }
}

/// A `GET /auth/me` response body.
pub fn user_body(id: i64, email: &str) -> String {
    format!(
        r#"{{"id": {}, "email": "{}", "created_at": "2026-01-15T11:24:00Z"}}"#,
        id, email
    )
}

/// A `POST /auth/login` response body.
pub fn token_body(token: &str) -> String {
    format!(r#"{{"access_token": "{}", "token_type": "bearer"}}"#, token)
}
