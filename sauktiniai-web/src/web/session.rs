//! Per-browser sessions, each owning a view controller.
//!
//! Sessions are identified by a random UUID in the `sauktiniai_sid`
//! cookie and expire after a period of inactivity.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, header};
use moka::future::Cache as MokaCache;
use tracing::debug;
use uuid::Uuid;

use crate::api::RegistryApi;
use crate::catalog::Catalog;
use crate::view::Controller;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sauktiniai_sid";

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Idle time after which a session is dropped.
    pub ttl: Duration,

    /// Maximum number of live sessions.
    pub max_sessions: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

/// A resolved session.
pub struct Session<A> {
    pub id: Uuid,
    pub controller: Arc<Controller<A>>,
    /// True if the request carried no live session and one was created.
    pub created: bool,
}

impl<A> Session<A> {
    /// `Set-Cookie` value binding the browser to this session.
    pub fn cookie(&self, ttl: Duration) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.id,
            ttl.as_secs()
        )
    }
}

/// Live sessions, keyed by id.
pub struct SessionStore<A> {
    api: Arc<A>,
    catalog: Arc<Catalog>,
    sessions: MokaCache<Uuid, Arc<Controller<A>>>,
    ttl: Duration,
}

impl<A: RegistryApi> Clone for SessionStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            catalog: self.catalog.clone(),
            sessions: self.sessions.clone(),
            ttl: self.ttl,
        }
    }
}

impl<A: RegistryApi> SessionStore<A> {
    /// Create an empty store.
    pub fn new(api: Arc<A>, catalog: Arc<Catalog>, config: &SessionConfig) -> Self {
        let sessions = MokaCache::builder()
            .time_to_idle(config.ttl)
            .max_capacity(config.max_sessions)
            .build();

        Self {
            api,
            catalog,
            sessions,
            ttl: config.ttl,
        }
    }

    /// Find the session named by `id`, or start a new one.
    ///
    /// A new session immediately begins loading its first page.
    pub async fn resolve(&self, id: Option<Uuid>) -> Session<A> {
        if let Some(id) = id {
            if let Some(controller) = self.sessions.get(&id).await {
                return Session {
                    id,
                    controller,
                    created: false,
                };
            }
        }

        let id = Uuid::new_v4();
        let controller = Arc::new(Controller::new(self.api.clone(), self.catalog.clone()));
        controller.start().await;
        self.sessions.insert(id, controller.clone()).await;
        debug!(session = %id, live = self.session_count(), "started session");

        Session {
            id,
            controller,
            created: true,
        }
    }

    /// Idle lifetime of a session.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Approximate number of live sessions.
    pub fn session_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}

/// Extract the session id from the request's cookies.
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::http::HeaderValue;

    use super::*;
    use crate::api::{MockRegistry, RecordedCall};

    fn store(api: &MockRegistry) -> SessionStore<MockRegistry> {
        SessionStore::new(
            Arc::new(api.clone()),
            Arc::new(Catalog::builtin().unwrap()),
            &SessionConfig::default(),
        )
    }

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(1800));
        assert_eq!(config.max_sessions, 10_000);
    }

    #[test]
    fn parses_session_cookie_among_others() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}; other=1")).unwrap(),
        );

        assert_eq!(session_id(&headers), Some(id));
    }

    #[test]
    fn ignores_missing_or_malformed_cookie() {
        assert_eq!(session_id(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("sauktiniai_sid=not-a-uuid"),
        );
        assert_eq!(session_id(&headers), None);
    }

    #[tokio::test]
    async fn new_session_starts_loading() {
        let api = MockRegistry::new(HashMap::new(), Some("vakar".into()));
        let store = store(&api);

        let session = store.resolve(None).await;
        assert!(session.created);
        session.controller.settle().await;

        let calls = api.calls().await;
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().any(|c| matches!(c, RecordedCall::List(_))));
        assert!(calls.contains(&RecordedCall::LastUpdated));
    }

    #[tokio::test]
    async fn known_session_is_reused() {
        let api = MockRegistry::default();
        let store = store(&api);

        let first = store.resolve(None).await;
        let again = store.resolve(Some(first.id)).await;

        assert!(!again.created);
        assert_eq!(again.id, first.id);
        assert!(Arc::ptr_eq(&first.controller, &again.controller));
    }

    #[tokio::test]
    async fn unknown_session_gets_fresh_id() {
        let api = MockRegistry::default();
        let store = store(&api);

        let stale = Uuid::new_v4();
        let session = store.resolve(Some(stale)).await;

        assert!(session.created);
        assert_ne!(session.id, stale);
    }

    #[test]
    fn cookie_format() {
        let session: Session<MockRegistry> = Session {
            id: Uuid::nil(),
            controller: Arc::new(Controller::new(
                Arc::new(MockRegistry::default()),
                Arc::new(Catalog::builtin().unwrap()),
            )),
            created: true,
        };

        assert_eq!(
            session.cookie(Duration::from_secs(60)),
            "sauktiniai_sid=00000000-0000-0000-0000-000000000000; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
        );
    }
}
