//! Per-browser session registry

use lru::LruCache;
use pagerag_application::{ContentScraper, SessionBackend, SessionConfig, SessionController};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

/// Name of the cookie that carries the session id
pub const SESSION_COOKIE: &str = "pagerag_session";

/// Sessions kept when no limit is configured
pub const DEFAULT_MAX_SESSIONS: usize = 256;

/// A session shared between requests carrying the same cookie
pub type SharedSession<S, B> = Arc<tokio::sync::Mutex<SessionController<S, B>>>;

/// Creates one [`SessionController`] per session id and hands it back on
/// later requests
///
/// At most `max_sessions` are held; creating one more evicts the least
/// recently used. A browser whose session was evicted gets a fresh one.
pub struct SessionRegistry<S: ContentScraper + 'static, B: SessionBackend + 'static> {
    scraper: Arc<S>,
    backend: Arc<B>,
    config: SessionConfig,
    sessions: Mutex<LruCache<Uuid, SharedSession<S, B>>>,
}

impl<S: ContentScraper + 'static, B: SessionBackend + 'static> SessionRegistry<S, B> {
    pub fn new(scraper: Arc<S>, backend: Arc<B>, config: SessionConfig) -> Self {
        Self {
            scraper,
            backend,
            config,
            sessions: Mutex::new(LruCache::new(session_limit(DEFAULT_MAX_SESSIONS))),
        }
    }

    /// Limit the number of sessions held at once (at least one)
    pub fn with_max_sessions(self, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(LruCache::new(session_limit(max_sessions))),
            ..self
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<Uuid, SharedSession<S, B>>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Session for `id`, or a fresh one under a new id if `id` is unknown
    ///
    /// Returns the id the caller should store in the cookie.
    pub fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, SharedSession<S, B>) {
        let mut sessions = self.lock();

        if let Some(id) = id
            && let Some(session) = sessions.get(&id)
        {
            return (id, Arc::clone(session));
        }

        let id = Uuid::new_v4();
        debug!("New web session {}", id);
        let session = Arc::new(tokio::sync::Mutex::new(SessionController::with_config(
            Arc::clone(&self.scraper),
            Arc::clone(&self.backend),
            self.config.clone(),
        )));
        if let Some((evicted, _)) = sessions.push(id, Arc::clone(&session))
            && evicted != id
        {
            debug!("Evicted web session {}", evicted);
        }
        (id, session)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn session_limit(max_sessions: usize) -> NonZeroUsize {
    NonZeroUsize::new(max_sessions).unwrap_or(NonZeroUsize::MIN)
}

/// Extract the session id from a `Cookie` header value
pub fn session_id_from_cookie(header: &str) -> Option<Uuid> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value for a session id
pub fn session_cookie(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pagerag_application::{ChainError, RagChain, StoreError, VectorStore};
    use std::path::Path;

    struct NoScraper;

    #[async_trait]
    impl ContentScraper for NoScraper {
        async fn fetch(&self, _url: &str) -> Option<String> {
            None
        }
    }

    struct NoChain;

    #[async_trait]
    impl RagChain for NoChain {
        async fn query(&self, _question: &str) -> Result<String, ChainError> {
            Ok(String::new())
        }
    }

    struct NoBackend;

    #[async_trait]
    impl SessionBackend for NoBackend {
        async fn open_store(&self, _dir: &Path) -> Result<Arc<dyn VectorStore>, StoreError> {
            Err(StoreError::Read("no store".to_string()))
        }

        fn bind_chain(&self, _store: Arc<dyn VectorStore>) -> Arc<dyn RagChain> {
            Arc::new(NoChain)
        }
    }

    fn registry(max_sessions: usize) -> SessionRegistry<NoScraper, NoBackend> {
        SessionRegistry::new(
            Arc::new(NoScraper),
            Arc::new(NoBackend),
            SessionConfig::default(),
        )
        .with_max_sessions(max_sessions)
    }

    #[test]
    fn test_cookieless_requests_stay_within_limit() {
        let registry = registry(8);
        for _ in 0..10_000 {
            registry.get_or_create(None);
        }
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_known_session_is_reused() {
        let registry = registry(2);
        let (id, first) = registry.get_or_create(None);
        let (same_id, again) = registry.get_or_create(Some(id));
        assert_eq!(same_id, id);
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_least_recently_used_session_is_evicted() {
        let registry = registry(2);
        let (a, _) = registry.get_or_create(None);
        let (b, _) = registry.get_or_create(None);
        // Touch `a` so `b` is the oldest
        registry.get_or_create(Some(a));
        registry.get_or_create(None);

        assert_eq!(registry.get_or_create(Some(a)).0, a);
        assert_ne!(registry.get_or_create(Some(b)).0, b);
    }

    #[test]
    fn test_zero_limit_keeps_one_session() {
        let registry = registry(0);
        registry.get_or_create(None);
        registry.get_or_create(None);
        assert_eq!(registry.capacity(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_cookie_roundtrip() {
        let id = Uuid::new_v4();
        let header = format!("theme=dark; {}", session_cookie(id));
        assert_eq!(session_id_from_cookie(&header), Some(id));
    }

    #[test]
    fn test_malformed_cookie_is_ignored() {
        assert_eq!(session_id_from_cookie("pagerag_session=not-a-uuid"), None);
        assert_eq!(session_id_from_cookie("other=1"), None);
        assert_eq!(session_id_from_cookie(""), None);
    }
}
