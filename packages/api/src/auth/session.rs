//! # Session store
//!
//! [`SessionStore`] is the single owner of the client's authentication state.
//! It is created once at startup and handed (cloned, sharing state) to the HTTP
//! wrapper and to every UI consumer; there is no ambient global.
//!
//! ## Lifecycle
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`restore`](SessionStore::restore) | Reads the persisted token. Expired or undecodable tokens are discarded and storage is cleared. |
//! | [`establish`](SessionStore::establish) | Decodes a freshly issued token, persists it, publishes the new session. |
//! | [`logout`](SessionStore::logout) | Clears memory and storage. Idempotent. |
//! | [`expire`](SessionStore::expire) | Like `logout`, but always publishes a [`SessionChange::Expired`] event so the UI can tell the user once per rejected request. |
//!
//! A token can also run out while the app is open. Every read through
//! [`token`](SessionStore::token), [`user`](SessionStore::user),
//! [`is_active`](SessionStore::is_active) and [`current`](SessionStore::current)
//! checks the decoded `exp` against the clock first and expires the session
//! when it has passed, so no request ever carries a dead token.
//!
//! ## Change propagation
//!
//! State lives in a [`tokio::sync::watch`] channel. Writes happen synchronously
//! inside the operation, so the HTTP wrapper, which reads the token when it
//! builds each request, can never observe a stale token after a logout returns.
//! UI code awaits [`subscribe`](SessionStore::subscribe)d receivers to re-render;
//! dropping the receiver is all the teardown there is.

use std::sync::Arc;

use tokio::sync::watch;

use super::token::{decode_claims, now_millis, TokenClaims, TokenError};
use crate::models::UserInfo;
use store::KeyValueStore;

/// Authentication state: `user` is present iff `token` is present and unexpired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
    /// The token's `exp` claim, seconds since epoch.
    pub expires_at: Option<i64>,
}

impl Session {
    fn from_claims(token: String, claims: TokenClaims) -> Self {
        Self {
            expires_at: Some(claims.exp),
            user: Some(claims.user()),
            token: Some(token),
        }
    }

    pub fn is_active(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Whether the token ran out before `now_ms`.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at
            .is_some_and(|exp| exp.saturating_mul(1000) < now_ms)
    }
}

/// What caused the latest session change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    /// Nothing has happened since the store was created.
    Initial,
    /// A persisted token was restored at startup.
    Restored,
    /// Signup or signin succeeded.
    SignedIn,
    /// Explicit logout, or a stale persisted token was dropped.
    SignedOut,
    /// The server rejected the token (401), or its `exp` passed.
    Expired,
}

/// A published snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub session: Session,
    pub change: SessionChange,
    /// Bumped on every published change.
    pub revision: u64,
}

type SharedStorage = Arc<dyn KeyValueStore + Send + Sync>;

/// Process-wide session state, persisted through a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionStore {
    storage: SharedStorage,
    storage_key: Arc<str>,
    state: Arc<watch::Sender<SessionState>>,
    clock: fn() -> i64,
}

impl SessionStore {
    /// Create an empty (signed-out) store. Call [`restore`](Self::restore) to
    /// pick up a persisted token.
    pub fn new(storage: SharedStorage, storage_key: &str) -> Self {
        let (state, _) = watch::channel(SessionState {
            session: Session::default(),
            change: SessionChange::Initial,
            revision: 0,
        });
        Self {
            storage,
            storage_key: Arc::from(storage_key),
            state: Arc::new(state),
            clock: now_millis,
        }
    }

    /// Replace the wall clock (milliseconds since epoch), for tests.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn current(&self) -> Session {
        self.check_expiry();
        self.state.borrow().session.clone()
    }

    /// The latest published snapshot, without an expiry check.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.check_expiry();
        self.state.borrow().session.token.clone()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.check_expiry();
        self.state.borrow().session.user.clone()
    }

    pub fn is_active(&self) -> bool {
        self.check_expiry();
        self.state.borrow().session.is_active()
    }

    /// Expire the session if its token ran out. Returns whether it did.
    pub fn check_expiry(&self) -> bool {
        let expired = self.state.borrow().session.is_expired_at((self.clock)());
        if expired {
            tracing::info!("session token passed its expiry");
            self.expire();
        }
        expired
    }

    /// Receive every subsequent session change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Restore the session from durable storage.
    ///
    /// Returns `None` (and clears storage) when no token is stored, or the
    /// stored token is undecodable or past its expiry.
    pub fn restore(&self) -> Option<Session> {
        let token = self.storage.get(&self.storage_key)?;
        match self.validate(&token) {
            Ok(claims) => {
                tracing::debug!(user_id = %claims.user_id, "restored persisted session");
                let session = Session::from_claims(token, claims);
                self.publish(session.clone(), SessionChange::Restored);
                Some(session)
            }
            Err(e) => {
                tracing::info!("discarding persisted token: {e}");
                self.logout();
                None
            }
        }
    }

    /// Adopt a token issued by signup/signin: decode, persist, publish.
    pub fn establish(&self, token: String) -> Result<Session, TokenError> {
        let claims = self.validate(&token)?;
        self.storage.set(&self.storage_key, &token);
        tracing::info!(user_id = %claims.user_id, "signed in");
        let session = Session::from_claims(token, claims);
        self.publish(session.clone(), SessionChange::SignedIn);
        Ok(session)
    }

    /// Clear the session from memory and storage. Safe to call when signed out.
    pub fn logout(&self) {
        self.storage.remove(&self.storage_key);
        if self.state.borrow().session != Session::default() {
            tracing::info!("signed out");
            self.publish(Session::default(), SessionChange::SignedOut);
        }
    }

    /// Clear the session because the server rejected it or it ran out.
    ///
    /// Unlike [`logout`](Self::logout) this always publishes, once per call.
    pub fn expire(&self) {
        self.storage.remove(&self.storage_key);
        tracing::warn!("session no longer valid; signing out");
        self.publish(Session::default(), SessionChange::Expired);
    }

    fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = decode_claims(token)?;
        if claims.is_expired_at((self.clock)()) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    fn publish(&self, session: Session, change: SessionChange) {
        self.state.send_modify(|state| {
            state.session = session;
            state.change = change;
            state.revision += 1;
        });
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("storage_key", &self.storage_key)
            .field("state", &*self.state.borrow())
            .finish()
    }
}
