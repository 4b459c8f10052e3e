//! Test support: a scripted [`Transport`] and unsigned token minting.
//!
//! Compiled for this crate's own tests and, through the `testing` feature, for
//! downstream crates' tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use store::MemoryStore;

use crate::auth::SessionStore;
use crate::client::ApiClient;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};

type Reply = Result<ApiResponse, TransportError>;

/// Transport that answers from per-route queues and records every request.
///
/// Replies are matched on method and path (query ignored) and consumed in
/// order. A route with nothing queued answers 404.
#[derive(Clone, Debug, Default)]
pub struct StubTransport {
    routes: Arc<Mutex<HashMap<(Method, String), VecDeque<Reply>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.push(method, path, Ok(ApiResponse::new(status, body)))
    }

    /// Queue a network failure for `method path`.
    pub fn fail(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Err(TransportError("connection refused".into())))
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        lock(&self.routes)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method, request.path.clone());
        lock(&self.requests).push(request);
        let reply = lock(&self.routes)
            .get_mut(&key)
            .and_then(|queue| queue.pop_front());
        reply.unwrap_or_else(|| Ok(ApiResponse::new(404, r#"{"message":"no stub"}"#)))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Build an unsigned JWT-shaped token carrying `userId`, `email` and `exp`.
pub fn mint_token(user_id: &str, email: &str, exp_secs: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({ "userId": user_id, "email": email, "exp": exp_secs }).to_string(),
    );
    format!("{header}.{payload}.unsigned")
}

/// An expiry one day from now, in seconds.
pub fn far_future() -> i64 {
    crate::auth::now_millis() / 1000 + 24 * 60 * 60
}

/// A client over a fresh [`StubTransport`] and [`MemoryStore`], signed out.
pub fn stub_client() -> (ApiClient<StubTransport>, StubTransport, MemoryStore) {
    let stub = StubTransport::new();
    let storage = MemoryStore::new();
    let session = SessionStore::new(Arc::new(storage.clone()), "token");
    (ApiClient::new(stub.clone(), session), stub, storage)
}
