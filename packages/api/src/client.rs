//! # HTTP client wrapper
//!
//! [`ApiClient`] pairs a [`Transport`] with the [`SessionStore`]. Every request
//! it builds reads the current token at build time and attaches it as a bearer
//! credential; when no session is active the header is omitted.
//!
//! Responses are mapped to an explicit result in one place,
//! [`execute`](ApiClient::execute):
//!
//! | Outcome | Result |
//! |---------|--------|
//! | 2xx | `Ok(response)` |
//! | 401 | session is expired (forced logout), then `Err(ApiError::SessionExpired)` |
//! | 401 for a token no longer current | `Err(ApiError::SessionExpired)`, session untouched |
//! | other status | `Err(ApiError::Status)` |
//! | no response | `Err(ApiError::Network)` |
//!
//! The forced logout is the only global side effect, and it only hits the
//! session whose token the server rejected: a late 401 for a request sent
//! before a re-login, or sent with no token at all, leaves the newer session
//! alone. Rollback and user notification are left to the call site, which
//! still receives the error.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::SessionStore;
use crate::error::{error_message, ApiError};
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// REST client bound to a session.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    session: SessionStore,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: SessionStore) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET path?query` and decode the JSON body.
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let request = query
            .iter()
            .fold(self.authorized(Method::Get, path), |request, (key, value)| {
                request.with_query(key, value)
            });
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// `POST path` with a JSON body and decode the JSON response.
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = self.authorized(Method::Post, path).with_body(to_json(body)?);
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// `POST path` without a body, ignoring whatever the server acknowledges with.
    pub async fn post_ack(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.authorized(Method::Post, path)).await?;
        Ok(())
    }

    /// `POST` for the credential endpoints.
    ///
    /// A rejection here (401 included) means "wrong credentials", not "session
    /// expired", so it maps to [`ApiError::Auth`] and leaves the session alone.
    pub(crate) async fn post_credentials<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::new(Method::Post, path).with_body(to_json(body)?);
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let message = error_message(&response.body);
            tracing::info!(path, status = response.status, "credentials rejected: {message}");
            return Err(ApiError::Auth(message));
        }
        decode(&response)
    }

    /// A request carrying the current token. An expired token is dropped
    /// here (expiring the session) rather than sent.
    fn authorized(&self, method: Method, path: &str) -> ApiRequest {
        let mut request = ApiRequest::new(method, path);
        request.bearer = self.session.token();
        request
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        let sent_bearer = request.bearer.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(?method, %path, "request failed: {e}");
                return Err(e.into());
            }
        };

        if response.is_success() {
            return Ok(response);
        }
        if response.status == 401 {
            if sent_bearer.is_some() && sent_bearer == self.session.token() {
                self.session.expire();
            } else {
                tracing::debug!(?method, %path, "401 for a token that is no longer current");
            }
            return Err(ApiError::SessionExpired);
        }

        let message = error_message(&response.body);
        tracing::warn!(?method, %path, status = response.status, "{message}");
        Err(ApiError::Status {
            status: response.status,
            message,
        })
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<R: DeserializeOwned>(response: &ApiResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
