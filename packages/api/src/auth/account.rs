//! Account endpoints: sign-up, sign-in, logout.

use serde::{Deserialize, Serialize};

use super::session::Session;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/signin`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

impl<T: Transport> ApiClient<T> {
    /// Create an account and sign in with the issued token.
    pub async fn signup(&self, request: &SignupRequest) -> Result<Session, ApiError> {
        let response: TokenResponse = self.post_credentials("/auth/signup", request).await?;
        Ok(self.session().establish(response.token)?)
    }

    /// Sign in with email and password.
    pub async fn signin(&self, request: &SigninRequest) -> Result<Session, ApiError> {
        let response: TokenResponse = self.post_credentials("/auth/signin", request).await?;
        Ok(self.session().establish(response.token)?)
    }

    /// Drop the local session. The API keeps no server-side session to revoke.
    pub fn logout(&self) {
        self.session().logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenError;
    use crate::testing::{far_future, mint_token, stub_client};
    use crate::transport::Method;
    use store::KeyValueStore;

    fn token_body(token: &str) -> String {
        serde_json::json!({ "token": token }).to_string()
    }

    #[tokio::test]
    async fn test_signup_then_signin_share_user_id() {
        let (client, stub, storage) = stub_client();
        stub.respond(
            Method::Post,
            "/auth/signup",
            201,
            token_body(&mint_token("42", "ada@example.com", far_future())),
        );
        stub.respond(
            Method::Post,
            "/auth/signin",
            200,
            token_body(&mint_token("42", "ada@example.com", far_future())),
        );

        let signed_up = client
            .signup(&SignupRequest {
                username: "ada".into(),
                email: "ada@example.com".into(),
                password: "hunter22".into(),
            })
            .await
            .unwrap();
        client.logout();
        assert!(storage.get("token").is_none());

        let signed_in = client
            .signin(&SigninRequest {
                email: "ada@example.com".into(),
                password: "hunter22".into(),
            })
            .await
            .unwrap();

        assert_eq!(signed_up.user.unwrap().id, signed_in.user.clone().unwrap().id);
        assert_eq!(storage.get("token"), signed_in.token);

        let sent = stub.requests();
        assert_eq!(sent[0].body.as_ref().unwrap()["username"], "ada");
        assert!(sent[1].body.as_ref().unwrap().get("username").is_none());
    }

    #[tokio::test]
    async fn test_rejected_signin_is_auth_error_not_expiry() {
        let (client, stub, _) = stub_client();
        client
            .session()
            .establish(mint_token("1", "a@b.c", far_future()))
            .unwrap();
        stub.respond(Method::Post, "/auth/signin", 401, r#"{"message":"Invalid credentials"}"#);

        let result = client
            .signin(&SigninRequest {
                email: "a@b.c".into(),
                password: "wrong".into(),
            })
            .await;

        assert_eq!(result, Err(ApiError::Auth("Invalid credentials".into())));
        // The existing session is untouched
        assert!(client.session().is_active());
    }

    #[tokio::test]
    async fn test_signup_with_unusable_token() {
        let (client, stub, storage) = stub_client();
        stub.respond(Method::Post, "/auth/signup", 201, token_body("nope"));

        let result = client.signup(&SignupRequest::default()).await;
        assert_eq!(result, Err(ApiError::Token(TokenError::Malformed)));
        assert!(storage.get("token").is_none());
    }

    #[tokio::test]
    async fn test_credentials_never_carry_bearer() {
        let (client, stub, _) = stub_client();
        client
            .session()
            .establish(mint_token("1", "a@b.c", far_future()))
            .unwrap();
        stub.respond(
            Method::Post,
            "/auth/signin",
            200,
            token_body(&mint_token("2", "b@c.d", far_future())),
        );

        client.signin(&SigninRequest::default()).await.unwrap();
        assert_eq!(stub.last_request().unwrap().bearer, None);
        assert_eq!(client.session().user().unwrap().id, "2");
    }
}
