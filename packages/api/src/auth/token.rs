//! # Session token decoding
//!
//! The API issues JWT-shaped tokens (`header.payload.signature`, each segment
//! base64url-encoded). The client only needs the payload claims:
//!
//! | Claim | Meaning |
//! |-------|---------|
//! | `userId` | Server id of the user (number or string) |
//! | `email` | Email address of the user |
//! | `exp` | Expiry, in seconds since the Unix epoch |
//!
//! The signature is **not** verified here. The client trusts the token only as
//! far as deciding what to display and when to drop it locally; the server
//! rejects forged or expired tokens with 401, which the HTTP wrapper turns into
//! a forced logout.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::models::UserInfo;

/// Why a token could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token must have three dot-separated segments")]
    Malformed,
    #[error("token payload is not valid base64url: {0}")]
    Encoding(String),
    #[error("token claims are missing or invalid: {0}")]
    Claims(String),
    #[error("token expired")]
    Expired,
}

/// Claims carried in the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId", deserialize_with = "string_or_number")]
    pub user_id: String,
    pub email: String,
    /// Expiry in seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    /// Whether the token is past its expiry at `now_ms` (milliseconds since epoch).
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.exp.saturating_mul(1000) < now_ms
    }

    pub fn user(&self) -> UserInfo {
        UserInfo {
            id: self.user_id.clone(),
            email: self.email.clone(),
        }
    }
}

/// Decode the payload of `token` without verifying its signature.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(TokenError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TokenError::Encoding(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| TokenError::Claims(e.to_string()))
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
