//! Authentication: token decoding, the session store, and the account endpoints.

mod account;
mod session;
mod token;

pub use account::{SigninRequest, SignupRequest};
pub use session::{Session, SessionChange, SessionState, SessionStore};
pub use token::{decode_claims, now_millis, TokenClaims, TokenError};
