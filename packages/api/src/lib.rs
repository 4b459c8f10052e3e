//! # API crate: REST client and session management for Linkshelf
//!
//! Everything the UI needs to talk to the link-sharing service lives here. The
//! crate has no UI dependencies, so its behaviour is tested natively.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Token decoding, the [`SessionStore`], and the signup/signin/logout endpoints |
//! | [`client`] | [`ApiClient`]: bearer injection and response mapping, including the forced logout on 401 |
//! | [`error`] | [`ApiError`], the single error type of every call |
//! | [`links`] | Private list, public feed, link creation and voting endpoints |
//! | [`models`] | [`UserInfo`], the identity decoded from the token |
//! | [`transport`] | The [`Transport`] seam and its reqwest implementation |
//! | `testing` | `StubTransport` and token minting (tests / `testing` feature) |

pub mod auth;
pub mod client;
pub mod error;
pub mod links;
pub mod models;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use auth::{Session, SessionChange, SessionState, SessionStore, SigninRequest, SignupRequest};
pub use client::ApiClient;
pub use error::ApiError;
pub use models::UserInfo;
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport, TransportError};

pub use store::{FeedFilter, Link, LinkId, NewLink};
