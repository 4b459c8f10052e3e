//! # Durable key/value storage for client-side state
//!
//! The client persists exactly one piece of state between page loads: the raw
//! session token, stored as a single string under a well-known key. Absence of
//! the key means "logged out".
//!
//! [`KeyValueStore`] abstracts over where that string lives:
//!
//! | Implementation | Platform | Backing |
//! |----------------|----------|---------|
//! | [`crate::MemoryStore`] | any | in-process `HashMap` (tests, fallback) |
//! | [`crate::FileStore`] | native | one file per key under a data directory |
//! | [`crate::LocalStorageStore`] | web (`web` feature) | the browser's `window.localStorage` |
//!
//! Implementations swallow I/O errors: a failed read is reported as an absent
//! value and a failed write is dropped. An unusable store therefore degrades to
//! "not signed in" instead of breaking the app; the server remains the source
//! of truth for authentication.

/// Synchronous string storage keyed by name.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
    /// Delete `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
}
