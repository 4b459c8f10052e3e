//! Shared API client constructor for all platforms.
//!
//! Returns an [`api::ApiClient`] whose session is persisted through the
//! appropriate [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Native**: one file per key under `<data_dir>/linkshelf/` via [`store::FileStore`]
//! - **Other WASM builds**: in-memory only

use std::sync::Arc;

use api::{ApiClient, ReqwestTransport, SessionStore};
use store::{ClientConfig, KeyValueStore};

/// The client type every view talks to.
pub type WebClient = ApiClient<ReqwestTransport>;

/// Create the application's client. The session starts signed out; call
/// `client.session().restore()` to pick up a persisted token.
pub fn make_client(config: &ClientConfig) -> WebClient {
    let session = SessionStore::new(make_storage(), &config.session.storage_key);
    tracing::debug!(base_url = %config.api.base_url, "creating api client");
    ApiClient::new(ReqwestTransport::new(config.api.base_url.as_str()), session)
}

/// Create the platform-appropriate token storage.
pub fn make_storage() -> Arc<dyn KeyValueStore + Send + Sync> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStorageStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("linkshelf");
        Arc::new(store::FileStore::new(base))
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Arc::new(store::MemoryStore::new())
    }
}
