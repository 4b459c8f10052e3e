//! # Filesystem-backed key/value store
//!
//! [`FileStore`] persists each key as a small file under a base directory. It is
//! used when the client runs natively (development builds, tests) where there is
//! no `localStorage`.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <key>          # file containing the raw value
//! ```
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base, e.g.
//! `~/.local/share/linkshelf/` on Linux.

use std::path::PathBuf;

use crate::storage::KeyValueStore;

/// Filesystem-backed KeyValueStore for native builds.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are well-known names; strip separators so a key never escapes the base dir.
        let name: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let _ = std::fs::create_dir_all(&self.base);
        let _ = std::fs::write(self.key_path(key), value);
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}
