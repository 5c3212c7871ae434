//! Key-value preference storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The theme toggle is the only component that persists anything. It talks to
//! a `PreferenceStore` so the browser's `localStorage` can be swapped for an
//! in-memory map in tests and in hosts without web storage.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. Every operation returns a `Result` so callers
//! can log the failure and keep going; nothing here is fatal.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::PageError;

/// A string key-value store scoped to the page's origin.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PageError>;
}

/// Process-local store. Values live as long as the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(feature = "hydrate")]
pub use local::LocalStore;

#[cfg(feature = "hydrate")]
mod local {
    use super::PreferenceStore;
    use crate::error::PageError;

    /// `window.localStorage`, resolved once.
    ///
    /// Accessing `localStorage` itself can throw (privacy modes, disabled
    /// storage); that case is kept as `None` and reported on every call.
    pub struct LocalStore {
        storage: Option<web_sys::Storage>,
    }

    impl LocalStore {
        pub fn open() -> Self {
            let storage = match web_sys::window().map(|w| w.local_storage()) {
                Some(Ok(storage)) => storage,
                Some(Err(err)) => {
                    log::warn!("localStorage unavailable: {err:?}");
                    None
                }
                None => None,
            };
            Self { storage }
        }

        fn storage(&self) -> Result<&web_sys::Storage, PageError> {
            self.storage
                .as_ref()
                .ok_or_else(|| PageError::Storage("localStorage unavailable".to_owned()))
        }
    }

    impl PreferenceStore for LocalStore {
        fn get(&self, key: &str) -> Result<Option<String>, PageError> {
            self.storage()?
                .get_item(key)
                .map_err(|err| PageError::Storage(format!("{err:?}")))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
            self.storage()?
                .set_item(key, value)
                .map_err(|err| PageError::Storage(format!("{err:?}")))
        }
    }
}
