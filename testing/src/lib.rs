//! # Donelist Testing
//!
//! Testing utilities and helpers for the donelist client architecture.
//!
//! This crate provides:
//! - A fluent Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for effect lists
//! - An in-memory [`Storage`](donelist_core::environment::Storage) fake
//!
//! ## Example
//!
//! ```ignore
//! use donelist_testing::{ReducerTest, assertions, mocks::MemoryStorage};
//!
//! ReducerTest::new(ThemeReducer)
//!     .with_env(ThemeEnvironment::new(Arc::new(MemoryStorage::new())))
//!     .given_state(ThemeState::default())
//!     .when_action(ThemeAction::Toggle)
//!     .then_state(|state| assert_eq!(state.theme, Theme::Dark))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of environment traits
pub mod mocks {
    use donelist_core::environment::Storage;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// In-memory storage fake
    ///
    /// Substitutes the persisted key-value store in tests. Cloning yields a
    /// handle on the same underlying map, so the fake can be shared between
    /// a store environment and test assertions.
    ///
    /// # Example
    ///
    /// ```
    /// use donelist_core::environment::Storage;
    /// use donelist_testing::mocks::MemoryStorage;
    ///
    /// let storage = MemoryStorage::new();
    /// storage.set("theme", "dark");
    /// assert_eq!(storage.get("theme").as_deref(), Some("dark"));
    /// storage.remove("theme");
    /// assert!(storage.get("theme").is_none());
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStorage {
        entries: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MemoryStorage {
        /// Create a new empty in-memory storage
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create storage pre-populated with entries
        #[must_use]
        pub fn with_entries<I, K, V>(entries: I) -> Self
        where
            I: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<String>,
        {
            let map = entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect();
            Self {
                entries: Arc::new(Mutex::new(map)),
            }
        }

        /// Number of stored entries (for assertions)
        #[must_use]
        pub fn len(&self) -> usize {
            self.lock().len()
        }

        /// Whether the storage is empty
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
            self.entries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }

    impl Storage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.lock().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.lock().insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.lock().remove(key);
        }
    }
}
