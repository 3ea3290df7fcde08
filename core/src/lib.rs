//! # Donelist Core
//!
//! Core traits and types for the donelist client architecture.
//!
//! This crate provides the fundamental abstractions the client stores are
//! built from:
//!
//! - **State**: owned domain state for a feature (auth session, todo page)
//! - **Action**: all possible inputs to a reducer (commands and the terminal
//!   events produced by their effects)
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: side effect descriptions (not execution)
//! - **Environment**: injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use donelist_core::*;
//!
//! impl Reducer for SessionReducer {
//!     type State = SessionState;
//!     type Action = SessionAction;
//!     type Environment = SessionEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut SessionState,
//!         action: SessionAction,
//!         env: &SessionEnvironment,
//!     ) -> SmallVec<[Effect<SessionAction>; 4]> {
//!         // Business logic goes here
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime. Actions an effect resolves
        /// to are fed back into the reducer.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution), returned from reducers and executed by
/// the Store.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into
        /// the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation into a `Future` effect
        pub fn future<F>(future: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(future))
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected via
/// the Environment parameter, so tests can substitute fakes.
pub mod environment {
    /// Well-known storage key for the persisted bearer token.
    pub const AUTH_TOKEN_KEY: &str = "authToken";

    /// Well-known storage key for the persisted serialized user record.
    pub const USER_KEY: &str = "user";

    /// Well-known storage key for the persisted theme preference.
    pub const THEME_KEY: &str = "theme";

    /// Storage trait - abstracts persisted local key-value state
    ///
    /// This is the single storage capability injected into every component
    /// that touches persisted state (the HTTP adapter for the bearer token,
    /// the auth store for credentials, the theme store for the preference).
    /// The backing stores are process-local and synchronous, so the trait is
    /// synchronous and object-safe.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - JSON file under the state directory
    /// let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(path)?);
    ///
    /// // Test - in-memory map
    /// let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    /// ```
    pub trait Storage: Send + Sync {
        /// Read the value stored under `key`, if any
        fn get(&self, key: &str) -> Option<String>;

        /// Store `value` under `key`, replacing any previous value
        fn set(&self, key: &str, value: &str);

        /// Remove the value stored under `key`, if any
        fn remove(&self, key: &str);
    }
}
