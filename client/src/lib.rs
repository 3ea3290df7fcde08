//! # Donelist Client
//!
//! Client-side state machines for the donelist task manager: the auth
//! session store and the todo collection store, both expressed as pure
//! reducers over explicit action enums, with side effects described as
//! values and executed by the [`donelist_runtime`] Store.
//!
//! The original client shipped this logic twice (a component-local reducer
//! and a centralized slice); exactly one strategy survives here.
//!
//! ## Stores
//!
//! - [`reducers::AuthReducer`] over [`state::AuthState`]: rehydration at
//!   startup, login/signup/logout, convergence to anonymous on session
//!   invalidation.
//! - [`reducers::TodosReducer`] over [`state::TodoListState`]: paged
//!   fetches, optimistic prepend on create, identity-matched replace on
//!   update/toggle, guarded removal on delete, and the derived
//!   stats/date-grouping views.
//! - [`theme::ThemeReducer`]: persisted light/dark preference.
//!
//! ## Wiring
//!
//! ```ignore
//! let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(path)?);
//! let api = ApiClient::new(base_url, Arc::clone(&storage))?;
//!
//! let auth = Store::new(
//!     AuthState::default(),
//!     AuthReducer::new(),
//!     AuthEnvironment::new(api.clone(), Arc::clone(&storage)),
//! );
//! let todos = Store::new(
//!     TodoListState::default(),
//!     TodosReducer::new(),
//!     TodoEnvironment::new(api.clone()),
//! );
//!
//! // A 401 anywhere converges the auth store to anonymous
//! bridge::spawn_invalidation_bridge(auth.clone(), api.subscribe_invalidations());
//!
//! auth.send(AuthAction::Initialize).await?;
//! ```

pub mod actions;
pub mod bridge;
pub mod environment;
pub mod providers;
pub mod reducers;
pub mod routes;
pub mod state;
pub mod theme;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use actions::{AuthAction, TodoAction};
pub use environment::{AuthEnvironment, TodoEnvironment};
pub use providers::{AuthGateway, TodoGateway};
pub use reducers::{AuthReducer, TodosReducer};
pub use state::{AuthState, TodoListState, TodoStats};

/// Convenience alias for the auth session store
pub type AuthStore<A> =
    donelist_runtime::Store<AuthState, AuthAction, AuthEnvironment<A>, AuthReducer<A>>;

/// Convenience alias for the todo collection store
pub type TodoStore<T> =
    donelist_runtime::Store<TodoListState, TodoAction, TodoEnvironment<T>, TodosReducer<T>>;
