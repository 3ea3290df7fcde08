//! Store environments.
//!
//! Environments bundle the injected dependencies each reducer needs. The
//! single [`Storage`] capability is passed explicitly to whichever store
//! touches persisted state, so tests substitute an in-memory fake.

use crate::providers::{AuthGateway, TodoGateway};
use donelist_core::environment::Storage;
use std::sync::Arc;

/// Dependencies of the auth session reducer
#[derive(Clone)]
pub struct AuthEnvironment<A>
where
    A: AuthGateway + Clone,
{
    /// Backend auth endpoints
    pub gateway: A,

    /// Persisted local state (`authToken`, `user`)
    pub storage: Arc<dyn Storage>,
}

impl<A> AuthEnvironment<A>
where
    A: AuthGateway + Clone,
{
    /// Create a new auth environment
    #[must_use]
    pub fn new(gateway: A, storage: Arc<dyn Storage>) -> Self {
        Self { gateway, storage }
    }
}

/// Dependencies of the todo collection reducer
#[derive(Clone)]
pub struct TodoEnvironment<T>
where
    T: TodoGateway + Clone,
{
    /// Backend todo endpoints
    pub gateway: T,
}

impl<T> TodoEnvironment<T>
where
    T: TodoGateway + Clone,
{
    /// Create a new todo environment
    #[must_use]
    pub const fn new(gateway: T) -> Self {
        Self { gateway }
    }
}
