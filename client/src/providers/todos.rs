//! Todo gateway trait.

use donelist_api::{CreateTodo, Result, Todo, UpdateTodo};
use std::future::Future;

/// Backend capability the todo reducer's effects run against.
///
/// Mirrors the todo endpoints of the REST contract. Implementations must be
/// cheap to clone - effects clone the gateway into spawned futures.
pub trait TodoGateway: Send + Sync {
    /// Fetch up to `limit` todos starting at `skip`.
    ///
    /// # Errors
    ///
    /// Returns an [`donelist_api::ApiError`] on failure.
    fn list(&self, skip: u32, limit: u32) -> impl Future<Output = Result<Vec<Todo>>> + Send;

    /// Create a todo.
    ///
    /// # Errors
    ///
    /// Returns an [`donelist_api::ApiError`] on failure.
    fn create(&self, data: CreateTodo) -> impl Future<Output = Result<Todo>> + Send;

    /// Partially update a todo.
    ///
    /// # Errors
    ///
    /// Returns an [`donelist_api::ApiError`] on failure.
    fn update(&self, id: String, updates: UpdateTodo) -> impl Future<Output = Result<Todo>> + Send;

    /// Flip a todo's completion flag server-side.
    ///
    /// # Errors
    ///
    /// Returns an [`donelist_api::ApiError`] on failure.
    fn toggle(&self, id: String) -> impl Future<Output = Result<Todo>> + Send;

    /// Delete a todo.
    ///
    /// # Errors
    ///
    /// Returns an [`donelist_api::ApiError`] on failure.
    fn delete(&self, id: String) -> impl Future<Output = Result<()>> + Send;
}
