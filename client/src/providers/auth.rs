//! Auth gateway trait.

use donelist_api::{AuthSession, LoginRequest, Result, SignupRequest, User};
use std::future::Future;

/// Backend capability the auth reducer's effects run against.
///
/// Mirrors the three auth endpoints of the REST contract. Implementations
/// must be cheap to clone - effects clone the gateway into spawned futures.
pub trait AuthGateway: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns an [`donelist_api::ApiError`] on transport failure or a
    /// backend-reported failure.
    fn signup(&self, request: SignupRequest) -> impl Future<Output = Result<()>> + Send;

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns an [`donelist_api::ApiError`] on failure; bad credentials
    /// carry the backend's envelope message.
    fn login(&self, request: LoginRequest) -> impl Future<Output = Result<AuthSession>> + Send;

    /// Fetch the current user's profile with the stored bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`donelist_api::ApiError::Unauthorized`] when the token is
    /// no longer accepted.
    fn me(&self) -> impl Future<Output = Result<User>> + Send;
}
