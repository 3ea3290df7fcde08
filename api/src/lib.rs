//! # Donelist API
//!
//! HTTP client adapter for the donelist backend REST API.
//!
//! Every outbound call goes through [`ApiClient`], which:
//!
//! - attaches `Authorization: Bearer <token>` when the injected
//!   [`Storage`](donelist_core::environment::Storage) holds a token
//! - applies a fixed base URL and a fixed 10-second request timeout
//! - decodes the uniform `{success, message, data, error}` response envelope
//! - on HTTP 401 from *any* endpoint, clears the persisted session and
//!   publishes a [`SessionInvalidated`] signal for the auth store to react
//!   to - the adapter itself never navigates
//!
//! There are no retries: a single failed call surfaces as a single failure
//! to the caller.

mod client;
mod error;
mod types;

pub use client::{ApiClient, DEFAULT_TIMEOUT, SessionInvalidated};
pub use error::{ApiError, Result};
pub use types::{
    AuthSession, AuthToken, CreateTodo, Envelope, LoginRequest, SignupRequest, Todo, UpdateTodo,
    User,
};
