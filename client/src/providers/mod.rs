//! Gateway provider traits.
//!
//! The reducers never talk HTTP directly; they describe effects against
//! these capabilities. Production wires [`donelist_api::ApiClient`] (which
//! implements both), tests wire the programmable fakes in [`crate::mocks`].

mod api_impl;
mod auth;
mod todos;

pub use auth::AuthGateway;
pub use todos::TodoGateway;
