//! Store reducers.
//!
//! Every mutating operation follows the same pattern: *set loading, clear
//! error, describe the backend call as an effect, apply the terminal event
//! or record the failure message*. Reducers stay pure - all I/O lives in
//! the returned effects (plus the synchronous [`Storage`] capability for
//! persisted credentials, which has no async surface to wait on).
//!
//! [`Storage`]: donelist_core::environment::Storage

mod auth;
mod todos;

pub use auth::AuthReducer;
pub use todos::{PAGE_SIZE, TodosReducer};
