//! Store actions.
//!
//! Actions are the only way to communicate with the stores. Each enum mixes
//! **commands** (user intent: `Login`, `Fetch`, ...) with the **terminal
//! events** their effects resolve to (`LoginSucceeded`, `Fetched`,
//! `FetchFailed`, ...). The view layer observes terminal events through the
//! store's action broadcast to react to operation completion - the stores
//! themselves never navigate.

use donelist_api::{CreateTodo, Todo, UpdateTodo, User};

/// Auth session actions
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    // ── Commands ────────────────────────────────────────────────────────
    /// Rehydrate the session from persisted storage, then verify it against
    /// the backend. Runs once per process lifetime, at startup; later
    /// dispatches are warned no-ops.
    Initialize,

    /// Log in with credentials
    Login {
        /// Login email
        email: String,
        /// Plain password
        password: String,
    },

    /// Register a new account.
    ///
    /// Signup does not authenticate - the backend contract issues no token
    /// here.
    Signup {
        /// Display name
        name: String,
        /// Login email
        email: String,
        /// Plain password
        password: String,
    },

    /// Clear the persisted session and reset to anonymous. Purely
    /// client-side: the backend issues stateless bearer tokens.
    Logout,

    /// Clear only the error field
    ClearError,

    // ── Events ──────────────────────────────────────────────────────────
    /// Rehydration verified: the backend accepted the stored token and
    /// returned a fresh profile
    SessionVerified {
        /// Fresh user record replacing the cached copy
        user: User,
    },

    /// Rehydration rejected: the stored token was refused (or the profile
    /// fetch failed); persisted credentials have been cleared
    SessionRejected,

    /// The adapter saw a 401 on some request and invalidated the persisted
    /// session; converge to anonymous
    SessionInvalidated,

    /// Login completed; credentials are persisted
    LoginSucceeded {
        /// Authenticated user
        user: User,
        /// Issued bearer token
        token: String,
    },

    /// Login failed
    LoginFailed {
        /// Human-readable message for the form
        message: String,
    },

    /// Signup completed (account created, still anonymous)
    SignupSucceeded,

    /// Signup failed
    SignupFailed {
        /// Human-readable message for the form
        message: String,
    },
}

/// Todo collection actions
#[derive(Debug, Clone, PartialEq)]
pub enum TodoAction {
    // ── Commands ────────────────────────────────────────────────────────
    /// Fetch a page of todos (1-based), replacing the whole collection
    Fetch {
        /// Page to fetch
        page: u32,
    },

    /// Create a todo; on success it is prepended locally, without a refetch
    Add {
        /// Fields for the new todo
        data: CreateTodo,
    },

    /// Partially update a todo
    Update {
        /// Target identity
        id: String,
        /// Fields to change
        updates: UpdateTodo,
    },

    /// Flip a todo's completion flag server-side
    Toggle {
        /// Target identity
        id: String,
    },

    /// Delete a todo
    Delete {
        /// Target identity
        id: String,
    },

    /// Clear only the error field
    ClearError,

    /// Record the page the view intends to show next
    SetPage {
        /// Page number (1-based)
        page: u32,
    },

    // ── Events ──────────────────────────────────────────────────────────
    /// A page arrived; it supersedes the in-memory collection entirely
    Fetched {
        /// The fetched page, in server order
        todos: Vec<Todo>,
        /// Page it was fetched for
        page: u32,
    },

    /// Fetch failed
    FetchFailed {
        /// Human-readable message
        message: String,
    },

    /// Create completed
    Added {
        /// The new todo as the backend recorded it
        todo: Todo,
    },

    /// Create failed
    AddFailed {
        /// Human-readable message
        message: String,
    },

    /// Update or toggle completed; both resolve identically
    Updated {
        /// Target identity
        id: String,
        /// The record as the backend now holds it
        todo: Todo,
    },

    /// Update failed
    UpdateFailed {
        /// Human-readable message
        message: String,
    },

    /// Toggle failed
    ToggleFailed {
        /// Human-readable message
        message: String,
    },

    /// Delete completed
    Deleted {
        /// Identity that was deleted
        id: String,
    },

    /// Delete failed
    DeleteFailed {
        /// Human-readable message
        message: String,
    },
}
