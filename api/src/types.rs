//! Wire types for the backend REST contract
//!
//! These mirror the backend JSON exactly; the client holds cached copies and
//! never mutates them except by replacing whole records from fresh responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform wrapper every backend response uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Whether the operation succeeded
    pub success: bool,

    /// Human-readable message (may be empty)
    #[serde(default)]
    pub message: String,

    /// Payload, present on successful data-carrying responses
    #[serde(default)]
    pub data: Option<T>,

    /// Machine-oriented error detail, present on failures
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Best available message for a failed envelope
    #[must_use]
    pub fn failure_message(&self) -> String {
        if self.message.is_empty() {
            self.error.clone().unwrap_or_default()
        } else {
            self.message.clone()
        }
    }
}

/// Identity record returned by the backend
///
/// Immutable from the client's perspective except via a full refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Opaque backend-assigned identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Whether the account is active
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A single todo record
///
/// Identity is `id` (opaque, backend-assigned). The client holds a cached
/// copy belonging to the currently authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Opaque backend-assigned identifier
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Completion flag
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Bearer token issued by the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthToken {
    /// The bearer string to attach to authenticated requests
    pub access_token: String,
    /// Token scheme, `"bearer"` in practice
    #[serde(default)]
    pub token_type: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: i64,
}

/// Login response payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// The authenticated user
    pub user: User,
    /// The issued token
    pub token: AuthToken,
}

/// Signup request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Plain password (the backend hashes it)
    pub password: String,
}

/// Login request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plain password
    pub password: String,
}

/// Create-todo request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTodo {
    /// Title, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial-update request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTodo {
    /// New title, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New completion flag, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}
