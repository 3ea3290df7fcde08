//! Backend API client implementation

use crate::error::{ApiError, Result};
use crate::types::{
    AuthSession, CreateTodo, Envelope, LoginRequest, SignupRequest, Todo, UpdateTodo, User,
};
use donelist_core::environment::{AUTH_TOKEN_KEY, Storage, USER_KEY};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Fixed request timeout applied to every outbound call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Signal published when a 401 response invalidated the persisted session
///
/// The auth store subscribes to this (via the invalidation bridge) so a 401
/// on *any* request - a todos fetch included - converges it to anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInvalidated;

/// Backend API client
///
/// Wraps every outbound request: bearer injection from the injected
/// [`Storage`], fixed base URL and timeout, envelope decoding, and the
/// 401 session-invalidation side effect.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn Storage>,
    invalidations: broadcast::Sender<SessionInvalidated>,
}

impl ApiClient {
    /// Create a new client against an explicit base URL
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: impl Into<String>, storage: Arc<dyn Storage>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        let (invalidations, _) = broadcast::channel(16);

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage,
            invalidations,
        })
    }

    /// Create a new client with the base URL from the environment
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingBaseUrl`] if `DONELIST_API_URL` is not
    /// set, or [`ApiError::Configuration`] if the HTTP client cannot be
    /// constructed.
    pub fn from_env(storage: Arc<dyn Storage>) -> Result<Self> {
        let base_url =
            std::env::var("DONELIST_API_URL").map_err(|_| ApiError::MissingBaseUrl)?;

        Self::new(base_url, storage)
    }

    /// Subscribe to session invalidation signals
    #[must_use]
    pub fn subscribe_invalidations(&self) -> broadcast::Receiver<SessionInvalidated> {
        self.invalidations.subscribe()
    }

    // ── Auth endpoints ──────────────────────────────────────────────────

    /// Register a new account
    ///
    /// Signup does not authenticate: the backend issues no token here.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a failed envelope, or a
    /// non-2xx status.
    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.execute::<serde_json::Value>(
            self.request(Method::POST, "/auth/signup").json(request),
        )
        .await?;
        Ok(())
    }

    /// Exchange credentials for a bearer token and user record
    ///
    /// The client does not persist anything here; persistence is the auth
    /// store's effect on success.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on failure; bad credentials surface the
    /// backend's envelope message.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession> {
        let envelope = self
            .execute::<AuthSession>(self.request(Method::POST, "/auth/login").json(request))
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Fetch the current user's profile (requires a bearer token)
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the stored token is no longer
    /// accepted, any other [`ApiError`] on failure.
    pub async fn me(&self) -> Result<User> {
        let envelope = self
            .execute::<User>(self.request(Method::GET, "/auth/me"))
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    // ── Todo endpoints ──────────────────────────────────────────────────

    /// Fetch a page of todos
    ///
    /// The backend returns no total count; callers approximate it from the
    /// page length.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on failure.
    pub async fn list_todos(&self, skip: u32, limit: u32) -> Result<Vec<Todo>> {
        let envelope = self
            .execute::<Vec<Todo>>(
                self.request(Method::GET, "/todos")
                    .query(&[("skip", skip), ("limit", limit)]),
            )
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Create a todo
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on failure.
    pub async fn create_todo(&self, data: &CreateTodo) -> Result<Todo> {
        let envelope = self
            .execute::<Todo>(self.request(Method::POST, "/todos").json(data))
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Fetch a single todo by id
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on failure.
    pub async fn get_todo(&self, id: &str) -> Result<Todo> {
        let envelope = self
            .execute::<Todo>(self.request(Method::GET, &format!("/todos/{id}")))
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Partially update a todo
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on failure.
    pub async fn update_todo(&self, id: &str, updates: &UpdateTodo) -> Result<Todo> {
        let envelope = self
            .execute::<Todo>(
                self.request(Method::PUT, &format!("/todos/{id}"))
                    .json(updates),
            )
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Delete a todo
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on failure.
    pub async fn delete_todo(&self, id: &str) -> Result<()> {
        self.execute::<serde_json::Value>(
            self.request(Method::DELETE, &format!("/todos/{id}")),
        )
        .await?;
        Ok(())
    }

    /// Flip a todo's completion flag server-side
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on failure.
    pub async fn toggle_todo(&self, id: &str) -> Result<Todo> {
        let envelope = self
            .execute::<Todo>(self.request(Method::PATCH, &format!("/todos/{id}/toggle")))
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));

        if let Some(token) = self.storage.get(AUTH_TOKEN_KEY) {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Envelope<T>> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Request(e.to_string())
            }
        })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let message = envelope_message(&response.text().await.unwrap_or_default());
            self.invalidate_session();
            return Err(ApiError::Unauthorized { message });
        }

        if !status.is_success() {
            let message = envelope_message(&response.text().await.unwrap_or_default());
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if !envelope.success {
            return Err(ApiError::Backend {
                message: envelope.failure_message(),
            });
        }

        Ok(envelope)
    }

    /// Clear the persisted session and notify subscribers.
    ///
    /// Navigation stays with the view layer; the adapter only drops the
    /// stale credentials and signals.
    fn invalidate_session(&self) {
        self.storage.remove(AUTH_TOKEN_KEY);
        self.storage.remove(USER_KEY);
        let _ = self.invalidations.send(SessionInvalidated);
        tracing::warn!("401 response - persisted session invalidated");
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Best-effort message extraction from a raw (possibly non-JSON) body
fn envelope_message(body: &str) -> String {
    match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        Ok(envelope) => envelope.failure_message(),
        Err(_) => body.trim().to_string(),
    }
}
