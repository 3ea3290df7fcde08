//! Programmable gateway fakes for testing.
//!
//! Each mock holds a queue of scripted results per endpoint; effects pop
//! the next result on call. An unscripted call resolves to a transport
//! error rather than panicking, so exhausted scripts surface as ordinary
//! operation failures.

use donelist_api::{
    ApiError, AuthSession, AuthToken, CreateTodo, LoginRequest, Result, SignupRequest, Todo,
    UpdateTodo, User,
};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::providers::{AuthGateway, TodoGateway};

/// Build a login session payload for scripting mocks
#[must_use]
pub fn session(user: User, token: &str) -> AuthSession {
    AuthSession {
        user,
        token: AuthToken {
            access_token: token.to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
        },
    }
}

type Script<T> = Arc<Mutex<VecDeque<Result<T>>>>;

fn push<T>(script: &Script<T>, result: Result<T>) {
    script
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push_back(result);
}

fn pop<T>(script: &Script<T>) -> Result<T> {
    script
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Request("no scripted response".to_string())))
}

/// Programmable [`AuthGateway`] fake
#[derive(Clone, Default)]
pub struct MockAuthGateway {
    signup_results: Script<()>,
    login_results: Script<AuthSession>,
    me_results: Script<User>,
}

impl MockAuthGateway {
    /// Create a mock with empty scripts
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next signup result
    pub fn push_signup(&self, result: Result<()>) {
        push(&self.signup_results, result);
    }

    /// Script the next login result
    pub fn push_login(&self, result: Result<AuthSession>) {
        push(&self.login_results, result);
    }

    /// Script the next profile-fetch result
    pub fn push_me(&self, result: Result<User>) {
        push(&self.me_results, result);
    }
}

impl AuthGateway for MockAuthGateway {
    fn signup(&self, _request: SignupRequest) -> impl Future<Output = Result<()>> + Send {
        let script = Arc::clone(&self.signup_results);
        async move { pop(&script) }
    }

    fn login(&self, _request: LoginRequest) -> impl Future<Output = Result<AuthSession>> + Send {
        let script = Arc::clone(&self.login_results);
        async move { pop(&script) }
    }

    fn me(&self) -> impl Future<Output = Result<User>> + Send {
        let script = Arc::clone(&self.me_results);
        async move { pop(&script) }
    }
}

/// Programmable [`TodoGateway`] fake
///
/// Records `list` and `delete` call arguments for assertions.
#[derive(Clone, Default)]
pub struct MockTodoGateway {
    list_results: Script<Vec<Todo>>,
    create_results: Script<Todo>,
    update_results: Script<Todo>,
    toggle_results: Script<Todo>,
    delete_results: Script<()>,
    list_calls: Arc<Mutex<Vec<(u32, u32)>>>,
    delete_calls: Arc<Mutex<Vec<String>>>,
}

impl MockTodoGateway {
    /// Create a mock with empty scripts
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next list result
    pub fn push_list(&self, result: Result<Vec<Todo>>) {
        push(&self.list_results, result);
    }

    /// Script the next create result
    pub fn push_create(&self, result: Result<Todo>) {
        push(&self.create_results, result);
    }

    /// Script the next update result
    pub fn push_update(&self, result: Result<Todo>) {
        push(&self.update_results, result);
    }

    /// Script the next toggle result
    pub fn push_toggle(&self, result: Result<Todo>) {
        push(&self.toggle_results, result);
    }

    /// Script the next delete result
    pub fn push_delete(&self, result: Result<()>) {
        push(&self.delete_results, result);
    }

    /// `(skip, limit)` pairs of the list calls made so far
    #[must_use]
    pub fn list_calls(&self) -> Vec<(u32, u32)> {
        self.list_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Ids of the delete calls made so far
    #[must_use]
    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TodoGateway for MockTodoGateway {
    fn list(&self, skip: u32, limit: u32) -> impl Future<Output = Result<Vec<Todo>>> + Send {
        self.list_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((skip, limit));
        let script = Arc::clone(&self.list_results);
        async move { pop(&script) }
    }

    fn create(&self, _data: CreateTodo) -> impl Future<Output = Result<Todo>> + Send {
        let script = Arc::clone(&self.create_results);
        async move { pop(&script) }
    }

    fn update(
        &self,
        _id: String,
        _updates: UpdateTodo,
    ) -> impl Future<Output = Result<Todo>> + Send {
        let script = Arc::clone(&self.update_results);
        async move { pop(&script) }
    }

    fn toggle(&self, _id: String) -> impl Future<Output = Result<Todo>> + Send {
        let script = Arc::clone(&self.toggle_results);
        async move { pop(&script) }
    }

    fn delete(&self, id: String) -> impl Future<Output = Result<()>> + Send {
        self.delete_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id);
        let script = Arc::clone(&self.delete_results);
        async move { pop(&script) }
    }
}
