//! Gateway implementations backed by the HTTP adapter.

use super::{AuthGateway, TodoGateway};
use donelist_api::{
    ApiClient, AuthSession, CreateTodo, LoginRequest, Result, SignupRequest, Todo, UpdateTodo,
    User,
};
use std::future::Future;

impl AuthGateway for ApiClient {
    fn signup(&self, request: SignupRequest) -> impl Future<Output = Result<()>> + Send {
        async move { ApiClient::signup(self, &request).await }
    }

    fn login(&self, request: LoginRequest) -> impl Future<Output = Result<AuthSession>> + Send {
        async move { ApiClient::login(self, &request).await }
    }

    fn me(&self) -> impl Future<Output = Result<User>> + Send {
        async move { ApiClient::me(self).await }
    }
}

impl TodoGateway for ApiClient {
    fn list(&self, skip: u32, limit: u32) -> impl Future<Output = Result<Vec<Todo>>> + Send {
        async move { self.list_todos(skip, limit).await }
    }

    fn create(&self, data: CreateTodo) -> impl Future<Output = Result<Todo>> + Send {
        async move { self.create_todo(&data).await }
    }

    fn update(&self, id: String, updates: UpdateTodo) -> impl Future<Output = Result<Todo>> + Send {
        async move { self.update_todo(&id, &updates).await }
    }

    fn toggle(&self, id: String) -> impl Future<Output = Result<Todo>> + Send {
        async move { self.toggle_todo(&id).await }
    }

    fn delete(&self, id: String) -> impl Future<Output = Result<()>> + Send {
        async move { self.delete_todo(&id).await }
    }
}
