//! Store-level todo flows against programmable gateway fakes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use donelist_api::{ApiError, CreateTodo, Todo};
use donelist_client::mocks::MockTodoGateway;
use donelist_client::{TodoAction, TodoEnvironment, TodoStore, TodosReducer};
use donelist_runtime::Store;
use std::time::Duration;

fn todo(id: &str, title: &str) -> Todo {
    Todo {
        id: id.to_string(),
        user_id: "u1".to_string(),
        title: title.to_string(),
        description: String::new(),
        completed: false,
        created_at: "2025-03-01T10:00:00Z".parse().unwrap(),
        updated_at: "2025-03-01T10:00:00Z".parse().unwrap(),
    }
}

fn store_with(gateway: MockTodoGateway) -> TodoStore<MockTodoGateway> {
    Store::new(
        donelist_client::TodoListState::default(),
        TodosReducer::new(),
        TodoEnvironment::new(gateway),
    )
}

async fn settle(store: &TodoStore<MockTodoGateway>, action: TodoAction) {
    let mut handle = store.send(action).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .unwrap();
}

#[tokio::test]
async fn add_then_fetch_supersedes_the_local_prepend() {
    let gateway = MockTodoGateway::new();
    gateway.push_list(Ok(vec![todo("t2", "B"), todo("t1", "A")]));
    gateway.push_create(Ok(todo("t3", "C")));
    gateway.push_list(Ok(vec![todo("t3", "C"), todo("t2", "B"), todo("t1", "A")]));

    let store = store_with(gateway);

    settle(&store, TodoAction::Fetch { page: 1 }).await;
    settle(
        &store,
        TodoAction::Add {
            data: CreateTodo {
                title: Some("C".to_string()),
                description: None,
            },
        },
    )
    .await;

    // Local prepend: [t3, t2, t1]
    let state = store.state(Clone::clone).await;
    let ids: Vec<String> = state.todos.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec!["t3", "t2", "t1"]);
    assert_eq!(state.total_count, 3);

    // The next fetch replaces the collection entirely - no duplication
    settle(&store, TodoAction::Fetch { page: 1 }).await;

    let state = store.state(Clone::clone).await;
    let ids: Vec<String> = state.todos.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec!["t3", "t2", "t1"]);
    assert_eq!(state.total_count, 3);
}

#[tokio::test]
async fn delete_removes_the_entry_and_calls_the_backend() {
    let gateway = MockTodoGateway::new();
    gateway.push_list(Ok(vec![todo("t3", "C"), todo("t2", "B"), todo("t1", "A")]));
    gateway.push_delete(Ok(()));

    let store = store_with(gateway.clone());

    settle(&store, TodoAction::Fetch { page: 1 }).await;
    settle(
        &store,
        TodoAction::Delete {
            id: "t2".to_string(),
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    let ids: Vec<String> = state.todos.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec!["t3", "t1"]);
    assert_eq!(state.total_count, 2);
    assert_eq!(gateway.delete_calls(), vec!["t2".to_string()]);
}

#[tokio::test]
async fn toggle_resolves_like_an_update() {
    let gateway = MockTodoGateway::new();
    gateway.push_list(Ok(vec![todo("t1", "A")]));
    gateway.push_toggle(Ok(Todo {
        completed: true,
        ..todo("t1", "A")
    }));

    let store = store_with(gateway);

    settle(&store, TodoAction::Fetch { page: 1 }).await;
    settle(
        &store,
        TodoAction::Toggle {
            id: "t1".to_string(),
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    assert!(state.todos[0].completed);
    assert_eq!(state.stats().completed, 1);
}

#[tokio::test]
async fn fetch_failure_records_the_error_and_keeps_the_page() {
    let gateway = MockTodoGateway::new();
    gateway.push_list(Ok(vec![todo("t1", "A")]));
    gateway.push_list(Err(ApiError::Timeout));

    let store = store_with(gateway);

    settle(&store, TodoAction::Fetch { page: 1 }).await;

    let terminal = store
        .send_and_wait_for(
            TodoAction::Fetch { page: 1 },
            |a| matches!(a, TodoAction::Fetched { .. } | TodoAction::FetchFailed { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(
        terminal,
        TodoAction::FetchFailed {
            message: "Failed to fetch todos".to_string()
        }
    );

    // The previous page stays on screen alongside the error
    let state = store.state(Clone::clone).await;
    assert_eq!(state.todos.len(), 1);
    assert_eq!(state.error.as_deref(), Some("Failed to fetch todos"));
    assert!(!state.loading);
}
