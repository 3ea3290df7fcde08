//! Todo collection reducer.
//!
//! Fetches replace the whole in-memory page; creates prepend locally
//! (most-recent-first) without a refetch; updates and toggles replace by
//! identity match; deletes remove by identity match. Mutations targeting an
//! id absent from the current page are silent no-ops - the entry is already
//! gone from view - and never touch `total_count`.
//!
//! Overlapping operations settle last-write-wins at the state-update
//! boundary; there is no cancellation and no version check. The runtime
//! documents this as at-most-eventually-consistent.

use crate::actions::TodoAction;
use crate::environment::TodoEnvironment;
use crate::providers::TodoGateway;
use crate::state::TodoListState;
use donelist_core::effect::Effect;
use donelist_core::reducer::Reducer;
use donelist_core::{SmallVec, smallvec};

/// Page size for todo fetches; the offset is `(page - 1) * PAGE_SIZE`
pub const PAGE_SIZE: u32 = 100;

const FETCH_FALLBACK: &str = "Failed to fetch todos";
const ADD_FALLBACK: &str = "Failed to create todo";
const UPDATE_FALLBACK: &str = "Failed to update todo";
const TOGGLE_FALLBACK: &str = "Failed to toggle todo";
const DELETE_FALLBACK: &str = "Failed to delete todo";

/// Todo collection reducer.
///
/// Generic over the [`TodoGateway`] so tests wire a programmable fake.
#[derive(Debug, Clone)]
pub struct TodosReducer<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TodosReducer<T> {
    /// Create a new todos reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> Default for TodosReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Reducer for TodosReducer<T>
where
    T: TodoGateway + Clone + 'static,
{
    type State = TodoListState;
    type Action = TodoAction;
    type Environment = TodoEnvironment<T>;

    #[allow(clippy::too_many_lines)] // one arm per operation and its terminal events
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // Fetch: replace the whole page
            // ═══════════════════════════════════════════════════════════
            TodoAction::Fetch { page } => {
                state.loading = true;
                state.error = None;

                let skip = page.saturating_sub(1) * PAGE_SIZE;
                let gateway = env.gateway.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.list(skip, PAGE_SIZE).await {
                        Ok(todos) => Some(TodoAction::Fetched { todos, page }),
                        Err(err) => Some(TodoAction::FetchFailed {
                            message: err.user_message(FETCH_FALLBACK),
                        }),
                    }
                }))]
            }

            TodoAction::Fetched { todos, page } => {
                state.loading = false;
                // Page length stands in for the total the backend never
                // reports
                state.total_count = todos.len();
                state.todos = todos;
                state.current_page = page;
                smallvec![Effect::None]
            }

            TodoAction::FetchFailed { message } => {
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════
            // Add: prepend on success, no refetch
            // ═══════════════════════════════════════════════════════════
            TodoAction::Add { data } => {
                state.loading = true;
                state.error = None;

                let gateway = env.gateway.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.create(data).await {
                        Ok(todo) => Some(TodoAction::Added { todo }),
                        Err(err) => Some(TodoAction::AddFailed {
                            message: err.user_message(ADD_FALLBACK),
                        }),
                    }
                }))]
            }

            TodoAction::Added { todo } => {
                state.loading = false;
                state.todos.insert(0, todo);
                state.total_count += 1;
                smallvec![Effect::None]
            }

            TodoAction::AddFailed { message } => {
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════
            // Update / Toggle: both resolve as Updated
            // ═══════════════════════════════════════════════════════════
            TodoAction::Update { id, updates } => {
                state.loading = true;
                state.error = None;

                let gateway = env.gateway.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.update(id.clone(), updates).await {
                        Ok(todo) => Some(TodoAction::Updated { id, todo }),
                        Err(err) => Some(TodoAction::UpdateFailed {
                            message: err.user_message(UPDATE_FALLBACK),
                        }),
                    }
                }))]
            }

            TodoAction::Toggle { id } => {
                state.loading = true;
                state.error = None;

                let gateway = env.gateway.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.toggle(id.clone()).await {
                        Ok(todo) => Some(TodoAction::Updated { id, todo }),
                        Err(err) => Some(TodoAction::ToggleFailed {
                            message: err.user_message(TOGGLE_FALLBACK),
                        }),
                    }
                }))]
            }

            TodoAction::Updated { id, todo } => {
                state.loading = false;
                // Absent id: the entry already left the page; nothing to do
                if let Some(index) = state.position(&id) {
                    state.todos[index] = todo;
                }
                smallvec![Effect::None]
            }

            TodoAction::UpdateFailed { message } => {
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            }

            TodoAction::ToggleFailed { message } => {
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════
            // Delete: remove and decrement only on an actual removal
            // ═══════════════════════════════════════════════════════════
            TodoAction::Delete { id } => {
                state.loading = true;
                state.error = None;

                let gateway = env.gateway.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.delete(id.clone()).await {
                        Ok(()) => Some(TodoAction::Deleted { id }),
                        Err(err) => Some(TodoAction::DeleteFailed {
                            message: err.user_message(DELETE_FALLBACK),
                        }),
                    }
                }))]
            }

            TodoAction::Deleted { id } => {
                state.loading = false;
                if let Some(index) = state.position(&id) {
                    state.todos.remove(index);
                    state.total_count = state.total_count.saturating_sub(1);
                }
                smallvec![Effect::None]
            }

            TodoAction::DeleteFailed { message } => {
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════
            // Local-only transitions
            // ═══════════════════════════════════════════════════════════
            TodoAction::ClearError => {
                state.error = None;
                smallvec![Effect::None]
            }

            TodoAction::SetPage { page } => {
                state.current_page = page;
                smallvec![Effect::None]
            }
        }
    }
}
