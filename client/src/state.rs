//! Store state types.
//!
//! All types are `Clone` to support the functional architecture pattern.
//! Derived views ([`TodoListState::stats`], [`TodoListState::todos_by_date`])
//! are recomputed on every call - the underlying collection mutates, and
//! profiling has not justified memoization.

use chrono::NaiveDate;
use donelist_api::{Todo, User};
use std::collections::BTreeMap;

/// Auth session state.
///
/// Lifecycle: created at process start with `is_loading = true`; populated
/// by rehydration ([`crate::actions::AuthAction::Initialize`]) or by login;
/// cleared by logout or a rejected rehydration or a session-invalidation
/// signal.
///
/// Invariant: `is_authenticated == user.is_some()`, and `token` and `user`
/// are set and cleared together on every transition except transient
/// loading.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    /// Currently authenticated user, if any
    pub user: Option<User>,

    /// Bearer token for the current session, if any
    pub token: Option<String>,

    /// Whether a user is authenticated
    pub is_authenticated: bool,

    /// Whether an auth operation (or startup rehydration) is in flight
    pub is_loading: bool,

    /// Last operation error, cleared explicitly or by the next operation
    pub error: Option<String>,

    /// Whether startup rehydration has already run (it runs once per
    /// process lifetime)
    pub initialized: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            is_authenticated: false,
            is_loading: true,
            error: None,
            initialized: false,
        }
    }
}

impl AuthState {
    /// Reset to the anonymous state, keeping the `initialized` marker
    pub fn clear_session(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
        self.is_loading = false;
    }
}

/// Todo collection state.
///
/// `todos` is most-recent-first after creates, server order otherwise. The
/// collection only ever holds todos of the authenticated user - enforced by
/// refetching on auth transitions, not by client-side filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoListState {
    /// The fetched page of todos
    pub todos: Vec<Todo>,

    /// Whether a todo operation is in flight
    pub loading: bool,

    /// Last operation error
    pub error: Option<String>,

    /// Page the collection was fetched for (1-based)
    pub current_page: u32,

    /// Approximate total: the length of the last fetched page, adjusted by
    /// local creates/deletes. The backend reports no true total.
    pub total_count: usize,
}

impl Default for TodoListState {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            loading: false,
            error: None,
            current_page: 1,
            total_count: 0,
        }
    }
}

/// Derived statistics over the current in-memory collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoStats {
    /// Number of todos in the collection
    pub total: usize,
    /// Completed todos
    pub completed: usize,
    /// Not-yet-completed todos
    pub uncompleted: usize,
    /// Completed todos whose creation and last update fell on the same
    /// calendar date
    pub on_time: usize,
    /// Completed todos finished on a later calendar date than created
    pub overtime: usize,
}

impl TodoListState {
    /// Compute statistics over the current collection.
    ///
    /// Satisfies `total == completed + uncompleted` and
    /// `completed == on_time + overtime` for every reachable state.
    #[must_use]
    pub fn stats(&self) -> TodoStats {
        let total = self.todos.len();
        let completed = self.todos.iter().filter(|t| t.completed).count();
        let on_time = self
            .todos
            .iter()
            .filter(|t| t.completed && t.created_at.date_naive() == t.updated_at.date_naive())
            .count();

        TodoStats {
            total,
            completed,
            uncompleted: total - completed,
            on_time,
            overtime: completed - on_time,
        }
    }

    /// Group todos by the calendar date of their creation.
    ///
    /// Keys are exactly the distinct creation dates present, in strictly
    /// descending order; each group preserves collection order.
    #[must_use]
    pub fn todos_by_date(&self) -> Vec<(NaiveDate, Vec<Todo>)> {
        let mut groups: BTreeMap<NaiveDate, Vec<Todo>> = BTreeMap::new();

        for todo in &self.todos {
            groups
                .entry(todo.created_at.date_naive())
                .or_default()
                .push(todo.clone());
        }

        groups.into_iter().rev().collect()
    }

    /// Find a todo's position by identity
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.todos.iter().position(|t| t.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    fn todo(id: &str, completed: bool, created: &str, updated: &str) -> Todo {
        Todo {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("todo {id}"),
            description: String::new(),
            completed,
            created_at: ts(created),
            updated_at: ts(updated),
        }
    }

    #[test]
    fn default_auth_state_starts_loading() {
        let state = AuthState::default();
        assert!(state.is_loading);
        assert!(!state.is_authenticated);
        assert!(!state.initialized);
    }

    #[test]
    fn stats_counts_on_time_and_overtime() {
        let state = TodoListState {
            todos: vec![
                // completed same calendar day
                todo("t1", true, "2025-03-01T08:00:00Z", "2025-03-01T21:00:00Z"),
                // completed two days later
                todo("t2", true, "2025-03-01T08:00:00Z", "2025-03-03T09:00:00Z"),
                // open
                todo("t3", false, "2025-03-02T08:00:00Z", "2025-03-02T08:00:00Z"),
            ],
            ..TodoListState::default()
        };

        let stats = state.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.uncompleted, 1);
        assert_eq!(stats.on_time, 1);
        assert_eq!(stats.overtime, 1);
    }

    #[test]
    fn stats_of_empty_collection_are_zero() {
        assert_eq!(TodoListState::default().stats(), TodoStats::default());
    }

    #[test]
    fn todos_by_date_orders_keys_descending() {
        let state = TodoListState {
            todos: vec![
                todo("t3", false, "2025-03-03T08:00:00Z", "2025-03-03T08:00:00Z"),
                todo("t2", false, "2025-03-01T12:00:00Z", "2025-03-01T12:00:00Z"),
                todo("t1", false, "2025-03-01T08:00:00Z", "2025-03-01T08:00:00Z"),
                todo("t0", false, "2025-02-27T08:00:00Z", "2025-02-27T08:00:00Z"),
            ],
            ..TodoListState::default()
        };

        let grouped = state.todos_by_date();
        let keys: Vec<NaiveDate> = grouped.iter().map(|(date, _)| *date).collect();

        assert_eq!(
            keys,
            vec![
                NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 27).unwrap(),
            ]
        );

        // Groups keep collection order
        let march_first = &grouped[1].1;
        assert_eq!(march_first[0].id, "t2");
        assert_eq!(march_first[1].id, "t1");
    }

    #[test]
    fn todos_by_date_of_empty_collection_is_empty() {
        assert!(TodoListState::default().todos_by_date().is_empty());
    }
}
