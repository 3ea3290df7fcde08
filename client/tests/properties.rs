//! Property tests for the derived views over the todo collection.

#![allow(clippy::unwrap_used)]

use chrono::{Duration, TimeZone, Utc};
use donelist_api::Todo;
use donelist_client::TodoListState;
use proptest::prelude::*;

fn arb_todo() -> impl Strategy<Value = Todo> {
    (0u32..10_000, 0i64..90, any::<bool>(), 0i64..5).prop_map(
        |(n, day_offset, completed, completion_lag)| {
            let created =
                Utc.with_ymd_and_hms(2025, 1, 1, 9, 30, 0).unwrap() + Duration::days(day_offset);
            let updated = created + Duration::days(completion_lag);

            Todo {
                id: format!("t{n}"),
                user_id: "u1".to_string(),
                title: format!("todo {n}"),
                description: String::new(),
                completed,
                created_at: created,
                updated_at: updated,
            }
        },
    )
}

fn state_of(todos: Vec<Todo>) -> TodoListState {
    let total_count = todos.len();
    TodoListState {
        todos,
        total_count,
        ..TodoListState::default()
    }
}

proptest! {
    #[test]
    fn stats_partitions_hold(todos in prop::collection::vec(arb_todo(), 0..40)) {
        let stats = state_of(todos).stats();

        prop_assert_eq!(stats.total, stats.completed + stats.uncompleted);
        prop_assert_eq!(stats.completed, stats.on_time + stats.overtime);
    }

    #[test]
    fn by_date_keys_are_exact_and_strictly_descending(
        todos in prop::collection::vec(arb_todo(), 0..40)
    ) {
        let state = state_of(todos.clone());
        let grouped = state.todos_by_date();

        // Strictly descending keys
        for pair in grouped.windows(2) {
            prop_assert!(pair[0].0 > pair[1].0);
        }

        // Keys are exactly the distinct creation dates
        let mut expected: Vec<_> = todos.iter().map(|t| t.created_at.date_naive()).collect();
        expected.sort_unstable();
        expected.dedup();
        let mut actual: Vec<_> = grouped.iter().map(|(date, _)| *date).collect();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);

        // Every group holds exactly that date's todos, and nothing is lost
        let mut grouped_total = 0;
        for (date, group) in &grouped {
            prop_assert!(!group.is_empty());
            for todo in group {
                prop_assert_eq!(todo.created_at.date_naive(), *date);
            }
            grouped_total += group.len();
        }
        prop_assert_eq!(grouped_total, todos.len());
    }
}
