//! Theme preference machine.
//!
//! Small self-contained store for the persisted light/dark preference.
//! Every transition writes the choice back through the injected storage so
//! it survives process restarts.

use donelist_core::effect::Effect;
use donelist_core::environment::{Storage, THEME_KEY};
use donelist_core::reducer::Reducer;
use donelist_core::{SmallVec, smallvec};
use std::sync::Arc;

/// Visual theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light theme (the default)
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Persisted representation (`"light"` / `"dark"`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    /// Current preference
    pub theme: Theme,
}

/// Theme actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    /// Load the persisted preference (or the default) and persist it back
    Initialize,
    /// Select a specific theme
    Set {
        /// Theme to select
        theme: Theme,
    },
    /// Flip between light and dark
    Toggle,
}

/// Dependencies of the theme reducer
#[derive(Clone)]
pub struct ThemeEnvironment {
    /// Persisted local state (`theme`)
    pub storage: Arc<dyn Storage>,
}

impl ThemeEnvironment {
    /// Create a new theme environment
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

/// Theme reducer
#[derive(Debug, Clone, Default)]
pub struct ThemeReducer;

impl ThemeReducer {
    /// Create a new theme reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ThemeReducer {
    type State = ThemeState;
    type Action = ThemeAction;
    type Environment = ThemeEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ThemeAction::Initialize => {
                state.theme = env
                    .storage
                    .get(THEME_KEY)
                    .map_or_else(Theme::default, |raw| Theme::parse(&raw));
            }
            ThemeAction::Set { theme } => {
                state.theme = theme;
            }
            ThemeAction::Toggle => {
                state.theme = state.theme.flipped();
            }
        }

        env.storage.set(THEME_KEY, state.theme.as_str());
        smallvec![Effect::None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use donelist_testing::mocks::MemoryStorage;
    use donelist_testing::{ReducerTest, assertions};

    fn env_with(storage: &MemoryStorage) -> ThemeEnvironment {
        ThemeEnvironment::new(Arc::new(storage.clone()))
    }

    #[test]
    fn initialize_loads_persisted_preference() {
        let storage = MemoryStorage::new();
        storage.set(THEME_KEY, "dark");

        ReducerTest::new(ThemeReducer::new())
            .with_env(env_with(&storage))
            .given_state(ThemeState::default())
            .when_action(ThemeAction::Initialize)
            .then_state(|state| assert_eq!(state.theme, Theme::Dark))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn initialize_defaults_to_light() {
        ReducerTest::new(ThemeReducer::new())
            .with_env(env_with(&MemoryStorage::new()))
            .given_state(ThemeState::default())
            .when_action(ThemeAction::Initialize)
            .then_state(|state| assert_eq!(state.theme, Theme::Light))
            .run();
    }

    #[test]
    fn toggle_flips_and_persists() {
        let storage = MemoryStorage::new();
        let probe = storage.clone();

        ReducerTest::new(ThemeReducer::new())
            .with_env(env_with(&storage))
            .given_state(ThemeState { theme: Theme::Light })
            .when_action(ThemeAction::Toggle)
            .then_state(move |state| {
                assert_eq!(state.theme, Theme::Dark);
                assert_eq!(probe.get(THEME_KEY).as_deref(), Some("dark"));
            })
            .run();
    }

    #[test]
    fn unknown_persisted_value_falls_back_to_light() {
        let storage = MemoryStorage::new();
        storage.set(THEME_KEY, "solarized");

        ReducerTest::new(ThemeReducer::new())
            .with_env(env_with(&storage))
            .given_state(ThemeState::default())
            .when_action(ThemeAction::Initialize)
            .then_state(|state| assert_eq!(state.theme, Theme::Light))
            .run();
    }
}
