//! Route guard.
//!
//! Pure resolution of the route surface against the auth store's
//! authenticated/loading flags. No routing-library mechanics live here -
//! the view layer asks where a path leads and performs the navigation (or
//! shows a spinner) itself.

use crate::state::AuthState;

/// The route surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` - landing page
    Landing,
    /// `/login`
    Login,
    /// `/signup`
    Signup,
    /// `/todos` - requires authentication
    Todos,
    /// `/dashboard` - redirect shim
    Dashboard,
}

impl Route {
    /// Parse a path into a route; unmatched paths are `None`
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Self::Landing),
            "/login" => Some(Self::Login),
            "/signup" => Some(Self::Signup),
            "/todos" => Some(Self::Todos),
            "/dashboard" => Some(Self::Dashboard),
            _ => None,
        }
    }

    /// The path this route renders at
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Todos => "/todos",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Outcome of resolving a route against the current auth state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Auth state still loading: show a spinner, decide later
    Pending,
    /// Render the route
    Allow(Route),
    /// Navigate elsewhere instead
    Redirect(Route),
}

/// Resolve a route against the auth state.
///
/// Landing, login and signup redirect to `/todos` once authenticated;
/// `/todos` requires authentication and falls back to `/login`;
/// `/dashboard` is a shim onto `/todos` or `/`.
#[must_use]
pub fn resolve(route: Route, auth: &AuthState) -> Resolution {
    if auth.is_loading {
        return Resolution::Pending;
    }

    match route {
        Route::Landing | Route::Login | Route::Signup => {
            if auth.is_authenticated {
                Resolution::Redirect(Route::Todos)
            } else {
                Resolution::Allow(route)
            }
        }
        Route::Todos => {
            if auth.is_authenticated {
                Resolution::Allow(Route::Todos)
            } else {
                Resolution::Redirect(Route::Login)
            }
        }
        Route::Dashboard => {
            if auth.is_authenticated {
                Resolution::Redirect(Route::Todos)
            } else {
                Resolution::Redirect(Route::Landing)
            }
        }
    }
}

/// Resolve a raw path; unmatched paths redirect to `/`
#[must_use]
pub fn resolve_path(path: &str, auth: &AuthState) -> Resolution {
    Route::parse(path).map_or(Resolution::Redirect(Route::Landing), |route| {
        resolve(route, auth)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> AuthState {
        AuthState {
            is_loading: false,
            initialized: true,
            ..AuthState::default()
        }
    }

    fn authenticated() -> AuthState {
        AuthState {
            is_authenticated: true,
            is_loading: false,
            initialized: true,
            ..AuthState::default()
        }
    }

    #[test]
    fn loading_state_defers_every_route() {
        let loading = AuthState::default();
        for route in [
            Route::Landing,
            Route::Login,
            Route::Signup,
            Route::Todos,
            Route::Dashboard,
        ] {
            assert_eq!(resolve(route, &loading), Resolution::Pending);
        }
    }

    #[test]
    fn auth_pages_redirect_when_authenticated() {
        let auth = authenticated();
        for route in [Route::Landing, Route::Login, Route::Signup] {
            assert_eq!(resolve(route, &auth), Resolution::Redirect(Route::Todos));
        }
    }

    #[test]
    fn todos_requires_authentication() {
        assert_eq!(
            resolve(Route::Todos, &anonymous()),
            Resolution::Redirect(Route::Login)
        );
        assert_eq!(
            resolve(Route::Todos, &authenticated()),
            Resolution::Allow(Route::Todos)
        );
    }

    #[test]
    fn dashboard_is_a_shim() {
        assert_eq!(
            resolve(Route::Dashboard, &authenticated()),
            Resolution::Redirect(Route::Todos)
        );
        assert_eq!(
            resolve(Route::Dashboard, &anonymous()),
            Resolution::Redirect(Route::Landing)
        );
    }

    #[test]
    fn unmatched_paths_redirect_to_landing() {
        assert_eq!(
            resolve_path("/nope", &anonymous()),
            Resolution::Redirect(Route::Landing)
        );
    }

    #[test]
    fn parse_roundtrips_known_paths() {
        for route in [
            Route::Landing,
            Route::Login,
            Route::Signup,
            Route::Todos,
            Route::Dashboard,
        ] {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }
}
