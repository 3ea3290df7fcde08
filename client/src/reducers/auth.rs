//! Auth session reducer.
//!
//! State machine: `uninitialized/loading → {authenticated, anonymous}`,
//! with `error` orthogonal (settable in any state, cleared explicitly or by
//! the next operation).
//!
//! # Flows
//!
//! - **Rehydration**: read persisted user+token; if present, optimistically
//!   authenticate with the cached user and verify against `/auth/me`; a
//!   rejected verification performs logout side effects and lands
//!   anonymous.
//! - **Login/Signup**: loading + cleared error, one backend call, terminal
//!   success/failure event. Signup never authenticates.
//! - **Logout / invalidation**: clear persisted credentials, reset to
//!   anonymous. The invalidation path is fed by the HTTP adapter's 401
//!   signal, so a rejected todos fetch converges this store too.

use crate::actions::AuthAction;
use crate::environment::AuthEnvironment;
use crate::providers::AuthGateway;
use crate::state::AuthState;
use donelist_api::{LoginRequest, SignupRequest, User};
use donelist_core::effect::Effect;
use donelist_core::environment::{AUTH_TOKEN_KEY, Storage, USER_KEY};
use donelist_core::reducer::Reducer;
use donelist_core::{SmallVec, smallvec};
use std::sync::Arc;

/// Fallback when login fails without a backend-supplied message
const LOGIN_FALLBACK: &str = "Login failed";

/// Fallback when signup fails without a backend-supplied message
const SIGNUP_FALLBACK: &str = "Signup failed";

/// Auth session reducer.
///
/// Generic over the [`AuthGateway`] so tests wire a programmable fake.
#[derive(Debug, Clone)]
pub struct AuthReducer<A> {
    _phantom: std::marker::PhantomData<A>,
}

impl<A> AuthReducer<A> {
    /// Create a new auth reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A> Default for AuthReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the persisted user record, tolerating a corrupt value
fn stored_user(storage: &Arc<dyn Storage>) -> Option<User> {
    let raw = storage.get(USER_KEY)?;
    serde_json::from_str(&raw).ok()
}

/// Drop both persisted credential keys
fn clear_credentials(storage: &Arc<dyn Storage>) {
    storage.remove(AUTH_TOKEN_KEY);
    storage.remove(USER_KEY);
}

impl<A> Reducer for AuthReducer<A>
where
    A: AuthGateway + Clone + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment<A>;

    #[allow(clippy::too_many_lines)] // one arm per operation and its terminal events
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // Initialize: rehydrate and verify the persisted session
            // ═══════════════════════════════════════════════════════════
            AuthAction::Initialize => {
                if state.initialized {
                    tracing::warn!("auth store initialized more than once; ignoring");
                    return smallvec![Effect::None];
                }
                state.initialized = true;

                let token = env.storage.get(AUTH_TOKEN_KEY);
                let user = stored_user(&env.storage);

                let (Some(user), Some(token)) = (user, token) else {
                    // Nothing persisted: anonymous, done loading
                    state.clear_session();
                    return smallvec![Effect::None];
                };

                // Optimistically authenticated with the cached user while
                // the profile fetch verifies the token
                state.user = Some(user);
                state.token = Some(token);
                state.is_authenticated = true;
                state.is_loading = true;

                let gateway = env.gateway.clone();
                let storage = Arc::clone(&env.storage);

                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.me().await {
                        Ok(user) => Some(AuthAction::SessionVerified { user }),
                        Err(err) => {
                            tracing::warn!(error = %err, "stored session rejected during rehydration");
                            clear_credentials(&storage);
                            Some(AuthAction::SessionRejected)
                        }
                    }
                }))]
            }

            AuthAction::SessionVerified { user } => {
                // Replace the cached copy with the fresh one
                state.user = Some(user);
                state.is_authenticated = true;
                state.is_loading = false;
                smallvec![Effect::None]
            }

            AuthAction::SessionRejected => {
                state.clear_session();
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════
            // Login
            // ═══════════════════════════════════════════════════════════
            AuthAction::Login { email, password } => {
                state.is_loading = true;
                state.error = None;

                let gateway = env.gateway.clone();
                let storage = Arc::clone(&env.storage);

                smallvec![Effect::Future(Box::pin(async move {
                    match gateway.login(LoginRequest { email, password }).await {
                        Ok(session) => {
                            storage.set(AUTH_TOKEN_KEY, &session.token.access_token);
                            if let Ok(raw) = serde_json::to_string(&session.user) {
                                storage.set(USER_KEY, &raw);
                            }
                            Some(AuthAction::LoginSucceeded {
                                user: session.user,
                                token: session.token.access_token,
                            })
                        }
                        Err(err) => Some(AuthAction::LoginFailed {
                            message: err.user_message(LOGIN_FALLBACK),
                        }),
                    }
                }))]
            }

            AuthAction::LoginSucceeded { user, token } => {
                state.user = Some(user);
                state.token = Some(token);
                state.is_authenticated = true;
                state.is_loading = false;
                state.error = None;
                smallvec![Effect::None]
            }

            AuthAction::LoginFailed { message } => {
                state.is_loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════
            // Signup (does not authenticate)
            // ═══════════════════════════════════════════════════════════
            AuthAction::Signup {
                name,
                email,
                password,
            } => {
                state.is_loading = true;
                state.error = None;

                let gateway = env.gateway.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match gateway
                        .signup(SignupRequest {
                            name,
                            email,
                            password,
                        })
                        .await
                    {
                        Ok(()) => Some(AuthAction::SignupSucceeded),
                        Err(err) => Some(AuthAction::SignupFailed {
                            message: err.user_message(SIGNUP_FALLBACK),
                        }),
                    }
                }))]
            }

            AuthAction::SignupSucceeded => {
                state.is_loading = false;
                smallvec![Effect::None]
            }

            AuthAction::SignupFailed { message } => {
                state.is_loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════
            // Logout and convergence
            // ═══════════════════════════════════════════════════════════
            AuthAction::Logout => {
                clear_credentials(&env.storage);
                state.clear_session();
                state.error = None;
                smallvec![Effect::None]
            }

            AuthAction::SessionInvalidated => {
                // The adapter already cleared storage; clearing again keeps
                // this transition self-sufficient
                tracing::info!("session invalidated; converging to anonymous");
                clear_credentials(&env.storage);
                state.clear_session();
                smallvec![Effect::None]
            }

            AuthAction::ClearError => {
                state.error = None;
                smallvec![Effect::None]
            }
        }
    }
}
