//! Route guard: renders protected content only for a signed-in user.
//!
//! The guard is a pure read of the `user` slice. It never touches the
//! network and never mutates the store.

use super::route::Route;
use crate::store::user::UserState;

/// Where to send the user instead of rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    /// Replace the current history entry rather than push a new one, so
    /// going back does not land on the guarded screen again.
    pub replace: bool,
}

impl Redirect {
    pub fn to_sign_in() -> Self {
        Self {
            to: Route::SignIn,
            replace: true,
        }
    }
}

/// Result of passing content through the guard.
#[derive(Debug, Clone, PartialEq)]
pub enum Guarded<T> {
    Render(T),
    Redirect(Redirect),
}

impl<T> Guarded<T> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Wraps any content with an authentication requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct Protected<T> {
    requires_auth: bool,
    content: T,
}

impl<T> Protected<T> {
    pub fn new(requires_auth: bool, content: T) -> Self {
        Self {
            requires_auth,
            content,
        }
    }

    /// Content that needs a signed-in user.
    pub fn authenticated(content: T) -> Self {
        Self::new(true, content)
    }

    pub fn resolve(self, user: &UserState) -> Guarded<T> {
        if self.requires_auth && !user.is_authenticated() {
            return Guarded::Redirect(Redirect::to_sign_in());
        }
        Guarded::Render(self.content)
    }
}

/// Guard a route using its own requirement.
pub fn guard_route(route: Route, user: &UserState) -> Guarded<Route> {
    Protected::new(route.requires_auth(), route).resolve(user)
}
