//! Client-side history with guard enforcement.

use super::guard::{guard_route, Guarded};
use super::route::Route;
use crate::store::user::UserState;

/// History stack of visited routes. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    history: Vec<Route>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            history: vec![start],
        }
    }

    pub fn current(&self) -> Route {
        // `history` always holds at least the start route.
        self.history.last().copied().unwrap_or(Route::SignIn)
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn push(&mut self, route: Route) {
        if self.current() != route {
            self.history.push(route);
        }
    }

    /// Swap the current entry for `route`. An entry equal to the one below
    /// it collapses into it.
    pub fn replace(&mut self, route: Route) {
        self.history.pop();
        self.push(route);
        if self.history.is_empty() {
            self.history.push(route);
        }
    }

    /// Pop one entry. Returns `false` when already at the first entry.
    pub fn back(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        true
    }

    /// Push `route` and run the guard on it. Returns the route that ends
    /// up current.
    pub fn navigate(&mut self, route: Route, user: &UserState) -> Route {
        self.push(route);
        self.enforce(user)
    }

    /// Go back, then re-check the guard on whatever is now current.
    pub fn go_back(&mut self, user: &UserState) -> Route {
        self.back();
        self.enforce(user)
    }

    /// Re-run the guard on the current route, e.g. after a forced logout.
    ///
    /// A signed-in user sitting on a sign screen is moved to the map.
    pub fn enforce(&mut self, user: &UserState) -> Route {
        let current = self.current();
        match guard_route(current, user) {
            Guarded::Redirect(redirect) => {
                tracing::debug!(from = %current, to = %redirect.to, "Guard redirect");
                if redirect.replace {
                    self.replace(redirect.to);
                } else {
                    self.push(redirect.to);
                }
            }
            Guarded::Render(route) if route.is_sign_route() && user.is_authenticated() => {
                self.replace(Route::Home);
            }
            Guarded::Render(_) => {}
        }
        self.current()
    }
}
