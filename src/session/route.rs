use std::fmt;

/// Every screen the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SignIn,
    SignUp,
    Home,
    Profile,
    Friends,
    Quests,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::SignIn => "/sign/in",
            Self::SignUp => "/sign/up",
            Self::Home => "/",
            Self::Profile => "/profile",
            Self::Friends => "/profile/friends",
            Self::Quests => "/profile/quests",
        }
    }

    /// Parse a path. Trailing slashes are ignored; unknown paths return `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Home),
            "/sign/in" => Some(Self::SignIn),
            "/sign/up" => Some(Self::SignUp),
            "/profile" => Some(Self::Profile),
            "/profile/friends" => Some(Self::Friends),
            "/profile/quests" => Some(Self::Quests),
            _ => None,
        }
    }

    /// Only the sign-in and sign-up screens are public.
    pub fn requires_auth(&self) -> bool {
        !self.is_sign_route()
    }

    pub fn is_sign_route(&self) -> bool {
        matches!(self, Self::SignIn | Self::SignUp)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::SignUp => "Sign up",
            Self::Home => "Map",
            Self::Profile => "Profile",
            Self::Friends => "Friends",
            Self::Quests => "Achievements",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::SignIn,
            Route::SignUp,
            Route::Home,
            Route::Profile,
            Route::Friends,
            Route::Quests,
        ] {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(Route::parse("/profile/"), Some(Route::Profile));
        assert_eq!(Route::parse("/nowhere"), None);
    }

    #[test]
    fn only_sign_routes_are_public() {
        assert!(!Route::SignIn.requires_auth());
        assert!(!Route::SignUp.requires_auth());
        assert!(Route::Home.requires_auth());
        assert!(Route::Quests.requires_auth());
    }
}
