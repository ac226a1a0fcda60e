use std::fmt;

/// Access token wrapper that never prints its value.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` only when building the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "••••••••")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_masked() {
        let token = SecureString::new("eyJhbGciOi");
        assert_eq!(format!("{:?}", token), "SecureString(••••••••)");
        assert_eq!(token.to_string(), "••••••••");
        assert_eq!(token.expose(), "eyJhbGciOi");
    }
}
