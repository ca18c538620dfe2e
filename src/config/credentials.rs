//! Bearer credentials.
//!
//! Requests read the token through a [`CredentialProvider`] handed to the
//! API client at construction, so nothing reaches into global storage.

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Source of the bearer token attached to outgoing requests.
pub trait CredentialProvider: Send + Sync {
    /// Current token, or `None` when the user is signed out.
    fn token(&self) -> Option<SecureString>;
}

/// Fixed token, used by one-shot commands and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<SecureString>);

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(SecureString::new(token.into())))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredentials {
    fn token(&self) -> Option<SecureString> {
        self.0.clone()
    }
}
