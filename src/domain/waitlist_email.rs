use std::fmt;

use lazy_regex::regex_is_match;

/// Error returned when an email address fails the shape check
#[derive(Debug, thiserror::Error)]
#[error("`{0}` is not a valid email address")]
pub struct EmailParseError(String);

/// Waitlist email, normalized to lowercase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEmail(String);

impl WaitlistEmail {
    /// Parse a submitted email address
    ///
    /// The shape check is deliberately permissive: something before the `@`,
    /// something after it containing a dot, no whitespace anywhere. Address
    /// case is folded away so that lookups and the uniqueness constraint
    /// treat `Ada@Example.com` and `ada@example.com` as the same signup.
    pub fn parse(email: String) -> Result<Self, EmailParseError> {
        if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", &email) {
            Ok(Self(email.to_lowercase()))
        } else {
            Err(EmailParseError(email))
        }
    }
}

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WaitlistEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
