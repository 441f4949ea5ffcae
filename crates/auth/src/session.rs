use thiserror::Error;

use storefront_core::UserId;

/// Bearer token issued by the login endpoint.
///
/// Opaque to the client. `Debug` is redacted so sessions can be logged.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("access token must not be empty")]
pub struct EmptyToken;

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyToken> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(EmptyToken);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl core::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// An authenticated user session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: AccessToken,
    user_id: UserId,
}

impl Session {
    pub fn new(token: AccessToken, user_id: UserId) -> Self {
        Self { token, user_id }
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_is_redacted() {
        let token = AccessToken::new("secret-jwt").unwrap();
        assert_eq!(format!("{token:?}"), "AccessToken(<redacted>)");
        assert_eq!(token.bearer_header(), "Bearer secret-jwt");
    }

    #[test]
    fn blank_token_is_rejected() {
        assert_eq!(AccessToken::new(" "), Err(EmptyToken));
    }

    #[test]
    fn session_debug_does_not_leak_token() {
        let session = Session::new(
            AccessToken::new("secret-jwt").unwrap(),
            UserId::new("user-1").unwrap(),
        );
        assert!(!format!("{session:?}").contains("secret-jwt"));
    }
}
