//! What the server keeps for a signed-in operator

use serde::{Deserialize, Serialize};

use crate::types::AdminUser;

/// Session key holding the signed-in operator
pub const SESSION_KEY: &str = "operator";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Paste an admin token to sign in")]
    EmptyToken,
}

/// Stored server-side only; the token never reaches the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorSession {
    pub email: String,
    pub token: String,
}

impl OperatorSession {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }

    pub fn user(&self) -> AdminUser {
        AdminUser {
            email: self.email.clone(),
        }
    }
}

/// Server functions that reach the ingress go through this
pub fn require_operator(
    session: Option<OperatorSession>,
) -> Result<OperatorSession, SessionError> {
    session.ok_or(SessionError::NotSignedIn)
}

/// Accepts a pasted token with or without the `Bearer ` prefix
pub fn normalize_token(input: &str) -> Result<String, SessionError> {
    let token = input.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
    if token.is_empty() {
        return Err(SessionError::EmptyToken);
    }
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_session_is_rejected() {
        assert_eq!(require_operator(None), Err(SessionError::NotSignedIn));
    }

    #[test]
    fn present_session_carries_its_own_token() {
        let session = OperatorSession::new("ops@openalternative.co", "jwt-a");
        let operator = require_operator(Some(session.clone())).unwrap();

        assert_eq!(operator.token, "jwt-a");
        assert_eq!(operator, session);
    }

    #[test]
    fn browser_view_has_no_token() {
        let user = OperatorSession::new("ops@openalternative.co", "jwt-a").user();
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("jwt-a"));
        assert_eq!(user.email, "ops@openalternative.co");
    }

    #[test]
    fn pasted_tokens_are_trimmed() {
        assert_eq!(normalize_token("  Bearer abc.def.ghi \n").unwrap(), "abc.def.ghi");
        assert_eq!(normalize_token("abc").unwrap(), "abc");
        assert_eq!(normalize_token("   "), Err(SessionError::EmptyToken));
        assert_eq!(normalize_token("Bearer "), Err(SessionError::EmptyToken));
    }
}
