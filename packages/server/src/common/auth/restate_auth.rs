//! Restate handler authentication helpers
//!
//! Extract and validate the admin JWT from Restate handler request headers.

use restate_sdk::prelude::*;

use super::AuthError;
use crate::domains::auth::JwtService;

/// Authenticated caller extracted from Restate handler headers
#[derive(Clone, Debug)]
pub struct AdminUser {
    pub email: String,
    pub is_admin: bool,
}

/// Extract and validate the JWT from Restate handler headers.
pub fn authenticate(headers: &HeaderMap, jwt_service: &JwtService) -> Result<AdminUser, AuthError> {
    // X-User-Token wins when a proxy in front of Restate consumes Authorization
    let auth_str = headers
        .get("x-user-token")
        .or_else(|| headers.get("authorization"))
        .ok_or(AuthError::MissingToken)?;

    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service
        .verify_token(token)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(AdminUser {
        email: claims.email,
        is_admin: claims.is_admin,
    })
}

/// Extract and validate the JWT, requiring admin access.
///
/// Any failure is terminal: retrying an unauthenticated call cannot succeed.
pub fn require_admin(
    headers: &HeaderMap,
    jwt_service: &JwtService,
) -> Result<AdminUser, HandlerError> {
    let user = authenticate(headers, jwt_service)
        .map_err(|e| TerminalError::new(e.to_string()))?;

    if !user.is_admin {
        return Err(TerminalError::new(AuthError::AdminRequired.to_string()).into());
    }

    Ok(user)
}
