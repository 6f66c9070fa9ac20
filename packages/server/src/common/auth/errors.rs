use thiserror::Error;

/// Authentication errors for the back office
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing authentication header")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Admin access required")]
    AdminRequired,
}
