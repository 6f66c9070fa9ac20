//! Admin authentication for Restate handlers.
//!
//! Every back-office handler calls [`require_admin`] with the request headers
//! before touching the catalog.

mod errors;
pub mod restate_auth;

pub use errors::AuthError;
pub use restate_auth::{authenticate, require_admin, AdminUser};
