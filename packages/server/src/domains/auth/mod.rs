//! Admin token issuing and verification

pub mod jwt;
pub mod restate;

pub use jwt::{Claims, JwtService};
