//! Operator sign-in and the per-browser session

mod context;
mod server_fns;
mod session;

pub use context::*;
pub use server_fns::*;
pub use session::*;
