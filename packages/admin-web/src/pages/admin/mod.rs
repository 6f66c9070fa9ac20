//! Admin pages

mod dashboard;
mod entities;
mod login;

pub use dashboard::*;
pub use entities::*;
pub use login::*;
