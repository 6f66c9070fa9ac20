//! Reusable UI components

mod admin_layout;
mod admin_nav;
mod command_menu;
mod loading;
mod toast;

pub use admin_layout::*;
pub use admin_nav::*;
pub use command_menu::*;
pub use loading::*;
pub use toast::*;
