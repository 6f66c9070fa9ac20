//! Client state that is independent of the UI framework

mod command_menu;

pub use command_menu::*;
