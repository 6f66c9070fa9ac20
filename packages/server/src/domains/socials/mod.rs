//! Socials domain - launch announcements on social networks

pub mod activities;
pub mod restate;

pub use activities::send_social_post;
