pub mod send_social_post;

pub use send_social_post::send_social_post;
