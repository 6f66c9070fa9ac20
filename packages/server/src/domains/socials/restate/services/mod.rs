pub mod socials;

pub use socials::*;
