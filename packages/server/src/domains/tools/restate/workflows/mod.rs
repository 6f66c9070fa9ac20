pub mod publish_tools;

pub use publish_tools::*;
