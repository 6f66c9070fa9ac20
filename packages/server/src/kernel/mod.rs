//! Kernel module - server infrastructure and dependencies.

pub mod cache;
pub mod deps;
pub mod email;
pub mod scheduled_tasks;
pub mod socials;
pub mod test_dependencies;
pub mod traits;

pub use cache::{HttpCacheInvalidator, NoopCacheInvalidator};
pub use deps::ServerDeps;
pub use email::ResendClient;
pub use socials::{build_social_publishers, BlueskyClient, MastodonClient, WebhookPublisher};
pub use test_dependencies::TestDependencies;
pub use traits::*;
