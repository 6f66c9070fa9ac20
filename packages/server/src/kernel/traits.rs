// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "announce a launch") lives in domain activities that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEmailService)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

// =============================================================================
// Cache Invalidation Trait (Infrastructure - tag based revalidation)
// =============================================================================

#[async_trait]
pub trait BaseCacheInvalidator: Send + Sync {
    /// Drop every cached entry associated with any of the given tags
    async fn revalidate_tags(&self, tags: &[String]) -> Result<()>;

    /// Convenience wrapper for a single tag
    async fn revalidate_tag(&self, tag: &str) -> Result<()> {
        self.revalidate_tags(&[tag.to_string()]).await
    }
}

// =============================================================================
// Social Publishing Trait (Infrastructure)
// =============================================================================

/// Social networks a launch can be announced on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    X,
    Bluesky,
    Mastodon,
}

impl SocialPlatform {
    /// Character budget of a single post
    pub fn max_chars(&self) -> usize {
        match self {
            SocialPlatform::X => 280,
            SocialPlatform::Bluesky => 300,
            SocialPlatform::Mastodon => 500,
        }
    }
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SocialPlatform::X => write!(f, "x"),
            SocialPlatform::Bluesky => write!(f, "bluesky"),
            SocialPlatform::Mastodon => write!(f, "mastodon"),
        }
    }
}

#[async_trait]
pub trait BaseSocialPublisher: Send + Sync {
    /// Platform this publisher posts to (selects the message template)
    fn platform(&self) -> SocialPlatform;

    /// Publish a post, returning the provider's identifier or URL for it
    async fn publish(&self, text: &str) -> Result<String>;
}

// =============================================================================
// Email Trait (Infrastructure)
// =============================================================================

/// A rendered email ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct OutgoingEmail {
    #[builder(setter(into))]
    pub to: String,
    #[builder(setter(into))]
    pub subject: String,
    #[builder(setter(into))]
    pub html: String,
    #[builder(setter(into))]
    pub text: String,
    #[builder(default, setter(strip_option, into))]
    pub reply_to: Option<String>,
}

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    /// Send an email, returning the provider message id
    async fn send(&self, email: &OutgoingEmail) -> Result<String>;
}
