use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domains::tools::templates::PostLaunchTemplate;
use crate::kernel::{BaseSocialPublisher, SocialPlatform};

/// Post a launch announcement on every configured network.
///
/// Every publisher is attempted once. Returns the platforms that accepted the
/// post, or an error naming each platform that rejected it.
pub async fn send_social_post(
    template: &PostLaunchTemplate,
    publishers: &[Arc<dyn BaseSocialPublisher>],
) -> Result<Vec<SocialPlatform>> {
    if publishers.is_empty() {
        warn!(tool = %template.tool_name, "No social publishers configured, skipping post");
        return Ok(Vec::new());
    }

    let mut posted = Vec::new();
    let mut failures = Vec::new();

    for publisher in publishers {
        let platform = publisher.platform();
        let text = match template.render(platform) {
            Ok(text) => text,
            Err(e) => {
                warn!(%platform, error = %e, tool = %template.tool_name, "Launch post not sent");
                failures.push(format!("{}: {}", platform, e));
                continue;
            }
        };

        match publisher.publish(&text).await {
            Ok(reference) => {
                info!(%platform, %reference, tool = %template.tool_name, "Launch post published");
                posted.push(platform);
            }
            Err(e) => {
                warn!(%platform, error = %e, tool = %template.tool_name, "Launch post failed");
                failures.push(format!("{}: {}", platform, e));
            }
        }
    }

    if !failures.is_empty() {
        anyhow::bail!(
            "Social post failed on {} (posted to {:?})",
            failures.join("; "),
            posted
        );
    }

    Ok(posted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockSocialPublisher;

    fn template() -> PostLaunchTemplate {
        PostLaunchTemplate {
            tool_name: "Acme".to_string(),
            tagline: None,
            site_name: "OpenAlternative".to_string(),
            url: "https://openalternative.co/acme".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_platform_specific_text_to_each_publisher() {
        let bluesky = MockSocialPublisher::new(SocialPlatform::Bluesky);
        let mastodon = MockSocialPublisher::new(SocialPlatform::Mastodon);
        let publishers: Vec<Arc<dyn BaseSocialPublisher>> =
            vec![Arc::new(bluesky.clone()), Arc::new(mastodon.clone())];

        let posted = send_social_post(&template(), &publishers).await.unwrap();

        assert_eq!(posted, vec![SocialPlatform::Bluesky, SocialPlatform::Mastodon]);
        assert_eq!(bluesky.posts(), vec![template().render(SocialPlatform::Bluesky).unwrap()]);
        assert!(mastodon.posts()[0].contains("#OpenSource"));
    }

    #[tokio::test]
    async fn failure_on_one_network_is_reported_after_trying_all() {
        let failing = MockSocialPublisher::new(SocialPlatform::X).failing("rate limited");
        let mastodon = MockSocialPublisher::new(SocialPlatform::Mastodon);
        let publishers: Vec<Arc<dyn BaseSocialPublisher>> =
            vec![Arc::new(failing), Arc::new(mastodon.clone())];

        let err = send_social_post(&template(), &publishers).await.unwrap_err();

        assert!(err.to_string().contains("x: rate limited"));
        assert_eq!(mastodon.posts().len(), 1);
    }

    #[tokio::test]
    async fn no_publishers_is_not_an_error() {
        let posted = send_social_post(&template(), &[]).await.unwrap();
        assert!(posted.is_empty());
    }

    #[tokio::test]
    async fn oversized_link_fails_without_publishing() {
        let x = MockSocialPublisher::new(SocialPlatform::X);
        let publishers: Vec<Arc<dyn BaseSocialPublisher>> = vec![Arc::new(x.clone())];
        let template = PostLaunchTemplate {
            url: format!("https://openalternative.co/{}", "a".repeat(300)),
            ..template()
        };

        let err = send_social_post(&template, &publishers).await.unwrap_err();

        assert!(err.to_string().contains("x: "));
        assert_eq!(x.attempts(), 0);
    }
}
