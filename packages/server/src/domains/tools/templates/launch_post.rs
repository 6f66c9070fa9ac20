use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::truncate_chars;
use crate::config::SiteConfig;
use crate::domains::tools::models::Tool;
use crate::kernel::SocialPlatform;

/// Launch announcement for one tool, rendered per platform on demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLaunchTemplate {
    pub tool_name: String,
    pub tagline: Option<String>,
    pub site_name: String,
    pub url: String,
}

pub fn post_launch_template(tool: &Tool, site: &SiteConfig) -> PostLaunchTemplate {
    PostLaunchTemplate {
        tool_name: tool.name.clone(),
        tagline: tool
            .tagline
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        site_name: site.name.clone(),
        url: site.tool_url(&tool.slug),
    }
}

impl PostLaunchTemplate {
    /// Render the post for a platform within its character budget.
    ///
    /// The link is never cut. When space runs short the headline is trimmed
    /// first, then Mastodon's hashtags go, then everything but the link.
    /// Fails when the link alone does not fit.
    pub fn render(&self, platform: SocialPlatform) -> Result<String> {
        let max = platform.max_chars();
        if self.url.chars().count() > max {
            bail!(
                "Link to {} is longer than the {} characters {} allows",
                self.tool_name,
                max,
                platform
            );
        }

        let headline = format!("🚀 {} is now live on {}!", self.tool_name, self.site_name);
        let body = match &self.tagline {
            Some(tagline) => format!("{}\n\n{}", headline, tagline),
            None => headline,
        };

        let link = format!("\n\n{}", self.url);
        let footer = match platform {
            SocialPlatform::Mastodon => Some(format!("{}\n\n#OpenSource #SelfHosted", link))
                .filter(|tagged| tagged.chars().count() < max)
                .unwrap_or(link),
            SocialPlatform::X | SocialPlatform::Bluesky => link,
        };

        let budget = max.saturating_sub(footer.chars().count());
        if budget == 0 {
            return Ok(self.url.clone());
        }

        Ok(format!("{}{}", truncate_chars(&body, budget), footer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(tagline: Option<&str>) -> PostLaunchTemplate {
        PostLaunchTemplate {
            tool_name: "Acme".to_string(),
            tagline: tagline.map(str::to_string),
            site_name: "OpenAlternative".to_string(),
            url: "https://openalternative.co/acme".to_string(),
        }
    }

    #[test]
    fn renders_name_site_and_link() {
        let post = template(Some("Self-hosted analytics")).render(SocialPlatform::Bluesky).unwrap();

        assert!(post.starts_with("🚀 Acme is now live on OpenAlternative!"));
        assert!(post.contains("Self-hosted analytics"));
        assert!(post.ends_with("https://openalternative.co/acme"));
    }

    #[test]
    fn mastodon_gets_hashtags() {
        let post = template(None).render(SocialPlatform::Mastodon).unwrap();
        assert!(post.ends_with("#OpenSource #SelfHosted"));
    }

    #[test]
    fn long_tagline_is_trimmed_to_platform_budget() {
        let long = "x".repeat(1000);
        let t = template(Some(&long));

        for platform in [SocialPlatform::X, SocialPlatform::Bluesky, SocialPlatform::Mastodon] {
            let post = t.render(platform).unwrap();
            assert!(post.chars().count() <= platform.max_chars(), "{platform} too long");
            assert!(post.contains("https://openalternative.co/acme"));
        }
    }

    fn with_url(url: String) -> PostLaunchTemplate {
        PostLaunchTemplate {
            url,
            ..template(Some("Self-hosted analytics"))
        }
    }

    #[test]
    fn long_link_drops_hashtags_before_overflowing() {
        let url = format!("https://openalternative.co/{}", "a".repeat(460));
        let post = with_url(url.clone()).render(SocialPlatform::Mastodon).unwrap();

        assert!(post.chars().count() <= SocialPlatform::Mastodon.max_chars());
        assert!(post.ends_with(&url));
        assert!(!post.contains("#OpenSource"));
    }

    #[test]
    fn link_filling_the_budget_is_posted_alone() {
        let url = format!("https://openalternative.co/{}", "a".repeat(252));
        let post = with_url(url.clone()).render(SocialPlatform::X).unwrap();

        assert_eq!(post, url);
    }

    #[test]
    fn link_longer_than_the_platform_allows_is_rejected() {
        let url = format!("https://openalternative.co/{}", "a".repeat(300));

        let err = with_url(url).render(SocialPlatform::X).unwrap_err();
        assert!(err.to_string().contains("280"));
    }
}
