//! Publish steps for a single tool.
//!
//! Each function is one journaled step of the publish workflow and is also
//! called directly by the in-process runner. Failures are tagged so the caller
//! knows whether the step may be retried.

use chrono::{DateTime, Utc};
use restate_sdk::errors::{HandlerError, TerminalError};
use thiserror::Error;
use tracing::info;

use crate::domains::socials::send_social_post;
use crate::domains::tools::models::Tool;
use crate::domains::tools::store::ToolStore;
use crate::domains::tools::templates::{
    post_launch_template, tool_published_email, tool_published_subject,
};
use crate::kernel::{ServerDeps, SocialPlatform};

/// Tags of the public listing pages that show published or upcoming tools
pub const LISTING_CACHE_TAGS: [&str; 2] = ["tools", "schedule"];

#[derive(Debug, Error)]
pub enum StepError {
    /// Transient failure; the step may run again
    #[error(transparent)]
    Retriable(#[from] anyhow::Error),

    /// Permanent failure; the step must not run again
    #[error("{0}")]
    Terminal(String),
}

impl StepError {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepError::Terminal(_))
    }

    /// Map onto Restate's error model (terminal errors stop retries)
    pub fn into_handler_error(self) -> HandlerError {
        match self {
            StepError::Retriable(e) => e.into(),
            StepError::Terminal(message) => TerminalError::new(message).into(),
        }
    }
}

pub async fn fetch_due_tools(
    store: &dyn ToolStore,
    now: DateTime<Utc>,
) -> Result<Vec<Tool>, StepError> {
    let tools = store.find_due(now).await?;
    info!(count = tools.len(), %now, "Fetched tools due for publishing");
    Ok(tools)
}

/// Mark the tool published and drop its page from the cache.
///
/// Returns `None`, and touches nothing, when the tool was not scheduled
/// anymore. Another run already published it and sent its announcements.
pub async fn update_tool_status(
    tool: &Tool,
    store: &dyn ToolStore,
    deps: &ServerDeps,
) -> Result<Option<Tool>, StepError> {
    let Some(published) = store.mark_published(tool.id).await? else {
        info!(slug = %tool.slug, "Tool no longer scheduled, skipping");
        return Ok(None);
    };
    deps.cache.revalidate_tag(&published.cache_tag()).await?;

    info!(slug = %published.slug, status = %published.status, "Tool status updated");
    Ok(Some(published))
}

pub async fn revalidate_listings(deps: &ServerDeps) -> Result<(), StepError> {
    let tags: Vec<String> = LISTING_CACHE_TAGS.iter().map(|t| t.to_string()).collect();
    deps.cache.revalidate_tags(&tags).await?;
    Ok(())
}

/// Announce the launch. Any failure is terminal: a partial post must not be
/// repeated by a retry.
pub async fn post_on_socials(
    tool: &Tool,
    deps: &ServerDeps,
) -> Result<Vec<SocialPlatform>, StepError> {
    let template = post_launch_template(tool, &deps.site);

    send_social_post(&template, &deps.social_publishers)
        .await
        .map_err(|e| StepError::Terminal(e.to_string()))
}

/// Email the submitter, if there is one. Returns the provider message id.
pub async fn send_published_email(
    tool: &Tool,
    deps: &ServerDeps,
) -> Result<Option<String>, StepError> {
    let Some(to) = tool.notification_email() else {
        info!(slug = %tool.slug, "No submitter email, skipping notification");
        return Ok(None);
    };

    let subject = tool_published_subject(tool, &deps.site);
    let email = tool_published_email(tool, to, &subject, &deps.site);
    let id = deps.email.send(&email).await?;

    info!(slug = %tool.slug, message_id = %id, "Published notification sent");
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::models::ToolStatus;
    use crate::kernel::test_dependencies::{
        tool_fixture, InMemoryToolStore, MockSocialPublisher, TestDependencies,
    };
    use chrono::Duration;

    #[tokio::test]
    async fn update_tool_status_publishes_and_revalidates_tool_tag() {
        let now = Utc::now();
        let tool = tool_fixture("acme", ToolStatus::Scheduled, now - Duration::days(1));
        let store = InMemoryToolStore::new(vec![tool.clone()]);
        let test = TestDependencies::new();
        let deps = test.server_deps();

        let published = update_tool_status(&tool, &store, &deps).await.unwrap().unwrap();

        assert_eq!(published.status, ToolStatus::Published);
        assert_eq!(test.cache.tags(), vec!["tool-acme".to_string()]);
    }

    #[tokio::test]
    async fn update_tool_status_skips_a_tool_that_is_already_published() {
        let now = Utc::now();
        let tool = tool_fixture("acme", ToolStatus::Scheduled, now - Duration::days(1));
        let store = InMemoryToolStore::new(vec![tool.clone()]);
        let test = TestDependencies::new();
        let deps = test.server_deps();

        update_tool_status(&tool, &store, &deps).await.unwrap();
        let second = update_tool_status(&tool, &store, &deps).await.unwrap();

        assert!(second.is_none());
        assert_eq!(test.cache.tags(), vec!["tool-acme".to_string()]);
    }

    #[tokio::test]
    async fn social_failure_is_terminal() {
        let tool = tool_fixture("acme", ToolStatus::Published, Utc::now());
        let test = TestDependencies::new()
            .with_social_publisher(MockSocialPublisher::new(SocialPlatform::Bluesky).failing("down"));

        let err = post_on_socials(&tool, &test.server_deps()).await.unwrap_err();

        assert!(err.is_terminal());
    }

    #[tokio::test]
    async fn email_failure_is_retriable() {
        let tool = tool_fixture("acme", ToolStatus::Published, Utc::now());
        let test = TestDependencies::new().with_failing_email("smtp down");

        let err = send_published_email(&tool, &test.server_deps()).await.unwrap_err();

        assert!(!err.is_terminal());
    }

    #[tokio::test]
    async fn blank_submitter_email_skips_notification() {
        let mut tool = tool_fixture("acme", ToolStatus::Published, Utc::now());
        tool.submitter_email = Some("  ".to_string());
        let test = TestDependencies::new();

        let sent = send_published_email(&tool, &test.server_deps()).await.unwrap();

        assert!(sent.is_none());
        assert!(test.email.sent().is_empty());
    }
}
