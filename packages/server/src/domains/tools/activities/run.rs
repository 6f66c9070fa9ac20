//! The publish run: fetch due tools, publish each one, release the database.
//!
//! [`publish_run`] is the single definition of the step sequence. The Restate
//! workflow drives it with a journaling [`StepRunner`]; [`run_publish_tools`]
//! drives it in-process when no Restate ingress is configured.

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::publish::{
    fetch_due_tools, post_on_socials, revalidate_listings, send_published_email,
    update_tool_status, StepError,
};
use super::steps::{
    DirectSteps, DueTools, EmailOutcome, PublishedTool, SocialPostOutcome, StepRunner,
};
use crate::domains::tools::models::Tool;
use crate::domains::tools::store::ToolStore;
use crate::kernel::ServerDeps;

type StepFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StepError>> + Send + 'a>>;

/// Boxes a step future as `dyn Future + Send`, so `Send` is proven where the
/// step is awaited (works around rust-lang/rust#100013)
fn boxed_step<'a, T>(
    step: impl Future<Output = Result<T, StepError>> + Send + 'a,
) -> StepFuture<'a, T> {
    Box::pin(step)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub slug: String,
    pub step: String,
    pub error: String,
    pub terminal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReport {
    /// Slugs this run moved to published
    pub published: Vec<String>,
    /// Due when fetched, but published by another run in the meantime
    pub already_published: Vec<String>,
    pub failures: Vec<StepFailure>,
    pub social_posts: usize,
    pub emails_sent: usize,
}

impl PublishReport {
    fn record_failure(&mut self, tool: &Tool, step: &str, error: StepError) {
        warn!(slug = %tool.slug, step, error = %error, terminal = error.is_terminal(), "Publish step failed");
        self.failures.push(StepFailure {
            slug: tool.slug.clone(),
            step: step.to_string(),
            error: error.to_string(),
            terminal: error.is_terminal(),
        });
    }

    /// Slugs with at least one failed step
    pub fn failed_slugs(&self) -> Vec<String> {
        let mut slugs: Vec<String> = Vec::new();
        for failure in &self.failures {
            if !slugs.contains(&failure.slug) {
                slugs.push(failure.slug.clone());
            }
        }
        slugs
    }
}

/// Publish every tool due at `now` in-process, then release the store.
pub async fn run_publish_tools(
    store: &dyn ToolStore,
    deps: &ServerDeps,
    now: DateTime<Utc>,
) -> Result<PublishReport> {
    let report = publish_run(&DirectSteps, store, deps, Some(now)).await?;
    Ok(report)
}

/// Publish every due tool through `steps`.
///
/// `as_of` defaults to the time the fetch step runs. A failing tool is
/// recorded and the run moves on to the next one. `disconnect-from-db` runs
/// whatever happens, including when the fetch fails.
pub async fn publish_run<S: StepRunner>(
    steps: &S,
    store: &dyn ToolStore,
    deps: &ServerDeps,
    as_of: Option<DateTime<Utc>>,
) -> Result<PublishReport, StepError> {
    let outcome = publish_due_tools(steps, store, deps, as_of).await;

    let disconnected = boxed_step(steps.run_step("disconnect-from-db".to_string(), || async {
        store.disconnect().await;
        Ok(())
    }))
    .await;
    if let Err(e) = disconnected {
        warn!(error = %e, "Failed to release publish run database pool");
    }

    outcome
}

async fn publish_due_tools<S: StepRunner>(
    steps: &S,
    store: &dyn ToolStore,
    deps: &ServerDeps,
    as_of: Option<DateTime<Utc>>,
) -> Result<PublishReport, StepError> {
    let due = boxed_step(steps.run_step("fetch-tools".to_string(), || async {
        let now = as_of.unwrap_or_else(Utc::now);
        fetch_due_tools(store, now)
            .await
            .map(|tools| DueTools { tools })
    }))
    .await?;

    let mut report = PublishReport::default();
    for tool in &due.tools {
        publish_tool(steps, tool, store, deps, &mut report).await;
    }

    info!(
        published = report.published.len(),
        already_published = report.already_published.len(),
        failed = report.failures.len(),
        social_posts = report.social_posts,
        emails_sent = report.emails_sent,
        "Publish run finished"
    );

    Ok(report)
}

async fn publish_tool<S: StepRunner>(
    steps: &S,
    tool: &Tool,
    store: &dyn ToolStore,
    deps: &ServerDeps,
    report: &mut PublishReport,
) {
    let updated = boxed_step(steps.run_step(format!("update-tool-status-{}", tool.slug), || async {
        update_tool_status(tool, store, deps)
            .await
            .map(|tool| PublishedTool { tool })
    }))
    .await;

    // Nothing else may happen for a tool this run did not publish
    let published = match updated {
        Ok(PublishedTool { tool: Some(published) }) => published,
        Ok(PublishedTool { tool: None }) => {
            report.already_published.push(tool.slug.clone());
            return;
        }
        Err(e) => return report.record_failure(tool, "update-tool-status", e),
    };
    report.published.push(published.slug.clone());

    let revalidated = boxed_step(steps.run_step("revalidate-cache".to_string(), || async {
        revalidate_listings(deps).await
    }))
    .await;
    if let Err(e) = revalidated {
        report.record_failure(&published, "revalidate-cache", e);
    }

    let social = boxed_step(steps.run_step(format!("post-on-socials-{}", published.slug), || async {
        post_on_socials(&published, deps)
            .await
            .map(|platforms| SocialPostOutcome { platforms })
    }))
    .await;
    match social {
        Ok(outcome) => report.social_posts += outcome.platforms.len(),
        Err(e) => report.record_failure(&published, "post-on-socials", e),
    }

    let email = boxed_step(steps.run_step(format!("send-email-{}", published.slug), || async {
        send_published_email(&published, deps)
            .await
            .map(|message_id| EmailOutcome { message_id })
    }))
    .await;
    match email {
        Ok(EmailOutcome { message_id: Some(_) }) => report.emails_sent += 1,
        Ok(EmailOutcome { message_id: None }) => {}
        Err(e) => report.record_failure(&published, "send-email", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::models::ToolStatus;
    use crate::kernel::test_dependencies::{
        tool_fixture, InMemoryToolStore, MockSocialPublisher, RecordingSteps, TestDependencies,
    };
    use crate::kernel::SocialPlatform;
    use chrono::Duration;

    #[tokio::test]
    async fn failing_status_update_skips_remaining_steps_for_that_tool_only() {
        let now = Utc::now();
        let broken = tool_fixture("broken", ToolStatus::Scheduled, now - Duration::hours(2));
        let acme = tool_fixture("acme", ToolStatus::Scheduled, now - Duration::hours(1));
        let store = InMemoryToolStore::new(vec![broken.clone(), acme]).failing_updates_for(broken.id);
        let test = TestDependencies::new();

        let report = run_publish_tools(&store, &test.server_deps(), now).await.unwrap();

        assert_eq!(report.published, vec!["acme".to_string()]);
        assert_eq!(report.failed_slugs(), vec!["broken".to_string()]);
        assert_eq!(test.email.sent().len(), 1);
        assert!(store.is_disconnected());
    }

    #[tokio::test]
    async fn social_failure_does_not_block_email() {
        let now = Utc::now();
        let acme = tool_fixture("acme", ToolStatus::Scheduled, now - Duration::hours(1));
        let store = InMemoryToolStore::new(vec![acme]);
        let test = TestDependencies::new().with_social_publisher(
            MockSocialPublisher::new(SocialPlatform::Mastodon).failing("instance offline"),
        );

        let report = run_publish_tools(&store, &test.server_deps(), now).await.unwrap();

        assert_eq!(report.published, vec!["acme".to_string()]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].step, "post-on-socials");
        assert!(report.failures[0].terminal);
        assert_eq!(report.emails_sent, 1);
    }

    #[tokio::test]
    async fn store_is_disconnected_when_fetch_fails() {
        let store = InMemoryToolStore::new(vec![]).failing_fetch();
        let test = TestDependencies::new();

        let result = run_publish_tools(&store, &test.server_deps(), Utc::now()).await;

        assert!(result.is_err());
        assert!(store.is_disconnected());
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn steps_run_in_order_for_a_due_tool() {
        let now = Utc::now();
        let acme = tool_fixture("acme", ToolStatus::Scheduled, now - Duration::hours(1));
        let store = InMemoryToolStore::new(vec![acme]);
        let test = TestDependencies::new();
        let steps = RecordingSteps::new();

        publish_run(&steps, &store, &test.server_deps(), Some(now)).await.unwrap();

        assert_eq!(
            steps.names(),
            names(&[
                "fetch-tools",
                "update-tool-status-acme",
                "revalidate-cache",
                "post-on-socials-acme",
                "send-email-acme",
                "disconnect-from-db",
            ])
        );
    }

    #[tokio::test]
    async fn terminal_social_failure_moves_on_and_disconnects_last() {
        let now = Utc::now();
        let acme = tool_fixture("acme", ToolStatus::Scheduled, now - Duration::hours(2));
        let umami = tool_fixture("umami", ToolStatus::Scheduled, now - Duration::hours(1));
        let store = InMemoryToolStore::new(vec![acme, umami]);
        let test = TestDependencies::new().with_social_publisher(
            MockSocialPublisher::new(SocialPlatform::X).failing("webhook returned 500"),
        );
        let steps = RecordingSteps::new();

        let report = publish_run(&steps, &store, &test.server_deps(), Some(now))
            .await
            .unwrap();

        let recorded = steps.names();
        assert!(recorded.contains(&"send-email-acme".to_string()));
        assert!(recorded.contains(&"update-tool-status-umami".to_string()));
        assert_eq!(recorded.last().map(String::as_str), Some("disconnect-from-db"));
        assert_eq!(report.failed_slugs(), names(&["acme", "umami"]));
        assert_eq!(report.emails_sent, 2);
    }

    #[tokio::test]
    async fn failed_fetch_still_disconnects() {
        let store = InMemoryToolStore::new(vec![]).failing_fetch();
        let test = TestDependencies::new();
        let steps = RecordingSteps::new();

        let result = publish_run(&steps, &store, &test.server_deps(), None).await;

        assert!(result.is_err());
        assert_eq!(steps.names(), names(&["fetch-tools", "disconnect-from-db"]));
    }

    #[tokio::test]
    async fn tool_published_elsewhere_is_not_announced_again() {
        let now = Utc::now();
        let acme = tool_fixture("acme", ToolStatus::Scheduled, now - Duration::hours(1));
        let store = InMemoryToolStore::new(vec![acme]).freeze_due_list(now);
        let test = TestDependencies::new();

        run_publish_tools(&store, &test.server_deps(), now).await.unwrap();

        let steps = RecordingSteps::new();
        let report = publish_run(&steps, &store, &test.server_deps(), Some(now))
            .await
            .unwrap();

        assert_eq!(
            steps.names(),
            names(&["fetch-tools", "update-tool-status-acme", "disconnect-from-db"])
        );
        assert!(report.published.is_empty());
        assert_eq!(report.already_published, names(&["acme"]));
        assert_eq!(test.email.sent().len(), 1);
        assert_eq!(test.social[0].attempts(), 1);
    }
}
