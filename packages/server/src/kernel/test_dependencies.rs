// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests,
// plus an in-memory ToolStore for driving publish runs without PostgreSQL.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::{
    BaseCacheInvalidator, BaseEmailService, BaseSocialPublisher, OutgoingEmail, ServerDeps,
    SocialPlatform,
};
use crate::config::SiteConfig;
use crate::domains::auth::JwtService;
use crate::domains::tools::activities::{StepError, StepRunner};
use crate::domains::tools::models::{Tool, ToolStatus};
use crate::domains::tools::store::ToolStore;

// =============================================================================
// Mock Cache Invalidator
// =============================================================================

#[derive(Clone, Default)]
pub struct MockCacheInvalidator {
    tags: Arc<Mutex<Vec<String>>>,
}

impl MockCacheInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every tag revalidated so far, in call order
    pub fn tags(&self) -> Vec<String> {
        self.tags.lock().unwrap().clone()
    }

    pub fn was_revalidated(&self, tag: &str) -> bool {
        self.tags.lock().unwrap().iter().any(|t| t == tag)
    }
}

#[async_trait]
impl BaseCacheInvalidator for MockCacheInvalidator {
    async fn revalidate_tags(&self, tags: &[String]) -> Result<()> {
        self.tags.lock().unwrap().extend(tags.iter().cloned());
        Ok(())
    }
}

// =============================================================================
// Mock Social Publisher
// =============================================================================

#[derive(Clone)]
pub struct MockSocialPublisher {
    platform: SocialPlatform,
    failure: Option<String>,
    posts: Arc<Mutex<Vec<String>>>,
    attempts: Arc<Mutex<usize>>,
}

impl MockSocialPublisher {
    pub fn new(platform: SocialPlatform) -> Self {
        Self {
            platform,
            failure: None,
            posts: Arc::new(Mutex::new(Vec::new())),
            attempts: Arc::new(Mutex::new(0)),
        }
    }

    /// Reject every post with the given error
    pub fn failing(mut self, error: impl Into<String>) -> Self {
        self.failure = Some(error.into());
        self
    }

    /// Texts accepted so far
    pub fn posts(&self) -> Vec<String> {
        self.posts.lock().unwrap().clone()
    }

    /// Number of publish calls, successful or not
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl BaseSocialPublisher for MockSocialPublisher {
    fn platform(&self) -> SocialPlatform {
        self.platform
    }

    async fn publish(&self, text: &str) -> Result<String> {
        *self.attempts.lock().unwrap() += 1;

        if let Some(error) = &self.failure {
            anyhow::bail!("{}", error);
        }

        let mut posts = self.posts.lock().unwrap();
        posts.push(text.to_string());
        Ok(format!("mock-{}-{}", self.platform, posts.len()))
    }
}

// =============================================================================
// Mock Email Service
// =============================================================================

#[derive(Clone, Default)]
pub struct MockEmailService {
    failure: Option<String>,
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, error: impl Into<String>) -> Self {
        self.failure = Some(error.into());
        self
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn was_sent_to(&self, to: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|e| e.to == to)
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send(&self, email: &OutgoingEmail) -> Result<String> {
        if let Some(error) = &self.failure {
            anyhow::bail!("{}", error);
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(format!("mock-email-{}", sent.len()))
    }
}

// =============================================================================
// In-memory Tool Store
// =============================================================================

#[derive(Clone, Default)]
pub struct InMemoryToolStore {
    tools: Arc<Mutex<Vec<Tool>>>,
    failing_updates: Arc<Mutex<Vec<Uuid>>>,
    fail_fetch: bool,
    disconnected: Arc<AtomicBool>,
    frozen_due: Arc<Mutex<Option<Vec<Tool>>>>,
}

impl InMemoryToolStore {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self {
            tools: Arc::new(Mutex::new(tools)),
            ..Default::default()
        }
    }

    /// Make `mark_published` fail for one tool
    pub fn failing_updates_for(self, id: Uuid) -> Self {
        self.failing_updates.lock().unwrap().push(id);
        self
    }

    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Keep answering `find_due` with the tools due at `now`, even after they
    /// are published. Models a run that read its due list before an
    /// overlapping run finished.
    pub fn freeze_due_list(self, now: DateTime<Utc>) -> Self {
        let due = self.due_at(now);
        *self.frozen_due.lock().unwrap() = Some(due);
        self
    }

    fn due_at(&self, now: DateTime<Utc>) -> Vec<Tool> {
        let mut due: Vec<Tool> = self
            .tools
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_due(now))
            .cloned()
            .collect();
        due.sort_by_key(|t| t.published_at);
        due
    }

    pub fn tool(&self, slug: &str) -> Option<Tool> {
        self.tools
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.slug == slug)
            .cloned()
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolStore for InMemoryToolStore {
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Tool>> {
        if self.fail_fetch {
            anyhow::bail!("connection refused");
        }

        if let Some(frozen) = self.frozen_due.lock().unwrap().clone() {
            return Ok(frozen);
        }
        Ok(self.due_at(now))
    }

    async fn mark_published(&self, id: Uuid) -> Result<Option<Tool>> {
        if self.failing_updates.lock().unwrap().contains(&id) {
            anyhow::bail!("deadlock detected");
        }

        let mut tools = self.tools.lock().unwrap();
        let Some(tool) = tools
            .iter_mut()
            .find(|t| t.id == id && t.status == ToolStatus::Scheduled)
        else {
            return Ok(None);
        };

        tool.status = ToolStatus::Published;
        tool.updated_at = Utc::now();
        Ok(Some(tool.clone()))
    }

    async fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }
}

/// A tool with a capitalised name and a submitter email
pub fn tool_fixture(slug: &str, status: ToolStatus, published_at: DateTime<Utc>) -> Tool {
    let mut name = slug.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    Tool {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name,
        website_url: format!("https://{}.dev", slug),
        tagline: Some(format!("Open source {}", slug)),
        description: None,
        status,
        published_at: Some(published_at),
        submitter_name: None,
        submitter_email: Some(format!("maker@{}.dev", slug)),
        created_at: published_at,
        updated_at: published_at,
    }
}

// =============================================================================
// Recording step runner
// =============================================================================

/// Runs steps directly and remembers their names in order
#[derive(Clone, Default)]
pub struct RecordingSteps {
    names: Arc<Mutex<Vec<String>>>,
}

impl RecordingSteps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

impl StepRunner for RecordingSteps {
    fn run_step<'a, T, F, Fut>(
        &'a self,
        name: String,
        step: F,
    ) -> impl Future<Output = Result<T, StepError>> + Send + 'a
    where
        T: restate_sdk::serde::Serialize + restate_sdk::serde::Deserialize + Send + 'static,
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<T, StepError>> + Send + 'a,
    {
        async move {
            self.names.lock().unwrap().push(name);
            step().await
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Test dependencies container with mock services
pub struct TestDependencies {
    pub cache: MockCacheInvalidator,
    pub social: Vec<MockSocialPublisher>,
    pub email: MockEmailService,
    pub site: SiteConfig,
    pub jwt_service: Arc<JwtService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            cache: MockCacheInvalidator::new(),
            social: vec![MockSocialPublisher::new(SocialPlatform::Bluesky)],
            email: MockEmailService::new(),
            site: SiteConfig {
                name: "OpenAlternative".to_string(),
                url: "https://openalternative.co".to_string(),
                email: "hello@openalternative.co".to_string(),
            },
            jwt_service: Arc::new(JwtService::new("test_secret", "openalternative".to_string())),
        }
    }

    /// Replace the social publishers with a single one
    pub fn with_social_publisher(mut self, publisher: MockSocialPublisher) -> Self {
        self.social = vec![publisher];
        self
    }

    pub fn with_social_publishers(mut self, publishers: Vec<MockSocialPublisher>) -> Self {
        self.social = publishers;
        self
    }

    pub fn with_failing_email(mut self, error: impl Into<String>) -> Self {
        self.email = self.email.failing(error);
        self
    }

    /// Total accepted posts across every mock publisher
    pub fn social_post_count(&self) -> usize {
        self.social.iter().map(|p| p.posts().len()).sum()
    }

    /// ServerDeps backed by the mocks. The pool connects lazily and is never
    /// used by code running against an in-memory store.
    pub fn server_deps(&self) -> ServerDeps {
        let social_publishers: Vec<Arc<dyn BaseSocialPublisher>> = self
            .social
            .iter()
            .map(|p| Arc::new(p.clone()) as Arc<dyn BaseSocialPublisher>)
            .collect();

        ServerDeps::new(
            PgPoolOptions::new().connect_lazy_with(PgConnectOptions::new()),
            "postgres://localhost/openalternative_test".to_string(),
            self.jwt_service.clone(),
            Arc::new(self.cache.clone()),
            social_publishers,
            Arc::new(self.email.clone()),
            self.site.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
