//! Publish tools workflow
//!
//! Promotes every scheduled tool whose publication time has come. Started by
//! the hourly cron through the Restate ingress, keyed by the trigger time.
//!
//! The step sequence lives in [`publish_run`]; this workflow journals each
//! named step through `ctx.run` and keeps a readable status in workflow state.

use chrono::{DateTime, Utc};
use restate_sdk::prelude::*;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

use crate::common::EmptyRequest;
use crate::domains::tools::activities::{publish_run, StepError, StepRunner};
use crate::domains::tools::store::PgToolStore;
use crate::impl_restate_serde;
use crate::kernel::ServerDeps;

// =============================================================================
// Request / Response types
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishToolsRequest {
    /// Publication cutoff; defaults to the time of the fetch step
    pub as_of: Option<DateTime<Utc>>,
}

impl_restate_serde!(PublishToolsRequest);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishToolsResult {
    pub published: Vec<String>,
    pub failed: Vec<String>,
    #[serde(default)]
    pub already_published: Vec<String>,
    pub status: String,
}

impl_restate_serde!(PublishToolsResult);

// =============================================================================
// Journaled steps
// =============================================================================

/// Runs each step through `ctx.run`, so a replay returns the journaled
/// result instead of repeating the side effect.
struct RestateSteps<'c, 'ctx> {
    ctx: &'c WorkflowContext<'ctx>,
}

impl StepRunner for RestateSteps<'_, '_> {
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
        let ctx: &'a WorkflowContext<'a> = self.ctx;
        ctx.set("status", format!("Running {}", name));

        async move {
            ctx.run(move || async move {
                step().await.map_err(StepError::into_handler_error)
            })
            .name(name)
            .await
            .map_err(|e| StepError::Terminal(e.to_string()))
        }
    }
}

// =============================================================================
// Workflow definition
// =============================================================================

#[restate_sdk::workflow]
#[name = "PublishToolsWorkflow"]
pub trait PublishToolsWorkflow {
    async fn run(req: PublishToolsRequest) -> Result<PublishToolsResult, HandlerError>;

    #[shared]
    async fn get_status(req: EmptyRequest) -> Result<String, HandlerError>;
}

pub struct PublishToolsWorkflowImpl {
    deps: Arc<ServerDeps>,
}

impl PublishToolsWorkflowImpl {
    pub fn with_deps(deps: Arc<ServerDeps>) -> Self {
        Self { deps }
    }
}

impl PublishToolsWorkflow for PublishToolsWorkflowImpl {
    async fn run(
        &self,
        ctx: WorkflowContext<'_>,
        req: PublishToolsRequest,
    ) -> Result<PublishToolsResult, HandlerError> {
        info!(as_of = ?req.as_of, "Starting publish tools workflow");

        let store = PgToolStore::connect_lazy(&self.deps.database_url)
            .map_err(|e| TerminalError::new(e.to_string()))?;

        let steps = RestateSteps { ctx: &ctx };
        let report = publish_run(&steps, &store, &self.deps, req.as_of)
            .await
            .map_err(StepError::into_handler_error)?;

        let failed = report.failed_slugs();
        let status = format!(
            "Completed: {} published, {} with failures, {} already published",
            report.published.len(),
            failed.len(),
            report.already_published.len()
        );
        ctx.set("status", status.clone());

        info!(
            published = report.published.len(),
            failed = failed.len(),
            already_published = report.already_published.len(),
            "Publish tools workflow completed"
        );

        Ok(PublishToolsResult {
            published: report.published,
            failed,
            already_published: report.already_published,
            status,
        })
    }

    async fn get_status(
        &self,
        ctx: SharedWorkflowContext<'_>,
        _req: EmptyRequest,
    ) -> Result<String, HandlerError> {
        Ok(ctx
            .get::<String>("status")
            .await?
            .unwrap_or_else(|| "pending".to_string()))
    }
}
