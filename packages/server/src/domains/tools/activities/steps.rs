//! How a publish run executes its named steps.
//!
//! The per-tool sequence in [`super::run`] is written once against
//! [`StepRunner`]. The Restate workflow journals every step through `ctx.run`;
//! the in-process runner just awaits them.

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::publish::StepError;
use crate::domains::tools::models::Tool;
use crate::impl_restate_serde;
use crate::kernel::SocialPlatform;

pub trait StepRunner: Sync {
    /// Run `step` once under `name`.
    ///
    /// A durable runner only hands back terminal failures; retriable ones are
    /// retried by the engine before this returns.
    fn run_step<'a, T, F, Fut>(
        &'a self,
        name: String,
        step: F,
    ) -> impl Future<Output = Result<T, StepError>> + Send + 'a
    where
        T: restate_sdk::serde::Serialize + restate_sdk::serde::Deserialize + Send + 'static,
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<T, StepError>> + Send + 'a;
}

/// Awaits each step directly, without a journal
pub struct DirectSteps;

impl StepRunner for DirectSteps {
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
            tracing::debug!(step = %name, "Running publish step");
            step().await
        }
    }
}

// Step outputs. These are what the workflow journal records.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueTools {
    pub tools: Vec<Tool>,
}

impl_restate_serde!(DueTools);

/// `tool` is `None` when the tool had already left `scheduled`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedTool {
    pub tool: Option<Tool>,
}

impl_restate_serde!(PublishedTool);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialPostOutcome {
    pub platforms: Vec<SocialPlatform>,
}

impl_restate_serde!(SocialPostOutcome);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailOutcome {
    pub message_id: Option<String>,
}

impl_restate_serde!(EmailOutcome);
