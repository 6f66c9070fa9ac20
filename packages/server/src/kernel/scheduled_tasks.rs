//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! ```text
//! Scheduler (minute 5 of every hour, publish timezone)
//!     │
//!     ├─► RESTATE_INGRESS_URL set → start PublishToolsWorkflow (keyed by run time)
//!     └─► otherwise               → run_publish_tools in-process
//! ```

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::tools::activities::run_publish_tools;
use crate::domains::tools::restate::workflows::PublishToolsRequest;
use crate::domains::tools::store::PgToolStore;
use crate::kernel::ServerDeps;
use crate::workflows_client::WorkflowClient;

/// Hourly, five minutes past the hour (sec min hour day month weekday)
pub const PUBLISH_TOOLS_CRON: &str = "0 5 * * * *";

/// Start all scheduled tasks
pub async fn start_scheduler(
    deps: Arc<ServerDeps>,
    workflows: Option<WorkflowClient>,
    timezone: Tz,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let publish_job = Job::new_async_tz(PUBLISH_TOOLS_CRON, timezone, move |_uuid, _lock| {
        let deps = deps.clone();
        let workflows = workflows.clone();
        Box::pin(async move {
            if let Err(e) = trigger_publish_tools(&deps, workflows.as_ref(), Utc::now()).await {
                tracing::error!("Publish tools task failed: {}", e);
            }
        })
    })?;

    scheduler.add(publish_job).await?;
    scheduler.start().await?;

    tracing::info!(%timezone, "Scheduled tasks started (publish tools hourly at :05)");
    Ok(scheduler)
}

/// Workflow key of the run triggered at `now` (one run per trigger minute)
pub fn publish_run_key(now: DateTime<Utc>) -> String {
    format!("publish-{}", now.format("%Y%m%d%H%M"))
}

/// Run one publish pass, durably through Restate when available
pub async fn trigger_publish_tools(
    deps: &ServerDeps,
    workflows: Option<&WorkflowClient>,
    now: DateTime<Utc>,
) -> Result<()> {
    match workflows {
        Some(client) => {
            let key = publish_run_key(now);
            let invocation_id = client
                .start_workflow(
                    "PublishToolsWorkflow",
                    &key,
                    &PublishToolsRequest { as_of: Some(now) },
                )
                .await?;
            tracing::info!(%key, %invocation_id, "Publish tools workflow started");
        }
        None => {
            let store = PgToolStore::connect_lazy(&deps.database_url)?;
            let report = run_publish_tools(&store, deps, now).await?;
            tracing::info!(
                published = report.published.len(),
                failed = report.failures.len(),
                "Publish tools run completed in-process"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn run_key_is_stable_within_a_minute() {
        let a = Utc.with_ymd_and_hms(2026, 3, 1, 10, 5, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2026, 3, 1, 10, 5, 42).unwrap();

        assert_eq!(publish_run_key(a), "publish-202603011005");
        assert_eq!(publish_run_key(a), publish_run_key(b));
    }
}
