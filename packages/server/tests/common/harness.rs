//! Test harness for publish runs.
//!
//! Wires the in-memory tool store and mock services together so a whole run
//! can be driven without PostgreSQL or Restate.

use chrono::{DateTime, Utc};
use server_core::domains::tools::activities::{run_publish_tools, PublishReport};
use server_core::domains::tools::models::Tool;
use server_core::kernel::test_dependencies::InMemoryToolStore;
use server_core::kernel::TestDependencies;

pub struct PublishHarness {
    pub deps: TestDependencies,
    pub store: InMemoryToolStore,
    pub now: DateTime<Utc>,
}

impl PublishHarness {
    pub fn new(tools: Vec<Tool>, now: DateTime<Utc>) -> Self {
        init_tracing();
        Self {
            deps: TestDependencies::new(),
            store: InMemoryToolStore::new(tools),
            now,
        }
    }

    pub fn with_deps(mut self, deps: TestDependencies) -> Self {
        self.deps = deps;
        self
    }

    /// Every run sees the due list as it was at `now`, as an overlapping
    /// run would that fetched before the previous one finished
    pub fn with_stale_due_list(mut self) -> Self {
        self.store = self.store.freeze_due_list(self.now);
        self
    }

    pub async fn run(&self) -> PublishReport {
        run_publish_tools(&self.store, &self.deps.server_deps(), self.now)
            .await
            .expect("publish run failed")
    }

    pub fn tool(&self, slug: &str) -> Tool {
        self.store.tool(slug).expect("tool missing from store")
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("server_core=debug")
        .with_test_writer()
        .try_init();
}
