//! Test fixtures for building catalog data.

use chrono::{DateTime, Duration, Utc};
use server_core::domains::tools::models::{Tool, ToolStatus};
use server_core::kernel::test_dependencies::tool_fixture;

/// Scheduled tool whose publication time passed `ago` before `now`
pub fn due_tool(slug: &str, now: DateTime<Utc>, ago: Duration) -> Tool {
    tool_fixture(slug, ToolStatus::Scheduled, now - ago)
}

/// Scheduled tool that goes live `ahead` after `now`
pub fn upcoming_tool(slug: &str, now: DateTime<Utc>, ahead: Duration) -> Tool {
    tool_fixture(slug, ToolStatus::Scheduled, now + ahead)
}

pub fn draft_tool(slug: &str, now: DateTime<Utc>) -> Tool {
    tool_fixture(slug, ToolStatus::Draft, now - Duration::days(3))
}

pub fn without_submitter(mut tool: Tool) -> Tool {
    tool.submitter_email = None;
    tool
}
