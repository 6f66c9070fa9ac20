pub mod publish;
pub mod run;
pub mod steps;

pub use publish::{
    fetch_due_tools, post_on_socials, revalidate_listings, send_published_email,
    update_tool_status, StepError, LISTING_CACHE_TAGS,
};
pub use run::{publish_run, run_publish_tools, PublishReport, StepFailure};
pub use steps::{DirectSteps, DueTools, EmailOutcome, PublishedTool, SocialPostOutcome, StepRunner};
