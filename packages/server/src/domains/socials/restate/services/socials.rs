//! Socials service (stateless)
//!
//! Admin quick action: send a tool's launch post right now, outside the
//! publish schedule.

use restate_sdk::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::common::auth::restate_auth::require_admin;
use crate::common::SlugRequest;
use crate::domains::socials::activities::send_social_post;
use crate::domains::tools::models::Tool;
use crate::domains::tools::templates::post_launch_template;
use crate::impl_restate_serde;
use crate::kernel::{ServerDeps, SocialPlatform};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSocialPostsResult {
    pub slug: String,
    pub platforms: Vec<SocialPlatform>,
}

impl_restate_serde!(TestSocialPostsResult);

#[restate_sdk::service]
#[name = "Socials"]
pub trait SocialsService {
    async fn test_social_posts(req: SlugRequest) -> Result<TestSocialPostsResult, HandlerError>;
}

pub struct SocialsServiceImpl {
    deps: Arc<ServerDeps>,
}

impl SocialsServiceImpl {
    pub fn with_deps(deps: Arc<ServerDeps>) -> Self {
        Self { deps }
    }
}

impl SocialsService for SocialsServiceImpl {
    async fn test_social_posts(
        &self,
        ctx: Context<'_>,
        req: SlugRequest,
    ) -> Result<TestSocialPostsResult, HandlerError> {
        let user = require_admin(ctx.headers(), &self.deps.jwt_service)?;

        let tool = Tool::find_by_slug(&req.slug, &self.deps.db_pool)
            .await
            .map_err(|e| TerminalError::new(e.to_string()))?
            .ok_or_else(|| TerminalError::new(format!("Tool not found: {}", req.slug)))?;

        info!(slug = %tool.slug, admin = %user.email, "Sending test social post");

        let template = post_launch_template(&tool, &self.deps.site);
        let slug = tool.slug.clone();

        // Posting is not idempotent; a failed attempt must not be retried
        let result = ctx
            .run(|| async {
                let platforms = send_social_post(&template, &self.deps.social_publishers)
                    .await
                    .map_err(|e| TerminalError::new(e.to_string()))?;
                Ok(TestSocialPostsResult {
                    slug: slug.clone(),
                    platforms,
                })
            })
            .name("send-social-post")
            .await?;

        Ok(result)
    }
}
