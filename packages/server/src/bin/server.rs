//! Back office server
//!
//! Runs the Restate endpoint (catalog search, socials, publish workflow), the
//! hourly publish scheduler and the health endpoint.

use std::sync::Arc;

use anyhow::{Context, Result};
use restate_sdk::prelude::*;
use server_core::domains::auth::restate::{AuthService, AuthServiceImpl};
use server_core::domains::auth::JwtService;
use server_core::domains::catalog::restate::{CatalogService, CatalogServiceImpl};
use server_core::domains::socials::restate::{SocialsService, SocialsServiceImpl};
use server_core::domains::tools::restate::{PublishToolsWorkflow, PublishToolsWorkflowImpl};
use server_core::kernel::scheduled_tasks::start_scheduler;
use server_core::kernel::{
    build_social_publishers, BaseCacheInvalidator, HttpCacheInvalidator, NoopCacheInvalidator,
    ResendClient, ServerDeps,
};
use server_core::server::{build_app, PublishMode};
use server_core::workflows_client::WorkflowClient;
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,restate_sdk=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting OpenAlternative back office server");

    let config = Config::from_env()?;

    // Database setup
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache: Arc<dyn BaseCacheInvalidator> = match &config.revalidate_url {
        Some(url) => Arc::new(HttpCacheInvalidator::new(
            url.clone(),
            config.revalidate_secret.clone(),
        )),
        None => {
            tracing::warn!("REVALIDATE_URL not set, cache revalidation disabled");
            Arc::new(NoopCacheInvalidator)
        }
    };

    let social_publishers = build_social_publishers(&config);
    tracing::info!(
        platforms = ?social_publishers.iter().map(|p| p.platform()).collect::<Vec<_>>(),
        "Social publishers configured"
    );

    let email = Arc::new(ResendClient::new(
        config.resend_api_key.clone(),
        format!("{} <{}>", config.site.name, config.site.email),
    ));

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));

    // Build ServerDeps and wrap in Arc for sharing across handlers
    let server_deps = Arc::new(ServerDeps::new(
        pool.clone(),
        config.database_url.clone(),
        jwt_service,
        cache,
        social_publishers,
        email,
        config.site.clone(),
    ));

    // Hourly publish run
    let workflows = config.restate_ingress_url.as_deref().map(WorkflowClient::new);
    let publish_mode = if workflows.is_some() {
        PublishMode::Restate
    } else {
        tracing::warn!("RESTATE_INGRESS_URL not set, publish runs execute in-process");
        PublishMode::InProcess
    };
    let _scheduler = start_scheduler(server_deps.clone(), workflows, config.publish_timezone)
        .await
        .context("Failed to start scheduler")?;

    // Health server
    let health_addr = format!("0.0.0.0:{}", config.health_port);
    let health_listener = tokio::net::TcpListener::bind(&health_addr)
        .await
        .context("Failed to bind health server")?;
    tracing::info!("Health server listening on {}", health_addr);
    let health_app = build_app(pool, publish_mode);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(health_listener, health_app).await {
            tracing::error!("Health server stopped: {}", e);
        }
    });

    // Build Restate endpoint with all domain services and workflows
    let mut builder = Endpoint::builder();

    // Configure Restate request identity verification
    if let Some(identity_key) = &config.restate_identity_key {
        tracing::info!("Restate identity key configured");
        builder = builder
            .identity_key(identity_key)
            .context("Invalid Restate identity key")?;
    }

    let endpoint = builder
        // Auth domain
        .bind(AuthServiceImpl::with_deps(server_deps.clone()).serve())
        // Catalog domain
        .bind(CatalogServiceImpl::with_deps(server_deps.clone()).serve())
        // Socials domain
        .bind(SocialsServiceImpl::with_deps(server_deps.clone()).serve())
        // Tools domain
        .bind(PublishToolsWorkflowImpl::with_deps(server_deps.clone()).serve())
        .build();

    let addr = format!("0.0.0.0:{}", config.server_port);
    tracing::info!("Restate endpoint listening on {}", addr);

    HttpServer::new(endpoint)
        .listen_and_serve(addr.parse()?)
        .await;

    Ok(())
}
