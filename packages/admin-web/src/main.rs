//! OpenAlternative admin - Dioxus fullstack back office
//!
//! Operators sign in with an admin token (see the server crate's
//! `issue_admin_token` binary). The token lives in their server-side session
//! and is forwarded to the Restate ingress on each call.
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! dx serve --features web,server
//! ```

#![allow(non_snake_case)]

mod api;
mod app;
mod auth;
mod components;
mod pages;
mod routes;
mod state;
mod types;
mod util;

#[cfg(feature = "server")]
#[tokio::main]
async fn main() -> std::io::Result<()> {
    use dioxus::prelude::*;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    // Initialize logging
    tracing_subscriber::fmt::init();

    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(std::env::var("INSECURE_SESSION_COOKIE").is_err());

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfigBuilder::default(), app::App)
        .layer(sessions);

    let address = dioxus::cli_config::fullstack_address_or_localhost();
    tracing::info!("Admin web listening on {}", address);

    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, router.into_make_service()).await
}

#[cfg(not(feature = "server"))]
fn main() {
    // Client bundle only; hydrates against the fullstack server
    dioxus::launch(app::App);
}
