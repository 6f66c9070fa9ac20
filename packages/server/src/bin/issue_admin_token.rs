//! CLI for minting back-office admin tokens
//!
//! An operator pastes the printed token into the admin web sign-in page. The
//! admin web keeps it in that operator's session and forwards it on every call
//! to the Restate ingress.

use anyhow::{Context, Result};
use clap::Parser;
use server_core::domains::auth::JwtService;

#[derive(Parser)]
#[command(name = "issue_admin_token")]
#[command(about = "Issue a JWT for the admin back office")]
struct Cli {
    /// Operator email recorded in the token
    email: String,

    /// Token lifetime in days
    #[arg(long, default_value_t = 30)]
    days: i64,

    /// Issue a token without admin rights (for testing authorization)
    #[arg(long)]
    no_admin: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
    let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "openalternative".to_string());

    let service = JwtService::new(&secret, issuer).with_ttl(chrono::Duration::days(cli.days));
    let token = service.create_token(&cli.email, !cli.no_admin)?;

    println!("{}", token);
    Ok(())
}
