use anyhow::{Context, Result};
use chrono_tz::Tz;
use dotenvy::dotenv;
use std::env;

/// Public identity of the catalog, used in templates and email subjects
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub name: String,
    pub url: String,
    pub email: String,
}

impl SiteConfig {
    /// Absolute URL of a tool page on the public site
    pub fn tool_url(&self, slug: &str) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), slug)
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub health_port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub site: SiteConfig,
    pub resend_api_key: String,
    pub revalidate_url: Option<String>,
    pub revalidate_secret: Option<String>,
    pub bluesky_identifier: Option<String>,
    pub bluesky_password: Option<String>,
    pub mastodon_url: Option<String>,
    pub mastodon_token: Option<String>,
    pub social_webhook_url: Option<String>,
    pub restate_ingress_url: Option<String>,
    pub restate_identity_key: Option<String>,
    pub publish_timezone: Tz,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let publish_timezone = env::var("PUBLISH_TIMEZONE")
            .unwrap_or_else(|_| "Europe/Warsaw".to_string())
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("PUBLISH_TIMEZONE is not a valid timezone: {}", e))?;

        let site_url =
            env::var("SITE_URL").unwrap_or_else(|_| "https://openalternative.co".to_string());
        url::Url::parse(&site_url).context("SITE_URL must be an absolute URL")?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "9080".to_string())
                .parse()
                .context("SERVER_PORT must be a valid number")?,
            health_port: env::var("HEALTH_PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()
                .context("HEALTH_PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "openalternative".to_string()),
            site: SiteConfig {
                name: env::var("SITE_NAME").unwrap_or_else(|_| "OpenAlternative".to_string()),
                url: site_url,
                email: env::var("SITE_EMAIL")
                    .unwrap_or_else(|_| "hello@openalternative.co".to_string()),
            },
            resend_api_key: env::var("RESEND_API_KEY").context("RESEND_API_KEY must be set")?,
            revalidate_url: env::var("REVALIDATE_URL").ok(),
            revalidate_secret: env::var("REVALIDATE_SECRET").ok(),
            bluesky_identifier: env::var("BLUESKY_IDENTIFIER").ok(),
            bluesky_password: env::var("BLUESKY_PASSWORD").ok(),
            mastodon_url: env::var("MASTODON_URL").ok(),
            mastodon_token: env::var("MASTODON_TOKEN").ok(),
            social_webhook_url: env::var("SOCIAL_WEBHOOK_URL").ok(),
            restate_ingress_url: env::var("RESTATE_INGRESS_URL").ok(),
            restate_identity_key: env::var("RESTATE_IDENTITY_KEY").ok(),
            publish_timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_url_joins_without_double_slash() {
        let site = SiteConfig {
            name: "OpenAlternative".to_string(),
            url: "https://openalternative.co/".to_string(),
            email: "hello@openalternative.co".to_string(),
        };

        assert_eq!(site.tool_url("acme"), "https://openalternative.co/acme");
    }
}
