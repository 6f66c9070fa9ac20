use pulldown_cmark::{html, Parser};

use crate::config::SiteConfig;
use crate::domains::tools::models::Tool;
use crate::kernel::OutgoingEmail;

/// Subject line of the "your tool is live" email
pub fn tool_published_subject(tool: &Tool, site: &SiteConfig) -> String {
    format!("{} has been published on {} 🎉", tool.name, site.name)
}

/// Render the email sent to a tool's submitter once it is published
pub fn tool_published_email(
    tool: &Tool,
    to: &str,
    subject: &str,
    site: &SiteConfig,
) -> OutgoingEmail {
    let url = site.tool_url(&tool.slug);
    let greeting = tool
        .submitter_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("there");

    let text = format!(
        "Hi {greeting},\n\n\
         Great news! {name} is now live on {site}.\n\n\
         You can see the listing here: {url}\n\n\
         Thanks for contributing to the catalog. Share the listing with your community to let them know.\n\n\
         {site}",
        greeting = greeting,
        name = tool.name,
        site = site.name,
        url = url,
    );

    let markdown = format!(
        "Hi {greeting},\n\n\
         Great news! **{name}** is now live on {site}.\n\n\
         You can see the listing here: [{url}]({url})\n\n\
         Thanks for contributing to the catalog. Share the listing with your community to let them know.\n\n\
         {site}",
        greeting = escape_html(greeting),
        name = escape_html(&tool.name),
        site = escape_html(&site.name),
        url = url,
    );

    let mut body = String::new();
    html::push_html(&mut body, Parser::new(&markdown));

    OutgoingEmail::builder()
        .to(to)
        .subject(subject)
        .html(body)
        .text(text)
        .reply_to(site.email.clone())
        .build()
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::models::ToolStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn site() -> SiteConfig {
        SiteConfig {
            name: "OpenAlternative".to_string(),
            url: "https://openalternative.co".to_string(),
            email: "hello@openalternative.co".to_string(),
        }
    }

    fn tool(name: &str, submitter_name: Option<&str>) -> Tool {
        Tool {
            id: Uuid::new_v4(),
            slug: "acme".to_string(),
            name: name.to_string(),
            website_url: "https://acme.dev".to_string(),
            tagline: None,
            description: None,
            status: ToolStatus::Published,
            published_at: Some(Utc::now()),
            submitter_name: submitter_name.map(str::to_string),
            submitter_email: Some("a@b.com".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn subject_names_tool_and_site() {
        assert_eq!(
            tool_published_subject(&tool("Acme", None), &site()),
            "Acme has been published on OpenAlternative 🎉"
        );
    }

    #[test]
    fn email_links_to_tool_page() {
        let t = tool("Acme", Some("Jamie"));
        let subject = tool_published_subject(&t, &site());
        let email = tool_published_email(&t, "a@b.com", &subject, &site());

        assert_eq!(email.to, "a@b.com");
        assert_eq!(email.subject, subject);
        assert_eq!(email.reply_to.as_deref(), Some("hello@openalternative.co"));
        assert!(email.text.starts_with("Hi Jamie,"));
        assert!(email.html.contains("<strong>Acme</strong>"));
        assert!(email
            .html
            .contains(r#"<a href="https://openalternative.co/acme">"#));
    }

    #[test]
    fn html_body_escapes_tool_name() {
        let t = tool("<script>Acme</script>", None);
        let email = tool_published_email(&t, "a@b.com", "s", &site());

        assert!(!email.html.contains("<script>"));
        assert!(email.text.starts_with("Hi there,"));
    }
}
