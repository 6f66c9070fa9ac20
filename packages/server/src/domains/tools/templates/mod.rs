//! Message templates for tool launches (social posts and submitter email)

pub mod launch_post;
pub mod tool_published;

pub use launch_post::{post_launch_template, PostLaunchTemplate};
pub use tool_published::{tool_published_email, tool_published_subject};

/// Cut `text` to at most `max` characters, ending with an ellipsis when shortened
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let kept: String = text.chars().take(max - 1).collect();
    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::truncate_chars;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn long_text_gets_ellipsis_within_budget() {
        let out = truncate_chars("hello wonderful world", 10);
        assert_eq!(out, "hello won…");
        assert!(out.chars().count() <= 10);
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let out = truncate_chars("zażółć gęślą jaźń", 7);
        assert_eq!(out.chars().count(), 7);
        assert!(out.ends_with('…'));
    }
}
