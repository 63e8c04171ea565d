use regex::Regex;
use std::sync::OnceLock;

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").expect("valid regex"))
}

/// Strip markdown-style `[text](url)` links from audit prose.
///
/// Returns the cleaned text and the first linked URL, which callers surface
/// as a reference link. Lighthouse descriptions end in a "Learn more" link
/// that reads poorly in a report cell.
pub fn strip_markdown_links(text: &str) -> (String, Option<String>) {
    let pattern = link_pattern();

    let reference = pattern
        .captures(text)
        .and_then(|c| c.get(2))
        .map(|m| m.as_str().to_string());

    let stripped = pattern.replace_all(text, "");

    // Removing a link mid-sentence leaves doubled spaces behind
    let mut cleaned = String::with_capacity(stripped.len());
    let mut last_was_space = false;
    for ch in stripped.chars() {
        if ch == ' ' {
            if !last_was_space {
                cleaned.push(ch);
            }
            last_was_space = true;
        } else {
            cleaned.push(ch);
            last_was_space = false;
        }
    }

    (cleaned.trim().to_string(), reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_trailing_learn_more_link() {
        let (cleaned, link) =
            strip_markdown_links("Reduce unused CSS. [Learn more](https://x.test)");
        assert_eq!(cleaned, "Reduce unused CSS.");
        assert_eq!(link.as_deref(), Some("https://x.test"));
        assert!(!cleaned.contains('['));
    }

    #[test]
    fn test_strips_link_mid_sentence() {
        let (cleaned, link) =
            strip_markdown_links("See [the guide](https://g.test) for details.");
        assert_eq!(cleaned, "See for details.");
        assert_eq!(link.as_deref(), Some("https://g.test"));
    }

    #[test]
    fn test_plain_text_unchanged() {
        let (cleaned, link) = strip_markdown_links("No links here.");
        assert_eq!(cleaned, "No links here.");
        assert!(link.is_none());
    }

    #[test]
    fn test_first_of_multiple_links_captured() {
        let (cleaned, link) =
            strip_markdown_links("[a](https://one.test) and [b](https://two.test)");
        assert_eq!(cleaned, "and");
        assert_eq!(link.as_deref(), Some("https://one.test"));
    }
}
