/// Release report parsing
///
/// The release report page of a version renders each issue's status as an
/// AUI lozenge:
///
/// ```html
/// <span class="aui-lozenge aui-lozenge-success">Done</span>
/// ```
///
/// [`status_labels`] pulls those labels out so they can be tallied the same
/// way as search results.

use regex::Regex;
use std::sync::OnceLock;

fn lozenge_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?is)<span\b[^>]*\bclass\s*=\s*["'](?:[^"']*\s)?aui-lozenge(?:\s[^"']*)?["'][^>]*>"#)
            .expect("lozenge pattern is valid")
    })
}

fn span_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)</?span\b[^>]*>").expect("span pattern is valid"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Finds the `</span>` closing the span whose content starts at `from`,
/// skipping over nested spans. Returns the byte range of the closing tag.
fn matching_close(html: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    for tag in span_tag_pattern().find_iter(&html[from..]) {
        if tag.as_str().starts_with("</") {
            if depth == 0 {
                return Some((from + tag.start(), from + tag.end()));
            }
            depth -= 1;
        } else {
            depth += 1;
        }
    }
    None
}

fn clean_label(inner: &str) -> String {
    let text = tag_pattern().replace_all(inner, "");
    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts every status label from a release report page, in page order
///
/// Nested markup inside a lozenge is stripped, entities are decoded, and
/// whitespace is collapsed. Empty or unclosed lozenges are skipped.
pub fn status_labels(html: &str) -> Vec<String> {
    let mut labels = Vec::new();
    let mut pos = 0;

    while let Some(open) = lozenge_pattern().find_at(html, pos) {
        let Some((close_start, close_end)) = matching_close(html, open.end()) else {
            break;
        };

        let label = clean_label(&html[open.end()..close_start]);
        if !label.is_empty() {
            labels.push(label);
        }
        pos = close_end;
    }

    labels
}
