//! Accessibility signal scoring over JSX markup

use crate::constants::accessibility::*;
use crate::types::AccessibilityReport;

use super::source::{line_of, strip_comments};

/// Intrinsic elements that are not interactive on their own
const NON_INTERACTIVE: &[&str] = &[
    "div", "span", "li", "p", "section", "article", "td", "tr", "img", "i", "svg",
];

const KEYBOARD_HANDLERS: &[&str] = &["onKeyDown", "onKeyUp", "onKeyPress"];

/// An opening JSX tag
#[derive(Debug)]
struct Tag<'a> {
    name: &'a str,
    attributes: Vec<&'a str>,
    offset: usize,
}

impl Tag<'_> {
    fn has(&self, attribute: &str) -> bool {
        self.attributes.contains(&attribute)
    }

    fn aria_count(&self) -> usize {
        self.attributes.iter().filter(|a| a.starts_with("aria-")).count()
    }

    fn has_accessibility_attribute(&self) -> bool {
        self.aria_count() > 0
            || self.has("role")
            || self.has("tabIndex")
            || KEYBOARD_HANDLERS.iter().any(|h| self.has(h))
    }
}

/// Score accessibility signals in 0..=100.
///
/// Starts from a neutral base, adds weighted positive signals (`aria-*`,
/// `role`, `tabIndex`, keyboard handlers, `alt`, `htmlFor`/`<label>`) and
/// subtracts penalties for clickable non-interactive elements without any
/// accessibility attribute and for images without `alt`. More positive
/// signals never lower the score; more negative signals never raise it.
pub fn analyze_accessibility(text: &str) -> AccessibilityReport {
    let code = strip_comments(text);
    let tags = scan_tags(&code);

    let mut score = BASE_SCORE;
    let mut issues = Vec::new();

    for tag in &tags {
        score += tag.aria_count() as i32 * ARIA_WEIGHT;
        if tag.has("role") {
            score += ROLE_WEIGHT;
        }
        if tag.has("tabIndex") {
            score += TAB_INDEX_WEIGHT;
        }
        score += KEYBOARD_HANDLERS.iter().filter(|h| tag.has(h)).count() as i32
            * KEYBOARD_HANDLER_WEIGHT;
        if tag.has("alt") {
            score += ALT_WEIGHT;
        }
        if tag.has("htmlFor") || tag.name == "label" {
            score += LABEL_WEIGHT;
        }

        let line = line_of(&code, tag.offset);
        if NON_INTERACTIVE.contains(&tag.name)
            && tag.has("onClick")
            && !tag.has_accessibility_attribute()
        {
            score -= CLICKABLE_WITHOUT_A11Y_PENALTY;
            issues.push(format!(
                "Line {}: clickable <{}> has no role, tabIndex or keyboard handler",
                line, tag.name
            ));
        }
        if tag.name == "img" && !tag.has("alt") {
            score -= IMAGE_WITHOUT_ALT_PENALTY;
            issues.push(format!("Line {}: <img> is missing alt text", line));
        }
    }

    AccessibilityReport {
        score: score.clamp(0, 100) as u8,
        issues,
    }
}

/// Find opening tags (`<name attr={...} ...>`), skipping closing tags and
/// anything that is not followed by an identifier.
fn scan_tags(code: &str) -> Vec<Tag<'_>> {
    let bytes = code.as_bytes();
    let mut tags = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' || !bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            i += 1;
            continue;
        }
        let offset = i;
        let name_start = i + 1;
        let mut j = name_start;
        while j < bytes.len()
            && (bytes[j].is_ascii_alphanumeric() || matches!(bytes[j], b'.' | b'-' | b'_'))
        {
            j += 1;
        }
        let name = &code[name_start..j];
        let (attributes, end) = scan_attributes(code, j);
        tags.push(Tag {
            name,
            attributes,
            offset,
        });
        i = end.max(j);
    }
    tags
}

/// Attribute names up to the closing `>` of the tag. Braced expressions and
/// quoted values are skipped as a unit.
fn scan_attributes(code: &str, start: usize) -> (Vec<&str>, usize) {
    let bytes = code.as_bytes();
    let mut attributes = Vec::new();
    let mut i = start;

    while i < bytes.len() {
        match bytes[i] {
            b'>' => return (attributes, i + 1),
            b'{' => i = skip_braces(bytes, i),
            b'"' | b'\'' => {
                let quote = bytes[i];
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                i += 1;
            }
            b if b.is_ascii_alphabetic() => {
                let attr_start = i;
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'-' | b'_' | b':'))
                {
                    i += 1;
                }
                attributes.push(&code[attr_start..i]);
            }
            _ => i += 1,
        }
    }
    (attributes, i)
}

fn skip_braces(bytes: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_snippet() {
        let report = analyze_accessibility("const a = 1;");
        assert_eq!(report.score as i32, BASE_SCORE);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_positive_signals_raise_score() {
        let plain = analyze_accessibility("<button onClick={go}>Go</button>");
        let labelled =
            analyze_accessibility("<button aria-label=\"Go\" onClick={go}>Go</button>");
        assert!(labelled.score > plain.score);
    }

    #[test]
    fn test_clickable_div_penalized() {
        let report = analyze_accessibility(
            "<div className=\"card\" onClick={() => open({ id: 1 })}>x</div>",
        );
        assert!(report.score < BASE_SCORE as u8);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("clickable <div>"));
        assert!(report.issues[0].starts_with("Line 1"));
    }

    #[test]
    fn test_clickable_div_with_role_is_fine() {
        let report = analyze_accessibility(
            "<div role=\"button\" tabIndex={0} onKeyDown={k} onClick={c}>x</div>",
        );
        assert!(report.issues.is_empty());
        assert!(report.score > BASE_SCORE as u8);
    }

    #[test]
    fn test_image_without_alt() {
        let missing = analyze_accessibility("<img src=\"a.png\" />");
        let present = analyze_accessibility("<img src=\"a.png\" alt=\"A\" />");
        assert!(missing.score < present.score);
        assert!(missing.issues[0].contains("alt"));
    }

    #[test]
    fn test_score_is_clamped() {
        let many: String = (0..50).map(|_| "<div onClick={f}></div>\n").collect();
        assert_eq!(analyze_accessibility(&many).score, 0);
        let rich: String = (0..50).map(|_| "<i aria-hidden=\"true\" />\n").collect();
        assert_eq!(analyze_accessibility(&rich).score, 100);
    }

    #[test]
    fn test_monotonic_in_signals() {
        let base = "<section>\n<div onClick={a}>x</div>\n</section>";
        let more_positive = "<section aria-live=\"polite\">\n<div onClick={a}>x</div>\n</section>";
        let more_negative = "<section>\n<div onClick={a}>x</div>\n<span onClick={b}>y</span>\n</section>";
        let s = analyze_accessibility(base).score;
        assert!(analyze_accessibility(more_positive).score >= s);
        assert!(analyze_accessibility(more_negative).score <= s);
    }

    #[test]
    fn test_comparison_is_not_a_tag() {
        let report = analyze_accessibility("if (a <b) { x(); }\nconst y = i<j;");
        assert_eq!(report.score as i32, BASE_SCORE);
    }
}
