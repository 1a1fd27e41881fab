//! Lexical masking of JavaScript/TypeScript source
//!
//! Masked characters are replaced by spaces so byte offsets and line numbers
//! of the remaining text are preserved.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str(u8),
    Template,
}

fn mask(text: &str, mask_strings: bool) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = State::Code;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        match state {
            State::Code => match (b, next) {
                (b'/', Some(b'/')) => {
                    state = State::LineComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                (b'/', Some(b'*')) => {
                    state = State::BlockComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                // `don't` in JSX text: a quote right after a word character
                // cannot open a literal
                (b'\'', _) if i > 0 && bytes[i - 1].is_ascii_alphanumeric() => out.push(b),
                (b'"' | b'\'', _) => {
                    state = State::Str(b);
                    out.push(b);
                }
                (b'`', _) => {
                    state = State::Template;
                    out.push(b);
                }
                _ => out.push(b),
            },
            State::LineComment => {
                if b == b'\n' {
                    state = State::Code;
                    out.push(b'\n');
                } else {
                    out.push(blank(b));
                }
            }
            State::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    state = State::Code;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                out.push(blank(b));
            }
            State::Str(_) | State::Template if b == b'\\' => {
                out.push(if mask_strings { b' ' } else { b });
                if let Some(escaped) = next {
                    out.push(if mask_strings { blank(escaped) } else { escaped });
                    i += 2;
                    continue;
                }
            }
            State::Str(quote) => {
                // unterminated quotes end at the line break
                if b == quote || b == b'\n' {
                    state = State::Code;
                    out.push(b);
                } else {
                    out.push(if mask_strings { blank(b) } else { b });
                }
            }
            State::Template => {
                if b == b'`' {
                    state = State::Code;
                    out.push(b);
                } else {
                    out.push(if mask_strings { blank(b) } else { b });
                }
            }
        }
        i += 1;
    }

    // every byte of a masked multi-byte char becomes a space, so this stays valid
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn blank(b: u8) -> u8 {
    if b == b'\n' { b'\n' } else { b' ' }
}

/// Replace comments with whitespace; string literals are kept.
pub fn strip_comments(text: &str) -> String {
    mask(text, false)
}

/// Replace comments and string literal contents with whitespace.
/// Quote characters themselves are kept.
pub fn strip_comments_and_strings(text: &str) -> String {
    mask(text, true)
}

/// 1-based line number of a byte offset
pub fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()
        .iter()
        .take(offset)
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Non-blank lines
pub fn count_lines(text: &str) -> usize {
    text.lines().filter(|l| !l.trim().is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments_keeps_offsets() {
        let src = "a // if\nb /* else */ c";
        let out = strip_comments(src);
        assert_eq!(out.len(), src.len());
        assert!(!out.contains("if"));
        assert!(!out.contains("else"));
        assert!(out.contains('c'));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_strip_strings() {
        let out = strip_comments_and_strings(r#"x = "a && b"; y = 'if'; z = `for ${q}`"#);
        assert!(!out.contains("&&"));
        assert!(!out.contains("if"));
        assert!(!out.contains("for"));
        assert!(out.contains("x ="));
    }

    #[test]
    fn test_comment_markers_inside_strings() {
        let out = strip_comments(r#"const url = "http://x"; if (a) {}"#);
        assert!(out.contains("http://x"));
        assert!(out.contains("if (a)"));
    }

    #[test]
    fn test_escaped_quote() {
        let out = strip_comments_and_strings(r#"s = "a\"b"; if (x) {}"#);
        assert!(out.contains("if (x)"));
    }

    #[test]
    fn test_unterminated_quote_ends_at_newline() {
        let out = strip_comments_and_strings("<p>Don't</p>\nif (x) {}");
        assert!(out.contains("if (x)"));
    }

    #[test]
    fn test_apostrophe_in_jsx_text() {
        let out = strip_comments_and_strings("<p>Don't panic {ready && 'yes'}</p>");
        assert!(out.contains("{ready &&"));
        assert!(!out.contains("yes"));
    }

    #[test]
    fn test_multibyte_text() {
        let out = strip_comments("const s = 'héllo'; // ünïcode");
        assert!(out.contains("héllo"));
        assert!(!out.contains("ünïcode"));
    }

    #[test]
    fn test_line_of() {
        assert_eq!(line_of("a\nb\nc", 0), 1);
        assert_eq!(line_of("a\nb\nc", 4), 3);
    }
}
