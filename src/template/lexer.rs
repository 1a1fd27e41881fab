use std::fmt;

/// Token types of the `{{ }}` template syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal text, including `{{ }}` sequences that are not directives
    Text(String),

    /// `{{path.to.value}}`; `raw` keeps the exact source for verbatim output
    Variable { path: String, raw: String },

    /// `{{#each path}}`
    EachOpen(String),
    /// `{{/each}}`
    EachClose,

    /// `{{#if path}}`
    IfOpen(String),
    /// `{{else}}`
    Else,
    /// `{{/if}}`
    IfClose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token in the source
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match &self.kind {
            TokenKind::Text(_) => "text".to_string(),
            TokenKind::Variable { raw, .. } => raw.clone(),
            TokenKind::EachOpen(path) => format!("{{{{#each {}}}}}", path),
            TokenKind::EachClose => "{{/each}}".to_string(),
            TokenKind::IfOpen(path) => format!("{{{{#if {}}}}}", path),
            TokenKind::Else => "{{else}}".to_string(),
            TokenKind::IfClose => "{{/if}}".to_string(),
        };
        write!(f, "'{}' at offset {}", text, self.offset)
    }
}

/// Whether `s` is a lookup path: identifiers joined by dots, plus `this` and `@index`
fn is_path(s: &str) -> bool {
    if s == "@index" {
        return true;
    }
    !s.is_empty()
        && s.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => {
                    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '-')
                }
                _ => false,
            }
        })
}

fn classify(inner: &str, raw: &str) -> TokenKind {
    let inner = inner.trim();

    if let Some(path) = inner.strip_prefix("#each ") {
        let path = path.trim();
        if is_path(path) {
            return TokenKind::EachOpen(path.to_string());
        }
    } else if let Some(path) = inner.strip_prefix("#if ") {
        let path = path.trim();
        if is_path(path) {
            return TokenKind::IfOpen(path.to_string());
        }
    } else {
        match inner {
            "/each" => return TokenKind::EachClose,
            "/if" => return TokenKind::IfClose,
            "else" => return TokenKind::Else,
            _ if is_path(inner) => {
                return TokenKind::Variable {
                    path: inner.to_string(),
                    raw: raw.to_string(),
                };
            }
            _ => {}
        }
    }

    // Anything else (e.g. JSX `style={{ color: 'red' }}`) is plain text
    TokenKind::Text(raw.to_string())
}

fn push_text(tokens: &mut Vec<Token>, text: &str, offset: usize) {
    if text.is_empty() {
        return;
    }
    if let Some(Token {
        kind: TokenKind::Text(prev),
        ..
    }) = tokens.last_mut()
    {
        prev.push_str(text);
    } else {
        tokens.push(Token::new(TokenKind::Text(text.to_string()), offset));
    }
}

/// Split a template into tokens. Never fails: malformed directives become text.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let Some(open_rel) = input[pos..].find("{{") else {
            push_text(&mut tokens, &input[pos..], pos);
            break;
        };
        let open = pos + open_rel;
        push_text(&mut tokens, &input[pos..open], pos);

        let Some(close_rel) = input[open + 2..].find("}}") else {
            push_text(&mut tokens, &input[open..], open);
            break;
        };
        let close = open + 2 + close_rel;
        let raw = &input[open..close + 2];

        match classify(&input[open + 2..close], raw) {
            TokenKind::Text(text) => push_text(&mut tokens, &text, open),
            kind => tokens.push(Token::new(kind, open)),
        }
        pos = close + 2;
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_text_and_variables() {
        assert_eq!(
            kinds("Hello {{ user.name }}!"),
            vec![
                TokenKind::Text("Hello ".to_string()),
                TokenKind::Variable {
                    path: "user.name".to_string(),
                    raw: "{{ user.name }}".to_string()
                },
                TokenKind::Text("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_blocks() {
        assert_eq!(
            kinds("{{#each items}}{{this}}{{/each}}{{#if a}}x{{else}}y{{/if}}"),
            vec![
                TokenKind::EachOpen("items".to_string()),
                TokenKind::Variable {
                    path: "this".to_string(),
                    raw: "{{this}}".to_string()
                },
                TokenKind::EachClose,
                TokenKind::IfOpen("a".to_string()),
                TokenKind::Text("x".to_string()),
                TokenKind::Else,
                TokenKind::Text("y".to_string()),
                TokenKind::IfClose,
            ]
        );
    }

    #[test]
    fn test_jsx_object_literal_is_text() {
        assert_eq!(
            kinds("<div style={{ color: 'red' }} />"),
            vec![TokenKind::Text("<div style={{ color: 'red' }} />".to_string())]
        );
    }

    #[test]
    fn test_unterminated_open_is_text() {
        assert_eq!(
            kinds("a {{ b"),
            vec![TokenKind::Text("a {{ b".to_string())]
        );
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("ab{{x}}");
        assert_eq!(tokens[1].offset, 2);
        assert_eq!(tokens[1].to_string(), "'{{x}}' at offset 2");
    }
}
