use super::lexer::{Token, TokenKind};
use crate::types::{ForgeError, Result};

/// Template syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text
    Text(String),

    /// Value lookup; `raw` is emitted when the path does not resolve
    Variable { path: String, raw: String },

    /// `{{#each path}}body{{/each}}`
    Each { path: String, body: Vec<Node> },

    /// `{{#if path}}then{{else}}otherwise{{/if}}`
    Conditional {
        path: String,
        then_branch: Vec<Node>,
        else_branch: Vec<Node>,
    },
}

/// Token that ended a nested block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closing {
    Each,
    If,
    Else,
}

/// Build the node tree. Fails on unclosed blocks and stray closing tags.
pub fn parse(tokens: &[Token]) -> Result<Vec<Node>> {
    let mut pos = 0;
    let (nodes, _) = parse_block(tokens, &mut pos, None)?;
    Ok(nodes)
}

fn parse_block(
    tokens: &[Token],
    pos: &mut usize,
    opened_by: Option<&Token>,
) -> Result<(Vec<Node>, Option<(Closing, usize)>)> {
    let mut nodes = Vec::new();

    while let Some(token) = tokens.get(*pos) {
        *pos += 1;
        match &token.kind {
            TokenKind::Text(text) => nodes.push(Node::Text(text.clone())),
            TokenKind::Variable { path, raw } => nodes.push(Node::Variable {
                path: path.clone(),
                raw: raw.clone(),
            }),
            TokenKind::EachOpen(path) => {
                let (body, closing) = parse_block(tokens, pos, Some(token))?;
                expect_closing(token, closing, Closing::Each)?;
                nodes.push(Node::Each {
                    path: path.clone(),
                    body,
                });
            }
            TokenKind::IfOpen(path) => {
                let (then_branch, closing) = parse_block(tokens, pos, Some(token))?;
                let else_branch = match closing {
                    Some((Closing::Else, _)) => {
                        let (else_branch, closing) = parse_block(tokens, pos, Some(token))?;
                        expect_closing(token, closing, Closing::If)?;
                        else_branch
                    }
                    other => {
                        expect_closing(token, other, Closing::If)?;
                        Vec::new()
                    }
                };
                nodes.push(Node::Conditional {
                    path: path.clone(),
                    then_branch,
                    else_branch,
                });
            }
            TokenKind::EachClose | TokenKind::IfClose | TokenKind::Else => {
                let closing = match token.kind {
                    TokenKind::EachClose => Closing::Each,
                    TokenKind::IfClose => Closing::If,
                    _ => Closing::Else,
                };
                if opened_by.is_none() {
                    return Err(ForgeError::Template(format!("Unexpected {}", token)));
                }
                return Ok((nodes, Some((closing, token.offset))));
            }
        }
    }

    match opened_by {
        Some(open) => Err(ForgeError::Template(format!("Unclosed block {}", open))),
        None => Ok((nodes, None)),
    }
}

fn expect_closing(
    open: &Token,
    closing: Option<(Closing, usize)>,
    expected: Closing,
) -> Result<()> {
    match closing {
        Some((found, _)) if found == expected => Ok(()),
        Some((found, offset)) => Err(ForgeError::Template(format!(
            "Mismatched {} closing {} at offset {}",
            match found {
                Closing::Each => "{{/each}}",
                Closing::If => "{{/if}}",
                Closing::Else => "{{else}}",
            },
            open,
            offset
        ))),
        None => Err(ForgeError::Template(format!("Unclosed block {}", open))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::lexer::tokenize;

    fn parse_str(input: &str) -> Result<Vec<Node>> {
        parse(&tokenize(input))
    }

    #[test]
    fn test_parse_nested_blocks() {
        let nodes = parse_str("{{#each a}}{{#if b}}x{{else}}y{{/if}}{{/each}}").unwrap();
        assert_eq!(
            nodes,
            vec![Node::Each {
                path: "a".to_string(),
                body: vec![Node::Conditional {
                    path: "b".to_string(),
                    then_branch: vec![Node::Text("x".to_string())],
                    else_branch: vec![Node::Text("y".to_string())],
                }],
            }]
        );
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_str("{{#each items}}x").unwrap_err();
        assert!(err.to_string().contains("Unclosed block '{{#each items}}' at offset 0"));
    }

    #[test]
    fn test_stray_close() {
        let err = parse_str("x{{/if}}").unwrap_err();
        assert!(err.to_string().contains("Unexpected '{{/if}}' at offset 1"));
    }

    #[test]
    fn test_mismatched_close() {
        let err = parse_str("{{#if a}}x{{/each}}").unwrap_err();
        assert!(err.to_string().contains("Mismatched {{/each}}"));
    }

    #[test]
    fn test_else_inside_each_is_rejected() {
        assert!(parse_str("{{#each a}}x{{else}}y{{/each}}").is_err());
    }
}
