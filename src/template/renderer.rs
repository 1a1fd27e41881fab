use serde_json::Value;
use std::borrow::Cow;

use super::parser::Node;

/// Lookup scope; `#each` pushes one scope per element
struct Scope<'a> {
    value: &'a Value,
    index: Option<usize>,
    parent: Option<&'a Scope<'a>>,
}

pub fn render_nodes(nodes: &[Node], context: &Value) -> String {
    let scope = Scope {
        value: context,
        index: None,
        parent: None,
    };
    let mut out = String::new();
    render_into(nodes, &scope, &mut out);
    out
}

fn render_into(nodes: &[Node], scope: &Scope<'_>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable { path, raw } => match lookup(path, scope) {
                Some(value) => out.push_str(&display_value(&value)),
                None => out.push_str(raw),
            },
            Node::Each { path, body } => {
                let Some(value) = lookup(path, scope) else {
                    continue;
                };
                if let Value::Array(items) = value.as_ref() {
                    for (i, item) in items.iter().enumerate() {
                        let child = Scope {
                            value: item,
                            index: Some(i),
                            parent: Some(scope),
                        };
                        render_into(body, &child, out);
                    }
                }
            }
            Node::Conditional {
                path,
                then_branch,
                else_branch,
            } => {
                let truthy = lookup(path, scope).is_some_and(|v| is_truthy(&v));
                if truthy {
                    render_into(then_branch, scope, out);
                } else {
                    render_into(else_branch, scope, out);
                }
            }
        }
    }
}

/// Resolve a dotted path, innermost scope first
fn lookup<'a>(path: &str, scope: &'a Scope<'a>) -> Option<Cow<'a, Value>> {
    if path == "@index" {
        return scope.index.map(|i| Cow::Owned(Value::from(i)));
    }

    let mut segments = path.split('.');
    let first = segments.next()?;
    if first == "this" {
        let rest: Vec<&str> = segments.collect();
        return resolve(scope.value, &rest).map(Cow::Borrowed);
    }

    let rest: Vec<&str> = std::iter::once(first).chain(segments).collect();
    let mut current = Some(scope);
    while let Some(s) = current {
        if let Some(found) = resolve(s.value, &rest) {
            return Some(Cow::Borrowed(found));
        }
        current = s.parent;
    }
    None
}

fn resolve<'a>(value: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments.iter().try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(*segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Handlebars-style truthiness
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Array(_) | Value::Object(_) => item.to_string(),
                scalar => display_value(scalar),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!("no")));
        assert!(is_truthy(&json!(0.5)));
    }

    #[test]
    fn test_display_values() {
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&json!(["a", 1, true])), "a, 1, true");
        assert_eq!(display_value(&json!({"k": 1})), "{\"k\":1}");
    }
}
