//! Template Processor
//!
//! Minimal substitution language shared by the generation and reporting
//! engines:
//!
//! - `{{path.to.value}}` - dotted lookup; unresolved tokens stay verbatim
//! - `{{#each path}}...{{/each}}` - repeat per element, element is the scope
//! - `{{#if path}}...{{else}}...{{/if}}` - truthiness conditional
//! - `{{this}}`, `{{@index}}` - current element and its index inside `#each`
//!
//! Rendering is a pure function of template and context. The only failures
//! are structural (unclosed or mismatched blocks) and are reported at parse time.
//!
//! ```
//! use serde_json::json;
//! use uiforge::template::render;
//!
//! let out = render("Hi {{user.name}}, {{missing}}", &json!({"user": {"name": "Ada"}})).unwrap();
//! assert_eq!(out, "Hi Ada, {{missing}}");
//! ```

pub mod lexer;
pub mod parser;
mod renderer;

pub use renderer::is_truthy;

use serde_json::Value;
use std::collections::HashMap;

use crate::types::{ForgeError, Result};
use parser::Node;

/// A parsed, reusable template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let tokens = lexer::tokenize(source);
        let nodes = parser::parse(&tokens)?;
        Ok(Self { nodes })
    }

    pub fn render(&self, context: &Value) -> String {
        renderer::render_nodes(&self.nodes, context)
    }
}

/// Parse and render in one step
pub fn render(template: &str, context: &Value) -> Result<String> {
    Ok(Template::parse(template)?.render(context))
}

/// Named templates compiled once and shared read-only
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, source: &str) -> Result<()> {
        let name = name.into();
        let template = Template::parse(source)
            .map_err(|e| ForgeError::Template(format!("Template '{}': {}", name, e)))?;
        self.templates.insert(name, template);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn render(&self, name: &str, context: &Value) -> Result<String> {
        self.templates
            .get(name)
            .map(|t| t.render(context))
            .ok_or_else(|| ForgeError::Template(format!("Template not found: {}", name)))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_resolvable_tokens_leave_no_braces() {
        let out = render(
            "{{title}} by {{author.name}} ({{author.age}})",
            &json!({"title": "Guide", "author": {"name": "Lin", "age": 41}}),
        )
        .unwrap();
        assert_eq!(out, "Guide by Lin (41)");
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_missing_key_is_verbatim() {
        let out = render("a {{ missingKey }} b", &json!({})).unwrap();
        assert_eq!(out, "a {{ missingKey }} b");
        let out = render("{{missingKey}}", &json!({"other": 1})).unwrap();
        assert_eq!(out, "{{missingKey}}");
    }

    #[test]
    fn test_each_binds_element_scope_with_fallback() {
        let ctx = json!({
            "sep": ";",
            "props": [{"name": "label", "type": "string"}, {"name": "size", "type": "number"}]
        });
        let out = render("{{#each props}}{{name}}: {{type}}{{sep}}{{/each}}", &ctx).unwrap();
        assert_eq!(out, "label: string;size: number;");
    }

    #[test]
    fn test_each_this_and_index() {
        let out = render(
            "{{#each items}}{{@index}}={{this}} {{/each}}",
            &json!({"items": ["a", "b"]}),
        )
        .unwrap();
        assert_eq!(out, "0=a 1=b ");
    }

    #[test]
    fn test_each_over_missing_or_scalar_renders_nothing() {
        assert_eq!(render("[{{#each nope}}x{{/each}}]", &json!({})).unwrap(), "[]");
        assert_eq!(
            render("[{{#each n}}x{{/each}}]", &json!({"n": 3})).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_if_else() {
        let tpl = Template::parse("{{#if on}}yes{{else}}no{{/if}}").unwrap();
        assert_eq!(tpl.render(&json!({"on": true})), "yes");
        assert_eq!(tpl.render(&json!({"on": false})), "no");
        assert_eq!(tpl.render(&json!({})), "no");
        assert_eq!(tpl.render(&json!({"on": []})), "no");
    }

    #[test]
    fn test_if_inside_each_uses_element() {
        let out = render(
            "{{#each props}}{{name}}{{#if optional}}?{{/if}} {{/each}}",
            &json!({"props": [{"name": "a", "optional": true}, {"name": "b", "optional": false}]}),
        )
        .unwrap();
        assert_eq!(out, "a? b ");
    }

    #[test]
    fn test_null_renders_empty() {
        assert_eq!(render("<{{v}}>", &json!({"v": null})).unwrap(), "<>");
    }

    #[test]
    fn test_jsx_braces_pass_through() {
        let src = "<div style={{ display: 'flex' }}>{{label}}</div>";
        assert_eq!(
            render(src, &json!({"label": "Hi"})).unwrap(),
            "<div style={{ display: 'flex' }}>Hi</div>"
        );
    }

    #[test]
    fn test_structural_error() {
        let err = render("{{#if a}}x", &json!({})).unwrap_err();
        assert!(matches!(err, ForgeError::Template(_)));
    }

    #[test]
    fn test_registry() {
        let mut registry = TemplateRegistry::new();
        registry.register("greet", "Hello {{name}}").unwrap();
        assert!(registry.contains("greet"));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.render("greet", &json!({"name": "Bo"})).unwrap(),
            "Hello Bo"
        );
        assert!(registry.render("missing", &json!({})).is_err());
        assert!(registry.register("bad", "{{/each}}").is_err());
    }

    proptest! {
        #[test]
        fn prop_resolved_tokens_remove_all_braces(
            keys in proptest::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,12}", 1..6)
        ) {
            let template: String = keys.keys().map(|k| format!("<{{{{{}}}}}>", k)).collect();
            let ctx = serde_json::to_value(&keys).unwrap();
            let out = render(&template, &ctx).unwrap();
            prop_assert!(!out.contains("{{"));
        }

        #[test]
        fn prop_missing_key_stays_verbatim(
            key in "[a-z]{1,8}",
            prefix in "[a-zA-Z ]{0,10}",
        ) {
            let template = format!("{}{{{{{}}}}}", prefix, key);
            let out = render(&template, &json!({"__other": 1})).unwrap();
            let expected = format!("{{{{{}}}}}", key);
            prop_assert!(out.contains(&expected));
        }
    }
}
