//! Free-text component requests
//!
//! "Create a Button component with a label and an optional icon" becomes a
//! name, a kind and a prop list.

use crate::heuristics::extract_props_from_description;
use crate::types::{PropInfo, pascal_case};

use super::types::ComponentKind;

const VERBS: &[&str] = &["create", "build", "generate", "make", "add", "write", "scaffold"];
const ARTICLES: &[&str] = &["a", "an", "the", "new", "some", "me"];
const STOP_WORDS: &[&str] = &[
    "with", "that", "which", "for", "to", "and", "or", "accepting", "accepts", "supporting",
    "supports", "having", "has", "takes", "using", "in", "on",
];
const GENERIC_NOUNS: &[&str] = &["component", "components", "widget", "element"];
const FALLBACK_NAME: &str = "NewComponent";

/// Keyword table in priority order; a modal containing a form is a modal
const KIND_KEYWORDS: &[(ComponentKind, &[&str])] = &[
    (ComponentKind::Modal, &["modal", "dialog", "popup", "overlay", "lightbox"]),
    (
        ComponentKind::Navigation,
        &["navigation", "nav", "navbar", "menu", "sidebar", "breadcrumb", "breadcrumbs", "tabs"],
    ),
    (ComponentKind::Table, &["table", "grid", "datagrid", "spreadsheet"]),
    (ComponentKind::Form, &["form", "login", "signup", "register", "checkout", "survey"]),
    (ComponentKind::Button, &["button", "btn", "cta"]),
];

/// What a description asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionAnalysis {
    /// `None` when no name could be derived
    pub name: Option<String>,
    pub kind: ComponentKind,
    pub props: Vec<PropInfo>,
}

impl DescriptionAnalysis {
    /// Whether the text asked for anything beyond a name
    pub fn has_requirements(&self) -> bool {
        self.kind != ComponentKind::Generic || !self.props.is_empty()
    }

    pub fn name_or_default(&self) -> String {
        self.name.clone().unwrap_or_else(|| FALLBACK_NAME.to_string())
    }
}

pub fn parse_description(text: &str) -> DescriptionAnalysis {
    let words = words(text);
    DescriptionAnalysis {
        name: component_name(&words),
        kind: component_kind(&words),
        props: extract_props_from_description(text),
    }
}

/// Words with surrounding punctuation removed; sentence punctuation becomes a
/// standalone "." so phrases stop at it
fn words(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for raw in text.split_whitespace() {
        let ends_clause = raw.ends_with([',', '.', ';', ':', '!', '?']);
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '_');
        if !word.is_empty() {
            out.push(word.to_string());
        }
        if ends_clause {
            out.push(".".to_string());
        }
    }
    out
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_uppercase())
}

fn is_one_of(word: &str, table: &[&str]) -> bool {
    table.iter().any(|w| w.eq_ignore_ascii_case(word))
}

/// First capitalized phrase after a trigger verb, else the object phrase
fn component_name(words: &[String]) -> Option<String> {
    let verb = words.iter().position(|w| is_one_of(w, VERBS))?;
    let object: Vec<&str> = words[verb + 1..]
        .iter()
        .map(String::as_str)
        .skip_while(|w| is_one_of(w, ARTICLES))
        .take_while(|w| *w != "." && !is_one_of(w, STOP_WORDS))
        .collect();

    let capitalized: Vec<&str> = object
        .iter()
        .copied()
        .take_while(|w| is_capitalized(w) && !is_one_of(w, GENERIC_NOUNS))
        .collect();
    if !capitalized.is_empty() {
        return Some(identifier(&capitalized.join(" ")));
    }

    let mut phrase: Vec<&str> = object;
    while phrase.last().is_some_and(|w| is_one_of(w, GENERIC_NOUNS)) {
        phrase.pop();
    }
    if phrase.is_empty() {
        return None;
    }
    let name = pascal_case(&phrase.join(" "));
    (!name.is_empty() && name.starts_with(|c: char| c.is_alphabetic())).then_some(name)
}

/// Keeps already-PascalCase identifiers such as `HTMLViewer` intact
fn identifier(phrase: &str) -> String {
    if !phrase.contains(' ') && phrase.chars().all(|c| c.is_alphanumeric()) {
        phrase.to_string()
    } else {
        pascal_case(phrase)
    }
}

fn component_kind(words: &[String]) -> ComponentKind {
    let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    KIND_KEYWORDS
        .iter()
        .find(|(_, keywords)| lower.iter().any(|w| keywords.contains(&w.as_str())))
        .map(|(kind, _)| *kind)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalized_name_after_verb() {
        let parsed = parse_description(
            "Create a Button component with a label, an optional icon and a required onClick handler.",
        );
        assert_eq!(parsed.name.as_deref(), Some("Button"));
        assert_eq!(parsed.kind, ComponentKind::Button);
        let names: Vec<&str> = parsed.props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["label", "icon", "onClick"]);
        assert!(parsed.has_requirements());
    }

    #[test]
    fn test_multi_word_capitalized_name() {
        let parsed = parse_description("Build the User Profile Card that shows an avatar");
        assert_eq!(parsed.name.as_deref(), Some("UserProfileCard"));
        let parsed = parse_description("make a HTMLViewer");
        assert_eq!(parsed.name.as_deref(), Some("HTMLViewer"));
    }

    #[test]
    fn test_object_phrase_name() {
        let parsed = parse_description("build a login form with email and password");
        assert_eq!(parsed.name.as_deref(), Some("LoginForm"));
        assert_eq!(parsed.kind, ComponentKind::Form);

        let parsed = parse_description("generate a confirmation dialog component");
        assert_eq!(parsed.name.as_deref(), Some("ConfirmationDialog"));
        assert_eq!(parsed.kind, ComponentKind::Modal);
    }

    #[test]
    fn test_kind_priority() {
        assert_eq!(
            parse_description("a modal containing a signup form").kind,
            ComponentKind::Modal
        );
        assert_eq!(parse_description("a sidebar menu").kind, ComponentKind::Navigation);
        assert_eq!(parse_description("a data table").kind, ComponentKind::Table);
        assert_eq!(parse_description("a card").kind, ComponentKind::Generic);
    }

    #[test]
    fn test_empty_and_vague_input() {
        let empty = parse_description("");
        assert_eq!(empty.name, None);
        assert!(!empty.has_requirements());
        assert_eq!(empty.name_or_default(), "NewComponent");

        let vague = parse_description("something nice please");
        assert_eq!(vague.name, None);
        assert!(!vague.has_requirements());
    }
}
