//! Prop extraction from `XProps` declarations and natural-language descriptions

use std::collections::HashSet;

use super::patterns::regex_props_declaration;
use super::source::strip_comments;
use crate::types::{PropInfo, camel_case};

/// Props of the first `interface XProps {}` / `type XProps = {}` block, in
/// declaration order. A `?` after the member name marks it optional.
pub fn extract_props(text: &str) -> Vec<PropInfo> {
    let code = strip_comments(text);
    let Some(open) = regex_props_declaration().find(&code).map(|m| m.end() - 1) else {
        return Vec::new();
    };
    let Some(body) = braced_body(&code, open) else {
        return Vec::new();
    };

    split_members(body)
        .iter()
        .filter_map(|member| parse_member(member))
        .collect()
}

/// Text between the brace at `open` and its matching close
fn braced_body(code: &str, open: usize) -> Option<&str> {
    let mut depth = 0usize;
    for (i, c) in code[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&code[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split an object type body into members at nesting depth zero
fn split_members(body: &str) -> Vec<String> {
    let mut members = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut prev = '\0';
    let mut quote: Option<char> = None;
    let chars: Vec<char> = body.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if let Some(q) = quote {
            current.push(c);
            if c == q && prev != '\\' {
                quote = None;
            }
            prev = c;
            continue;
        }

        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '{' | '(' | '[' | '<' => depth += 1,
            '}' | ')' | ']' => depth -= 1,
            '>' if prev != '=' => depth -= 1,
            _ => {}
        }

        let at_top = depth <= 0;
        let separator = at_top && (c == ';' || c == ',');
        let line_break = at_top && c == '\n' && member_complete(&current, &chars[i + 1..]);

        if separator || line_break {
            if !current.trim().is_empty() {
                members.push(current.trim().to_string());
            }
            current.clear();
        } else {
            current.push(c);
        }
        prev = c;
    }
    if !current.trim().is_empty() {
        members.push(current.trim().to_string());
    }
    members
}

/// Whether a line break ends the member: not when the type continues on the
/// next line (`| 'b'`, `& Other`, a dangling `=>`)
fn member_complete(current: &str, rest: &[char]) -> bool {
    let trimmed = current.trim_end();
    if trimmed.is_empty() || !trimmed.contains(':') {
        return trimmed.is_empty();
    }
    if ["|", "&", "=>", ":", "="].iter().any(|s| trimmed.ends_with(s)) {
        return false;
    }
    let next = rest.iter().find(|c| !c.is_whitespace());
    !matches!(next, Some('|' | '&'))
}

fn parse_member(member: &str) -> Option<PropInfo> {
    let member = member.trim();
    let member = member.strip_prefix("readonly ").unwrap_or(member).trim();
    if member.starts_with('[') || member.starts_with("...") {
        return None;
    }

    // method signature: `onClick(e: Event): void`
    if let Some(paren) = member.find('(') {
        let colon = member.find(':');
        if colon.is_none_or(|c| paren < c) {
            let raw_name = member[..paren].trim();
            let (name, optional) = clean_name(raw_name)?;
            let signature = member[paren..].trim();
            let prop_type = match split_top_level_colon(signature) {
                Some((params, ret)) => format!("{} => {}", params.trim(), ret.trim()),
                None => signature.to_string(),
            };
            return Some(PropInfo::new(name, prop_type, optional));
        }
    }

    let (raw_name, prop_type) = member.split_once(':')?;
    let (name, optional) = clean_name(raw_name.trim())?;
    let prop_type = prop_type.split_whitespace().collect::<Vec<_>>().join(" ");
    if prop_type.is_empty() {
        return None;
    }
    Some(PropInfo::new(name, prop_type, optional))
}

/// Split `(a: A): R` into `(a: A)` and `R`
fn split_top_level_colon(signature: &str) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    for (i, c) in signature.char_indices() {
        match c {
            '(' | '{' | '[' | '<' => depth += 1,
            ')' | '}' | ']' | '>' => depth -= 1,
            ':' if depth == 0 => return Some((&signature[..i], &signature[i + 1..])),
            _ => {}
        }
    }
    None
}

fn clean_name(raw: &str) -> Option<(String, bool)> {
    let (raw, optional) = match raw.strip_suffix('?') {
        Some(stripped) => (stripped.trim(), true),
        None => (raw, false),
    };
    let name = raw.trim_matches(|c| c == '\'' || c == '"');
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((name.to_string(), optional))
}

const TRIGGERS: &[&str] = &[
    "with", "accept", "accepts", "support", "supports", "take", "takes", "has", "having",
];

const FILLER: &[&str] = &[
    "a", "an", "the", "some", "optional", "optionally", "required", "can", "may", "must", "be",
    "is", "are", "that", "which", "prop", "props", "property", "properties", "its", "their",
    "own", "also",
];

/// Props implied by a natural-language description.
///
/// Phrases following with/accept(s)/support(s)/take(s)/has are split on
/// commas and `and`/`or`. A prop is optional unless the phrase says
/// `required` or `must`; `can`, `may` and `optional` force optional.
pub fn extract_props_from_description(text: &str) -> Vec<PropInfo> {
    let mut props = Vec::new();
    let mut seen = HashSet::new();

    for phrase in trigger_phrases(text) {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let has = |w: &str| lowered.iter().any(|l| l == w);

        let explicitly_optional = has("can") || has("may") || has("optional") || has("optionally");
        let required = has("required") || has("must");
        let optional = explicitly_optional || !required;

        let Some(name) = prop_name(&words) else {
            continue;
        };
        if !seen.insert(name.clone()) {
            continue;
        }
        let prop_type = infer_type(&name, &lowered);
        props.push(PropInfo::new(name, prop_type, optional));
    }
    props
}

/// Word runs following a trigger word, split into individual prop phrases
fn trigger_phrases(text: &str) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut current: Option<Vec<String>> = None;

    let flush = |current: &mut Option<Vec<String>>, phrases: &mut Vec<String>| {
        if let Some(words) = current.take() {
            for part in words.join(" ").split(',') {
                for piece in part.split(" and ").flat_map(|p| p.split(" or ")) {
                    let piece = piece.trim();
                    if !piece.is_empty() {
                        phrases.push(piece.to_string());
                    }
                }
            }
        }
    };

    for raw in text.split_whitespace() {
        let ends_sentence = raw.ends_with(['.', ';', '!', '?']);
        let word = raw.trim_end_matches(['.', ';', '!', '?']);
        let bare = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();

        if TRIGGERS.contains(&bare.as_str()) {
            flush(&mut current, &mut phrases);
            current = Some(Vec::new());
        } else if let Some(words) = current.as_mut() {
            words.push(word.to_string());
        }

        if ends_sentence {
            flush(&mut current, &mut phrases);
        }
    }
    flush(&mut current, &mut phrases);
    phrases
}

fn prop_name(words: &[&str]) -> Option<String> {
    // an identifier-looking word (`onClick`, `isOpen`) is used as-is
    if let Some(ident) = words.iter().find(|w| {
        let w = w.trim_matches(|c: char| !c.is_alphanumeric());
        w.chars().next().is_some_and(|c| c.is_lowercase())
            && w.chars().any(|c| c.is_uppercase())
            && w.chars().all(|c| c.is_alphanumeric())
    }) {
        return Some(ident.trim_matches(|c: char| !c.is_alphanumeric()).to_string());
    }

    let kept: Vec<&str> = words
        .iter()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty() && !FILLER.contains(&w.to_lowercase().as_str()))
        .collect();
    if kept.is_empty() {
        return None;
    }
    let name = camel_case(&kept.join(" "));
    (!name.is_empty()).then_some(name)
}

fn infer_type(name: &str, words: &[String]) -> String {
    let has_any = |cues: &[&str]| words.iter().any(|w| cues.contains(&w.as_str()));

    let callback = name.len() > 2
        && name.starts_with("on")
        && name[2..].starts_with(|c: char| c.is_uppercase());
    if callback || has_any(&["callback", "handler", "function"]) {
        return "() => void".to_string();
    }
    let flag = ["is", "has", "should", "can"].iter().any(|p| {
        name.len() > p.len()
            && name.starts_with(p)
            && name[p.len()..].starts_with(|c: char| c.is_uppercase())
    });
    if flag || has_any(&["boolean", "flag", "toggle", "disabled", "enabled", "loading"]) {
        return "boolean".to_string();
    }
    if has_any(&["number", "count", "size", "amount", "index", "maximum", "minimum", "limit"]) {
        return "number".to_string();
    }
    if has_any(&["list", "array", "items", "options", "entries"]) {
        return "string[]".to_string();
    }
    "string".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_props() {
        let src = r#"
import React from 'react';

export interface ButtonProps extends React.HTMLAttributes<HTMLButtonElement> {
  /** Visible text */
  label: string;
  variant?: 'primary' | 'secondary';
  onClick?: (event: React.MouseEvent<HTMLButtonElement>) => void;
  style: { color: string; size: number };
  items: Array<{ id: string, value: number }>,
}

export function Button(props: ButtonProps) { return null; }
"#;
        let props = extract_props(src);
        assert_eq!(
            props,
            vec![
                PropInfo::new("label", "string", false),
                PropInfo::new("variant", "'primary' | 'secondary'", true),
                PropInfo::new(
                    "onClick",
                    "(event: React.MouseEvent<HTMLButtonElement>) => void",
                    true
                ),
                PropInfo::new("style", "{ color: string; size: number }", false),
                PropInfo::new("items", "Array<{ id: string, value: number }>", false),
            ]
        );
    }

    #[test]
    fn test_type_alias_without_separators() {
        let src = "type CardProps = {\n  title: string\n  subtitle?: string\n  size:\n    | 'sm'\n    | 'lg'\n}";
        let props = extract_props(src);
        assert_eq!(props.len(), 3);
        assert_eq!(props[0], PropInfo::new("title", "string", false));
        assert_eq!(props[1], PropInfo::new("subtitle", "string", true));
        assert_eq!(props[2].name, "size");
        assert_eq!(props[2].prop_type, "| 'sm' | 'lg'");
    }

    #[test]
    fn test_method_and_readonly_members() {
        let src = "interface ListProps { readonly rows: number; render?(row: Row): Node; [key: string]: unknown }";
        let props = extract_props(src);
        assert_eq!(
            props,
            vec![
                PropInfo::new("rows", "number", false),
                PropInfo::new("render", "(row: Row) => Node", true),
            ]
        );
    }

    #[test]
    fn test_no_props_declaration() {
        assert!(extract_props("interface State { a: string }").is_empty());
        assert!(extract_props("// interface FooProps { a: string }").is_empty());
        assert!(extract_props("interface FooProps {").is_empty());
    }

    #[test]
    fn test_description_props() {
        let props = extract_props_from_description(
            "Create a Button component with a label, an optional icon and a required onClick handler.",
        );
        assert_eq!(
            props,
            vec![
                PropInfo::new("label", "string", true),
                PropInfo::new("icon", "string", true),
                PropInfo::new("onClick", "() => void", false),
            ]
        );
    }

    #[test]
    fn test_description_can_and_may_mark_optional() {
        let props = extract_props_from_description(
            "Create a Card with a required title, a subtitle that may be empty and an icon that can be hidden.",
        );
        let flags: Vec<(&str, bool)> = props
            .iter()
            .map(|p| (p.name.as_str(), p.optional))
            .collect();
        assert_eq!(
            flags,
            vec![("title", false), ("subtitleEmpty", true), ("iconHidden", true)]
        );

        // an explicit `may` wins over `must` in the same phrase
        let props =
            extract_props_from_description("Build a Badge with a label that must be set but may be blank");
        assert_eq!(props.len(), 1);
        assert!(props[0].optional);
    }

    #[test]
    fn test_description_type_cues() {
        let props = extract_props_from_description(
            "Build a table that supports a row count, a disabled flag and a list of columns",
        );
        let types: Vec<(&str, &str)> = props
            .iter()
            .map(|p| (p.name.as_str(), p.prop_type.as_str()))
            .collect();
        assert_eq!(
            types,
            vec![
                ("rowCount", "number"),
                ("disabledFlag", "boolean"),
                ("listOfColumns", "string[]"),
            ]
        );
    }

    #[test]
    fn test_description_without_triggers() {
        assert!(extract_props_from_description("Make a footer").is_empty());
        assert!(extract_props_from_description("").is_empty());
    }
}
