use std::sync::OnceLock;

use regex::Regex;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

/// `from 'x'`, `import 'x'`, `import('x')`, `require('x')`
pub(crate) fn regex_module_specifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?:\bfrom\s*|\bimport\s*\(?\s*|\brequire\s*\(\s*)["']([^"'\n]+)["']"#)
    })
}

/// Start of a `XProps` interface or object type alias, up to the opening brace
pub(crate) fn regex_props_declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r"\b(?:interface\s+([A-Za-z0-9_$]*Props)\b[^{;]*\{|type\s+([A-Za-z0-9_$]*Props)\b[^=;]*=\s*\{)")
    })
}

pub(crate) fn regex_exported_hook() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r"\bexport\s+(?:default\s+)?(?:async\s+)?(?:function\s*\*?|const|let)\s+(use[A-Z0-9][A-Za-z0-9_$]*)")
    })
}

pub(crate) fn regex_default_export_page() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r"\bexport\s+default\s+(?:async\s+)?(?:function\s+)?([A-Z][A-Za-z0-9_$]*Page)\b")
    })
}

pub(crate) fn regex_default_export_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r"\bexport\s+default\s+(?:async\s+)?(?:(?:function|class)\s+)?([A-Za-z_$][A-Za-z0-9_$]*)")
    })
}

pub(crate) fn regex_named_component_export() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r"\bexport\s+(?:async\s+)?(?:function|const|class)\s+([A-Z][A-Za-z0-9_$]*|use[A-Z0-9][A-Za-z0-9_$]*)")
    })
}

/// `const [value, setValue] = useState(...)` and `useReducer`
pub(crate) fn regex_state_hook() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r"\[\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*,\s*[A-Za-z_$][A-Za-z0-9_$]*\s*\]\s*=\s*(?:React\.)?use(?:State|Reducer)\b")
    })
}

pub(crate) fn regex_decision_keyword() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"\b(?:if|else|case|for|while)\b|&&|\|\|"))
}

pub(crate) fn regex_else_if() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"\belse\s+if\b"))
}
