//! Framework idiom mapping tables

use serde::{Deserialize, Serialize};

use super::types::{MigrationPhase, RiskLevel, Transformation};

/// One source-framework idiom and its target-framework counterpart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentMapping {
    pub source: String,
    pub target: String,
    pub notes: String,
}

type Table = &'static [(&'static str, &'static str, &'static str)];

const REACT_TO_VUE: Table = &[
    ("useState", "ref", "Reactive state"),
    ("useEffect", "onMounted", "Lifecycle side effects; use watch for dependencies"),
    ("useMemo", "computed", "Derived values"),
    ("useRef", "ref", "Template refs"),
    ("useContext", "inject", "Dependency injection (provide/inject)"),
    ("className", "class", "Attribute name"),
    ("onClick", "@click", "Event binding"),
    ("props.children", "<slot />", "Content projection"),
    ("function component", "defineComponent", "Component declaration"),
];

const REACT_TO_ANGULAR: Table = &[
    ("useState", "signal", "Reactive state"),
    ("useEffect", "ngOnInit", "Lifecycle hook"),
    ("useMemo", "computed", "Derived signals"),
    ("useContext", "inject", "Injected service"),
    ("className", "class", "Attribute name"),
    ("onClick", "(click)", "Event binding"),
    ("props", "@Input()", "Component inputs"),
    ("props.children", "<ng-content />", "Content projection"),
    ("function component", "@Component class", "Component declaration"),
];

const VUE_TO_REACT: Table = &[
    ("ref", "useState", "Reactive state"),
    ("reactive", "useState", "Reactive object state"),
    ("computed", "useMemo", "Derived values"),
    ("onMounted", "useEffect", "Mount side effects"),
    ("watch", "useEffect", "Watched side effects"),
    ("inject", "useContext", "Context lookup"),
    ("class", "className", "Attribute name"),
    ("@click", "onClick", "Event binding"),
    ("v-if", "{condition && ...}", "Conditional rendering"),
    ("v-for", "Array.map", "List rendering"),
    ("<slot />", "props.children", "Content projection"),
];

fn table(source: &str, target: &str) -> Table {
    match (
        source.trim().to_lowercase().as_str(),
        target.trim().to_lowercase().as_str(),
    ) {
        ("react", "vue") => REACT_TO_VUE,
        ("react", "angular") => REACT_TO_ANGULAR,
        ("vue", "react") => VUE_TO_REACT,
        _ => &[],
    }
}

/// Idiom mapping between two frameworks; unsupported pairs yield an empty list
pub fn generate_component_mapping(source: &str, target: &str) -> Vec<ComponentMapping> {
    table(source, target)
        .iter()
        .map(|(from, to, notes)| ComponentMapping {
            source: from.to_string(),
            target: to.to_string(),
            notes: notes.to_string(),
        })
        .collect()
}

/// Phase renaming every identifier-to-identifier mapping across all
/// components, matching whole words only
pub fn rename_phase(source: &str, target: &str) -> Option<MigrationPhase> {
    let renames: Vec<Transformation> = generate_component_mapping(source, target)
        .into_iter()
        .filter(|m| is_identifier(&m.source) && is_identifier(&m.target))
        .map(|m| {
            Transformation::word(
                format!("rename-{}", m.source),
                m.source.clone(),
                m.target.clone(),
            )
        })
        .collect();

    if renames.is_empty() {
        return None;
    }

    let mut phase = MigrationPhase::new(
        "rename-idioms",
        format!("Rename {} idioms to {}", source, target),
    )
    .risk(RiskLevel::Medium)
    .target(crate::constants::migration::ALL_COMPONENTS);
    phase.transformations = renames;
    Some(phase)
}

fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
