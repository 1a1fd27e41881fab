//! Architecture smell detection

use std::collections::{BTreeSet, HashMap};

use super::types::{ArchitectureSmell, SmellKind};
use crate::types::ComponentInfo;

/// God Components (more dependencies than `god_threshold`) followed by
/// Circular Dependencies (two components importing each other)
pub fn detect_smells(components: &[ComponentInfo], god_threshold: usize) -> Vec<ArchitectureSmell> {
    let mut smells: Vec<ArchitectureSmell> = components
        .iter()
        .filter(|c| c.dependencies.len() > god_threshold)
        .map(|c| ArchitectureSmell {
            kind: SmellKind::GodComponent,
            components: vec![c.name.clone()],
            detail: format!(
                "{} dependencies, threshold {}",
                c.dependencies.len(),
                god_threshold
            ),
        })
        .collect();

    let imports: HashMap<&str, BTreeSet<&str>> = components
        .iter()
        .map(|c| {
            let targets = c.dependencies.iter().map(|d| import_target(d)).collect();
            (c.name.as_str(), targets)
        })
        .collect();

    let mut pairs = BTreeSet::new();
    for (&name, targets) in &imports {
        for &target in targets {
            if target == name {
                continue;
            }
            let mutual = imports.get(target).is_some_and(|back| back.contains(name));
            if mutual {
                let pair = if name < target { (name, target) } else { (target, name) };
                pairs.insert(pair);
            }
        }
    }

    smells.extend(pairs.into_iter().map(|(a, b)| ArchitectureSmell {
        kind: SmellKind::CircularDependency,
        components: vec![a.to_string(), b.to_string()],
        detail: "each imports the other".to_string(),
    }));
    smells
}

/// Component name an import specifier points at: `./ui/Button.tsx` -> `Button`
fn import_target(specifier: &str) -> &str {
    let last = specifier.rsplit('/').next().unwrap_or(specifier);
    last.split('.').next().unwrap_or(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::analyze_source;
    use std::path::Path;

    fn component(name: &str, deps: &[&str]) -> ComponentInfo {
        let mut info = analyze_source("", Path::new(&format!("src/{}.tsx", name)));
        info.name = name.to_string();
        info.dependencies = deps.iter().map(|d| d.to_string()).collect();
        info
    }

    #[test]
    fn test_god_component() {
        let deps: Vec<String> = (0..12).map(|i| format!("dep-{}", i)).collect();
        let refs: Vec<&str> = deps.iter().map(String::as_str).collect();
        let components = vec![component("Dashboard", &refs), component("Small", &["react"])];

        let smells = detect_smells(&components, 10);
        assert_eq!(smells.len(), 1);
        assert_eq!(smells[0].kind, SmellKind::GodComponent);
        assert_eq!(smells[0].components, vec!["Dashboard"]);
        assert!(smells[0].to_string().starts_with("God Component: Dashboard"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let components = vec![component("Edge", &["a", "b", "c"])];
        assert!(detect_smells(&components, 3).is_empty());
        assert_eq!(detect_smells(&components, 2).len(), 1);
    }

    #[test]
    fn test_circular_dependency_reported_once() {
        let components = vec![
            component("Modal", &["react", "./Form"]),
            component("Form", &["../overlay/Modal.tsx"]),
            component("Header", &["./Modal"]),
        ];
        let smells = detect_smells(&components, 10);
        assert_eq!(smells.len(), 1);
        assert_eq!(smells[0].kind, SmellKind::CircularDependency);
        assert_eq!(smells[0].components, vec!["Form", "Modal"]);
    }

    #[test]
    fn test_import_target() {
        assert_eq!(import_target("./ui/Button.tsx"), "Button");
        assert_eq!(import_target("react"), "react");
        assert_eq!(import_target("@/components/Card"), "Card");
    }
}
