use std::collections::HashSet;
use std::path::{Component, Path};

use super::manifest::Manifest;
use crate::types::{ArchitectureInfo, ArchitecturePattern, ComponentInfo};

const ATOMIC_DIRS: &[&str] = &["atoms", "molecules", "organisms", "templates"];
const FEATURE_DIRS: &[&str] = &["features", "modules", "domains"];
const LAYER_DIRS: &[&str] = &[
    "components", "hooks", "pages", "app", "services", "utils", "lib", "store", "views", "layouts",
];

const STATE_LIBRARIES: &[(&str, &str)] = &[
    ("@reduxjs/toolkit", "Redux Toolkit"),
    ("redux", "Redux"),
    ("zustand", "Zustand"),
    ("mobx", "MobX"),
    ("recoil", "Recoil"),
    ("jotai", "Jotai"),
    ("xstate", "XState"),
    ("@tanstack/react-query", "TanStack Query"),
    ("pinia", "Pinia"),
    ("vuex", "Vuex"),
];

const STYLING_LIBRARIES: &[(&str, &str)] = &[
    ("tailwindcss", "Tailwind CSS"),
    ("styled-components", "styled-components"),
    ("@emotion/react", "Emotion"),
    ("@emotion/styled", "Emotion"),
    ("sass", "Sass"),
    ("@vanilla-extract/css", "vanilla-extract"),
];

const ROUTERS: &[(&str, &str)] = &[
    ("next", "Next.js file-system routing"),
    ("@remix-run/react", "Remix"),
    ("react-router-dom", "React Router"),
    ("react-router", "React Router"),
    ("@tanstack/react-router", "TanStack Router"),
    ("vue-router", "Vue Router"),
    ("@angular/router", "Angular Router"),
];

const TEST_LIBRARIES: &[(&str, &str)] = &[
    ("jest", "Jest"),
    ("vitest", "Vitest"),
    ("@testing-library/react", "Testing Library"),
    ("cypress", "Cypress"),
    ("@playwright/test", "Playwright"),
    ("mocha", "Mocha"),
];

/// Infer architecture facts from component locations and declared dependencies
pub fn detect_architecture(manifest: &Manifest, components: &[ComponentInfo]) -> ArchitectureInfo {
    let mut styling = labels(manifest, STYLING_LIBRARIES);
    let uses_css_modules = components.iter().any(|c| {
        c.dependencies
            .iter()
            .any(|d| d.ends_with(".module.css") || d.ends_with(".module.scss"))
    });
    if uses_css_modules {
        styling.push("CSS Modules".to_string());
    }

    let typescript = manifest.has_dependency("typescript")
        || components.iter().any(|c| {
            c.file_path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == "ts" || e == "tsx")
        });

    ArchitectureInfo {
        pattern: detect_pattern(components.iter().map(|c| c.file_path.as_path())),
        state_management: labels(manifest, STATE_LIBRARIES).into_iter().next(),
        styling,
        routing: labels(manifest, ROUTERS).into_iter().next(),
        testing: labels(manifest, TEST_LIBRARIES),
        typescript,
    }
}

/// Labels of every declared library, deduplicated, in table order
fn labels(manifest: &Manifest, table: &[(&str, &str)]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for (dependency, label) in table {
        if manifest.has_dependency(dependency) && !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    }
    out
}

fn detect_pattern<'a>(paths: impl Iterator<Item = &'a Path>) -> ArchitecturePattern {
    let mut dirs: HashSet<String> = HashSet::new();
    for path in paths {
        let Some(parent) = path.parent() else {
            continue;
        };
        for component in parent.components() {
            if let Component::Normal(name) = component
                && let Some(name) = name.to_str()
            {
                dirs.insert(name.to_lowercase());
            }
        }
    }

    let has_any = |names: &[&str]| names.iter().any(|n| dirs.contains(*n));
    let layer_count = LAYER_DIRS.iter().filter(|n| dirs.contains(**n)).count();

    if has_any(ATOMIC_DIRS) {
        ArchitecturePattern::AtomicDesign
    } else if has_any(FEATURE_DIRS) {
        ArchitecturePattern::FeatureBased
    } else if layer_count >= 2 {
        ArchitecturePattern::Layered
    } else {
        ArchitecturePattern::Flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccessibilityReport, ComplexityMetrics, ComponentType};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn component(path: &str, deps: &[&str]) -> ComponentInfo {
        ComponentInfo {
            name: "X".to_string(),
            file_path: PathBuf::from(path),
            component_type: ComponentType::Component,
            props: vec![],
            state: vec![],
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            complexity: ComplexityMetrics {
                cyclomatic: 1,
                maintainability_index: 80.0,
            },
            accessibility: AccessibilityReport::default(),
            lines_of_code: 10,
            has_documentation: false,
            has_tests: false,
        }
    }

    fn manifest(deps: &[&str]) -> Manifest {
        Manifest {
            dependencies: deps
                .iter()
                .map(|d| (d.to_string(), "1.0.0".to_string()))
                .collect::<BTreeMap<_, _>>(),
            ..Default::default()
        }
    }

    #[test]
    fn test_patterns() {
        let atomic = [component("src/components/atoms/Button.tsx", &[])];
        assert_eq!(
            detect_architecture(&manifest(&[]), &atomic).pattern,
            ArchitecturePattern::AtomicDesign
        );

        let feature = [component("src/features/cart/CartList.tsx", &[])];
        assert_eq!(
            detect_architecture(&manifest(&[]), &feature).pattern,
            ArchitecturePattern::FeatureBased
        );

        let layered = [
            component("src/components/Button.tsx", &[]),
            component("src/hooks/useCart.ts", &[]),
        ];
        assert_eq!(
            detect_architecture(&manifest(&[]), &layered).pattern,
            ArchitecturePattern::Layered
        );

        let flat = [component("src/Button.jsx", &[])];
        assert_eq!(
            detect_architecture(&manifest(&[]), &flat).pattern,
            ArchitecturePattern::Flat
        );
    }

    #[test]
    fn test_libraries() {
        let components = [component("src/Card.jsx", &["./Card.module.css"])];
        let info = detect_architecture(
            &manifest(&["redux", "@reduxjs/toolkit", "tailwindcss", "react-router-dom", "jest"]),
            &components,
        );
        assert_eq!(info.state_management.as_deref(), Some("Redux Toolkit"));
        assert_eq!(info.styling, vec!["Tailwind CSS", "CSS Modules"]);
        assert_eq!(info.routing.as_deref(), Some("React Router"));
        assert_eq!(info.testing, vec!["Jest"]);
        assert!(!info.typescript);
    }

    #[test]
    fn test_typescript_from_files_or_dependency() {
        assert!(detect_architecture(&manifest(&[]), &[component("src/A.tsx", &[])]).typescript);
        assert!(detect_architecture(&manifest(&["typescript"]), &[]).typescript);
    }
}
