//! Source Heuristics
//!
//! Pure functions that extract structural facts from raw JavaScript /
//! TypeScript source text. No file I/O happens here.
//!
//! Every function is a textual approximation: comments (and, where noted,
//! string literals) are masked first, then patterns are matched. Results are
//! stable for the same input and never fail.

mod accessibility;
mod classify;
mod complexity;
mod dependencies;
mod patterns;
mod props;
mod source;

use std::path::Path;

pub use accessibility::analyze_accessibility;
pub use classify::{component_name, determine_component_type, has_doc_comment};
pub use complexity::{calculate_cyclomatic_complexity, maintainability_index};
pub use dependencies::{extract_dependencies, extract_state};
pub use props::{extract_props, extract_props_from_description};
pub use source::count_lines;

use crate::types::{ComplexityMetrics, ComponentInfo};

/// Run every heuristic over one file
pub fn analyze_source(text: &str, file_path: &Path) -> ComponentInfo {
    let cyclomatic = calculate_cyclomatic_complexity(text);

    ComponentInfo {
        name: component_name(text, file_path),
        file_path: file_path.to_path_buf(),
        component_type: determine_component_type(text, file_path),
        props: extract_props(text),
        state: extract_state(text),
        dependencies: extract_dependencies(text),
        complexity: ComplexityMetrics {
            cyclomatic,
            maintainability_index: maintainability_index(text, cyclomatic),
        },
        accessibility: analyze_accessibility(text),
        lines_of_code: count_lines(text),
        has_documentation: has_doc_comment(text),
        has_tests: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComponentType;

    #[test]
    fn test_analyze_source() {
        let src = r#"
import React, { useState } from 'react';
import { Icon } from './Icon';

/** A toggle button */
export interface ToggleProps {
  label: string;
  pressed?: boolean;
}

export default function Toggle({ label, pressed }: ToggleProps) {
  const [on, setOn] = useState(pressed ?? false);
  return (
    <button aria-pressed={on} onClick={() => setOn(!on)}>
      {on ? <Icon name="check" /> : null}
      {label}
    </button>
  );
}
"#;
        let info = analyze_source(src, Path::new("src/components/Toggle.tsx"));
        assert_eq!(info.name, "Toggle");
        assert_eq!(info.component_type, ComponentType::Component);
        assert_eq!(info.props.len(), 2);
        assert_eq!(info.state, vec!["on"]);
        assert_eq!(info.dependencies, vec!["react", "./Icon"]);
        assert_eq!(info.complexity.cyclomatic, 2);
        assert!(info.accessibility.score > 70);
        assert!(info.has_documentation);
        assert!(!info.has_tests);
        assert!(info.lines_of_code > 10);
    }
}
