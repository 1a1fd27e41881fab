use std::collections::HashSet;

use super::patterns::{regex_module_specifier, regex_state_hook};
use super::source::strip_comments;

/// Module specifiers referenced by `import`, `export ... from`, `require()`
/// and dynamic `import()`, deduplicated in first-seen order.
pub fn extract_dependencies(text: &str) -> Vec<String> {
    let code = strip_comments(text);
    let mut seen = HashSet::new();

    regex_module_specifier()
        .captures_iter(&code)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|spec| !spec.is_empty() && seen.insert(spec.clone()))
        .collect()
}

/// State variable names declared through `useState` / `useReducer`
pub fn extract_state(text: &str) -> Vec<String> {
    let code = strip_comments(text);
    let mut seen = HashSet::new();

    regex_state_hook()
        .captures_iter(&code)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_import_forms() {
        let src = r#"
import React, { useState } from 'react';
import type { Theme } from "./theme";
import './styles.css';
export { Button } from './Button';
export * from "../shared";
const lodash = require('lodash');
const Chart = lazy(() => import('./Chart'));
"#;
        assert_eq!(
            extract_dependencies(src),
            vec![
                "react",
                "./theme",
                "./styles.css",
                "./Button",
                "../shared",
                "lodash",
                "./Chart"
            ]
        );
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let src = "import a from 'x';\nimport b from 'y';\nimport { c } from 'x';";
        assert_eq!(extract_dependencies(src), vec!["x", "y"]);
    }

    #[test]
    fn test_commented_imports_ignored() {
        let src = "// import old from 'legacy';\n/* import 'gone'; */\nimport now from 'current';";
        assert_eq!(extract_dependencies(src), vec!["current"]);
    }

    #[test]
    fn test_extract_state() {
        let src = r#"
const [count, setCount] = useState(0);
const [state, dispatch] = React.useReducer(reducer, init);
const [count, setAgain] = useState(1);
const ref = useRef(null);
"#;
        assert_eq!(extract_state(src), vec!["count", "state"]);
    }

    proptest! {
        #[test]
        fn prop_dedup_preserves_first_seen_order(
            modules in proptest::collection::vec("[a-z]{1,5}", 1..12)
        ) {
            let src: String = modules
                .iter()
                .map(|m| format!("import {{ x }} from '{}';\n", m))
                .collect();

            let mut expected: Vec<String> = Vec::new();
            for m in &modules {
                if !expected.contains(m) {
                    expected.push(m.clone());
                }
            }

            let deps = extract_dependencies(&src);
            let unique: HashSet<&String> = deps.iter().collect();
            prop_assert_eq!(unique.len(), deps.len());
            prop_assert_eq!(deps, expected);
        }
    }
}
