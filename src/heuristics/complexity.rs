//! Cyclomatic complexity and maintainability index
//!
//! Both are textual approximations over comment- and string-masked source,
//! not AST-exact computations.

use std::collections::HashSet;

use super::patterns::{regex_decision_keyword, regex_else_if};
use super::source::{count_lines, strip_comments_and_strings};

/// `1 + decision points`.
///
/// Decision points: `if`, `else if` (counted once), `else`, `case`, `for`,
/// `while`, `&&`, `||` and the ternary `?`.
pub fn calculate_cyclomatic_complexity(text: &str) -> u32 {
    let code = strip_comments_and_strings(text);

    let keywords = regex_decision_keyword().find_iter(&code).count();
    // `else if` matched both `else` and `if`
    let else_ifs = regex_else_if().find_iter(&code).count();
    let ternaries = count_ternaries(&code);

    1 + (keywords - else_ifs + ternaries) as u32
}

/// `?` that is neither optional chaining, nullish coalescing nor an optional
/// member/parameter annotation.
fn count_ternaries(code: &str) -> usize {
    let bytes = code.as_bytes();
    (0..bytes.len())
        .filter(|&i| {
            if bytes[i] != b'?' {
                return false;
            }
            let prev = i.checked_sub(1).map(|p| bytes[p]);
            let next = bytes[i + 1..].iter().copied().find(|b| !b.is_ascii_whitespace());
            prev != Some(b'?') && !matches!(next, Some(b'.' | b'?' | b':' | b')' | b',' | b'='))
        })
        .count()
}

/// Normalized maintainability index (0-100).
///
/// `MI = 171 - 5.2 ln(V) - 0.23 CC - 16.2 ln(LOC)` with the Halstead volume
/// `V` approximated from identifier/operator tokens.
pub fn maintainability_index(text: &str, cyclomatic: u32) -> f64 {
    let code = strip_comments_and_strings(text);
    let (total, distinct) = halstead_counts(&code);
    let volume = if total == 0 {
        1.0
    } else {
        (total as f64 * (distinct.max(2) as f64).log2()).max(1.0)
    };
    let loc = count_lines(&code).max(1) as f64;

    let raw = 171.0 - 5.2 * volume.ln() - 0.23 * f64::from(cyclomatic) - 16.2 * loc.ln();
    let normalized = (raw * 100.0 / 171.0).clamp(0.0, 100.0);
    (normalized * 10.0).round() / 10.0
}

/// Total and distinct token counts (operands and operators)
fn halstead_counts(code: &str) -> (usize, usize) {
    let mut total = 0;
    let mut distinct: HashSet<&str> = HashSet::new();
    let mut start: Option<usize> = None;

    for (i, c) in code.char_indices() {
        let is_word = c.is_alphanumeric() || c == '_' || c == '$';
        match (is_word, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                total += 1;
                distinct.insert(&code[s..i]);
                start = None;
            }
            _ => {}
        }
        if !is_word && !c.is_whitespace() {
            total += 1;
            distinct.insert(&code[i..i + c.len_utf8()]);
        }
    }
    if let Some(s) = start {
        total += 1;
        distinct.insert(&code[s..]);
    }
    (total, distinct.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_straight_line_code_is_one() {
        assert_eq!(calculate_cyclomatic_complexity(""), 1);
        assert_eq!(
            calculate_cyclomatic_complexity("const a = 1;\nreturn <div>{a}</div>;"),
            1
        );
    }

    #[test]
    fn test_counts_each_decision_point() {
        let src = r#"
            if (a) { x(); } else if (b) { y(); } else { z(); }
            for (const i of items) {}
            while (busy) {}
            switch (k) { case 1: break; case 2: break; }
            const v = ok ? 1 : 2;
            const w = a && b || c;
        "#;
        // if, else if, else, for, while, case x2, ternary, &&, ||
        assert_eq!(calculate_cyclomatic_complexity(src), 11);
    }

    #[test]
    fn test_ignores_comments_and_strings() {
        let src = "// if (a) && b\nconst s = 'if || else';\n/* for while */";
        assert_eq!(calculate_cyclomatic_complexity(src), 1);
    }

    #[test]
    fn test_apostrophe_in_jsx_text_keeps_decisions() {
        let src = "return <p>Don't worry {busy ? <Spinner /> : null} {ok && <Done />}</p>;";
        assert_eq!(calculate_cyclomatic_complexity(src), 3);
    }

    #[test]
    fn test_optional_syntax_is_not_a_ternary() {
        let src = "interface P { label?: string }\nconst n = user?.name ?? 'x';\nfunction f(a?: number) {}";
        assert_eq!(calculate_cyclomatic_complexity(src), 1);
    }

    #[test]
    fn test_identifiers_containing_keywords() {
        assert_eq!(
            calculate_cyclomatic_complexity("const format = forEachItem(ifTrue, elsewhere);"),
            1
        );
    }

    #[test]
    fn test_maintainability_bounds() {
        let small = maintainability_index("const a = 1;", 1);
        assert!(small > 0.0 && small <= 100.0);

        let big: String = (0..400)
            .map(|i| format!("if (value{i} > {i}) {{ total += compute(value{i}, {i}); }}\n"))
            .collect();
        let large = maintainability_index(&big, calculate_cyclomatic_complexity(&big));
        assert!(large < small);
        assert!(large >= 0.0);
        assert!(maintainability_index("", 1) > 99.0);
    }

    const SNIPPETS: &[&str] = &[
        "function Button({ label }) {\n  return <button>{label}</button>;\n}",
        "if (a) {\n  b();\n} else {\n  c();\n}",
        "const x = a && b;\nconst y = c ? d : e;\nfor (const i of list) {\n  use(i);\n}",
        "switch (k) {\n  case 1:\n    break;\n}\nwhile (x) {\n  x--;\n}",
    ];

    proptest! {
        #[test]
        fn prop_complexity_at_least_one(text in ".{0,200}") {
            prop_assert!(calculate_cyclomatic_complexity(&text) >= 1);
        }

        #[test]
        fn prop_invariant_under_neutral_insertion(
            snippet in 0..SNIPPETS.len(),
            line in 0usize..8,
            name in "[a-z]{1,6}",
            value in 0u32..10_000,
        ) {
            let base = SNIPPETS[snippet];
            let mut lines: Vec<&str> = base.lines().collect();
            let inserted = format!("const v{} = {};", name, value);
            let at = line.min(lines.len());
            lines.insert(at, &inserted);
            let modified = lines.join("\n");
            prop_assert_eq!(
                calculate_cyclomatic_complexity(base),
                calculate_cyclomatic_complexity(&modified)
            );
        }
    }
}
