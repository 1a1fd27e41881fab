//! Text transformations

use regex::Regex;

use super::types::{Transformation, TransformationKind};

/// Apply one transformation to file content.
///
/// Literal substitutions replace every occurrence and leave the content
/// untouched when the search text is empty. `add` appends the target text;
/// `modify` is a no-op. The only failure is an invalid regex pattern.
pub fn apply(transformation: &Transformation, content: &str) -> Result<String, regex::Error> {
    match transformation.kind {
        TransformationKind::Replace => match &transformation.pattern {
            Some(pattern) => {
                let re = Regex::new(pattern)?;
                let replacement = transformation
                    .replacement
                    .as_deref()
                    .unwrap_or(&transformation.target);
                Ok(re.replace_all(content, replacement).into_owned())
            }
            None => Ok(substitute(content, &transformation.source, &transformation.target)),
        },
        TransformationKind::Rename => Ok(substitute(
            content,
            &transformation.source,
            &transformation.target,
        )),
        TransformationKind::Remove => Ok(substitute(content, &transformation.source, "")),
        TransformationKind::Add => Ok(format!("{}{}", content, transformation.target)),
        TransformationKind::Modify => Ok(content.to_string()),
    }
}

fn substitute(content: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        content.to_string()
    } else {
        content.replace(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_literal_replace_is_global() {
        let t = Transformation::replace("t", "foo", "bar");
        assert_eq!(apply(&t, "foo + foo").unwrap(), "bar + bar");
    }

    #[test]
    fn test_regex_replace_expands_groups() {
        let t = Transformation::regex("t", r"useState\((\w+)\)", "ref($1)");
        assert_eq!(
            apply(&t, "const a = useState(0); const b = useState(x);").unwrap(),
            "const a = ref(0); const b = ref(x);"
        );
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let t = Transformation::regex("t", "(unclosed", "x");
        assert!(apply(&t, "anything").is_err());
    }

    #[test]
    fn test_add_remove_rename_modify() {
        let add = Transformation::add("a", "\nexport {};\n");
        assert_eq!(apply(&add, "x").unwrap(), "x\nexport {};\n");

        let remove = Transformation::remove("r", "console.log(1);");
        assert_eq!(apply(&remove, "a;console.log(1);b").unwrap(), "a;b");

        let rename = Transformation::rename("n", "Button", "AppButton");
        assert_eq!(apply(&rename, "<Button/>").unwrap(), "<AppButton/>");

        let modify = Transformation::new("m", TransformationKind::Modify, "x", "y");
        assert_eq!(apply(&modify, "x").unwrap(), "x");
    }

    #[test]
    fn test_empty_source_is_noop() {
        let t = Transformation::replace("t", "", "X");
        assert_eq!(apply(&t, "abc").unwrap(), "abc");
    }

    proptest! {
        /// Replacing a present token with one absent from the content and
        /// back restores the original text
        #[test]
        fn prop_replace_round_trip(
            segments in prop::collection::vec("[a-y ]{0,12}", 2..6),
        ) {
            let original = segments.join("FOO");
            let forward = Transformation::replace("f", "FOO", "Zq");
            let back = Transformation::replace("b", "Zq", "FOO");

            let migrated = apply(&forward, &original).unwrap();
            prop_assert!(!migrated.contains("FOO"));
            prop_assert_eq!(apply(&back, &migrated).unwrap(), original);
        }
    }
}
