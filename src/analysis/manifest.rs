use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::types::{ForgeError, Result};

/// The fields of `package.json` the analysis reads
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    /// Parse manifest text; any structural problem is a `ManifestParse` error
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ForgeError::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Declared range of a production or dev dependency
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.dependencies
            .get(name)
            .or_else(|| self.dev_dependencies.get(name))
            .map(String::as_str)
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.version_of(name).is_some()
    }

    /// Whether any declared dependency name starts with `prefix`
    pub fn has_dependency_prefix(&self, prefix: &str) -> bool {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .any(|name| name.starts_with(prefix))
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }
}

/// Reduce a declared range to a bare version: `^14.0.0` -> `14.0.0`,
/// `>=1.2 <2` -> `1.2`. Tags such as `latest` or `*` are kept.
pub fn normalize_version(range: &str) -> String {
    let first = range.split_whitespace().next().unwrap_or("");
    let first = first.split("||").next().unwrap_or(first);
    let trimmed = first.trim_start_matches(['^', '~', '=', '<', '>', 'v', ' ']);
    if trimmed.is_empty() {
        range.trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// `*`, `latest`, `x` and empty ranges accept any release
pub fn is_unpinned(range: &str) -> bool {
    matches!(range.trim(), "" | "*" | "latest" | "x" | "next")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::parse(
            Path::new("package.json"),
            r#"{
                "name": "shop",
                "version": "1.2.0",
                "dependencies": { "react": "^18.2.0", "next": "14.0.0" },
                "devDependencies": { "jest": "~29.7.0" },
                "scripts": { "dev": "next dev" }
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.name.as_deref(), Some("shop"));
        assert_eq!(manifest.version_of("jest"), Some("~29.7.0"));
        assert!(manifest.has_dependency("next"));
        assert!(manifest.has_dependency_prefix("je"));
        assert_eq!(manifest.dependency_count(), 3);
    }

    #[test]
    fn test_parse_missing_sections() {
        let manifest = Manifest::parse(Path::new("package.json"), "{}").unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_parse_error_is_distinct() {
        let err = Manifest::parse(Path::new("package.json"), "{ not json").unwrap_err();
        assert!(matches!(err, ForgeError::ManifestParse { .. }));
        let err = Manifest::parse(Path::new("package.json"), "[1, 2]").unwrap_err();
        assert!(matches!(err, ForgeError::ManifestParse { .. }));
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("^14.0.0"), "14.0.0");
        assert_eq!(normalize_version("~1.2.3"), "1.2.3");
        assert_eq!(normalize_version(">=1.2 <2"), "1.2");
        assert_eq!(normalize_version("v2.0.0"), "2.0.0");
        assert_eq!(normalize_version("18.2.0"), "18.2.0");
        assert_eq!(normalize_version("latest"), "latest");
        assert_eq!(normalize_version("*"), "*");
    }

    #[test]
    fn test_unpinned() {
        assert!(is_unpinned("*"));
        assert!(is_unpinned("latest"));
        assert!(!is_unpinned("^1.0.0"));
    }
}
