use glob::{MatchOptions, Pattern};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::constants::discovery::DEFAULT_MAX_FILE_SIZE;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled include/exclude glob patterns evaluated against root-relative paths
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl PatternSet {
    /// Invalid patterns are logged and ignored
    pub fn new(include: &[String], exclude: &[String]) -> Self {
        Self {
            include: compile(include),
            exclude: compile(exclude),
        }
    }

    /// Whether a root-relative path is selected
    pub fn matches(&self, relative: &Path) -> bool {
        let rel = normalize(relative);
        let included = self.include.is_empty()
            || self
                .include
                .iter()
                .any(|p| p.matches_with(&rel, MATCH_OPTIONS));
        included
            && !self
                .exclude
                .iter()
                .any(|p| p.matches_with(&rel, MATCH_OPTIONS))
    }
}

fn compile(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!("Ignoring invalid glob pattern '{}': {}", p, e);
                None
            }
        })
        .collect()
}

/// Forward-slash form of a relative path so patterns behave the same on every OS
fn normalize(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Walks a project tree honoring .gitignore and the configured patterns
pub struct FileScanner {
    root: PathBuf,
    patterns: PatternSet,
    max_file_size: u64,
}

impl FileScanner {
    pub fn new<P: AsRef<Path>>(root: P, include: &[String], exclude: &[String]) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            patterns: PatternSet::new(include, exclude),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Absolute paths of matching files, sorted for stable output
    pub fn scan(&self) -> Vec<PathBuf> {
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .follow_links(false) // Security: prevent symlink traversal attacks
            .build();

        let mut files: Vec<PathBuf> = walker
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .filter(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.root)
                    .map(|rel| self.patterns.matches(rel))
                    .unwrap_or(false)
            })
            .filter(|entry| self.check_size(entry.path()))
            .map(|entry| entry.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    fn check_size(&self, path: &Path) -> bool {
        path.metadata()
            .map(|m| m.len() <= self.max_file_size)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pattern_set_matches_nested_and_root_files() {
        let set = PatternSet::new(&strings(&["**/*.tsx"]), &strings(&["**/node_modules/**"]));
        assert!(set.matches(Path::new("Button.tsx")));
        assert!(set.matches(Path::new("src/components/Button.tsx")));
        assert!(!set.matches(Path::new("node_modules/lib/Button.tsx")));
        assert!(!set.matches(Path::new("src/Button.ts")));
    }

    #[test]
    fn test_invalid_pattern_is_ignored() {
        let set = PatternSet::new(&strings(&["[", "**/*.jsx"]), &[]);
        assert!(set.matches(Path::new("a/B.jsx")));
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src/components")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("src/components/Card.tsx"), "export const Card = 1;").unwrap();
        fs::write(root.join("src/App.tsx"), "export default function App() {}").unwrap();
        fs::write(root.join("src/util.ts"), "export const x = 1;").unwrap();
        fs::write(root.join("node_modules/pkg/Index.tsx"), "").unwrap();

        let files = FileScanner::new(root, &strings(&["**/*.tsx"]), &strings(&["**/node_modules/**"]))
            .scan();

        assert_eq!(
            files,
            vec![root.join("src/App.tsx"), root.join("src/components/Card.tsx")]
        );
    }

    #[test]
    fn test_scan_respects_max_file_size() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Big.tsx"), "x".repeat(64)).unwrap();
        fs::write(temp.path().join("Small.tsx"), "x").unwrap();

        let files = FileScanner::new(temp.path(), &strings(&["**/*.tsx"]), &[])
            .with_max_file_size(8)
            .scan();
        assert_eq!(files, vec![temp.path().join("Small.tsx")]);
    }
}
