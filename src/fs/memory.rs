use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::FileSystem;
use super::scanner::PatternSet;

/// In-memory file system for previews and tests
///
/// Reads and writes can be made to fail for chosen paths, and copy
/// operations are counted.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
    failing_reads: Mutex<HashSet<PathBuf>>,
    failing_writes: Mutex<HashSet<PathBuf>>,
    copies: AtomicUsize,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style file insertion
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        lock(&self.files).insert(path.into(), contents.into());
    }

    /// Current contents of a file, if present
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        lock(&self.files).get(path.as_ref()).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        lock(&self.files).keys().cloned().collect()
    }

    /// Make every read of `path` fail with a permission error
    pub fn fail_reads_for(&self, path: impl Into<PathBuf>) {
        lock(&self.failing_reads).insert(path.into());
    }

    /// Make every write to `path` fail with a permission error
    pub fn fail_writes_for(&self, path: impl Into<PathBuf>) {
        lock(&self.failing_writes).insert(path.into());
    }

    /// Number of successful copy operations so far
    pub fn copy_count(&self) -> usize {
        self.copies.load(Ordering::SeqCst)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let declared = lock(&self.dirs).contains(path);
        if declared {
            return true;
        }
        let files = lock(&self.files);
        files.keys().any(|f| f != path && f.starts_with(path))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("Permission denied: {}", path.display()),
    )
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("No such file: {}", path.display()),
    )
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if lock(&self.failing_reads).contains(path) {
            return Err(denied(path));
        }
        lock(&self.files)
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if lock(&self.failing_writes).contains(path) {
            return Err(denied(path));
        }
        lock(&self.files).insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        let is_file = lock(&self.files).contains_key(path);
        is_file || self.is_dir(path)
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut dirs = lock(&self.dirs);
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    async fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        let contents = self.read_to_string(from).await?;
        self.write(to, &contents).await?;
        self.copies.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn glob(
        &self,
        root: &Path,
        include: &[String],
        exclude: &[String],
    ) -> io::Result<Vec<PathBuf>> {
        let patterns = PatternSet::new(include, exclude);
        Ok(lock(&self.files)
            .keys()
            .filter(|p| {
                p.strip_prefix(root)
                    .map(|rel| patterns.matches(rel))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_failure_injection() {
        let fs = MemoryFileSystem::new().with_file("/p/A.tsx", "a");
        fs.fail_reads_for("/p/A.tsx");
        let err = fs.read_to_string(Path::new("/p/A.tsx")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[tokio::test]
    async fn test_directories_are_implicit() {
        let fs = MemoryFileSystem::new().with_file("/p/src/A.tsx", "a");
        assert!(fs.exists(Path::new("/p/src")).await);
        assert!(!fs.exists(Path::new("/p/lib")).await);
        fs.create_dir_all(Path::new("/p/lib/x")).await.unwrap();
        assert!(fs.exists(Path::new("/p/lib")).await);
    }

    #[tokio::test]
    async fn test_copy_counts() {
        let fs = MemoryFileSystem::new().with_file("/p/A.tsx", "a");
        fs.copy(Path::new("/p/A.tsx"), Path::new("/b/A.tsx"))
            .await
            .unwrap();
        assert!(
            fs.copy(Path::new("/p/missing"), Path::new("/b/x"))
                .await
                .is_err()
        );
        assert_eq!(fs.copy_count(), 1);
        assert_eq!(fs.contents("/b/A.tsx").as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_glob_is_relative_to_root() {
        let fs = MemoryFileSystem::new()
            .with_file("/p/src/A.tsx", "")
            .with_file("/p/src/b.ts", "")
            .with_file("/other/C.tsx", "");
        let files = fs
            .glob(Path::new("/p"), &["**/*.tsx".to_string()], &[])
            .await
            .unwrap();
        assert_eq!(files, vec![PathBuf::from("/p/src/A.tsx")]);
    }
}
