use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use super::FileSystem;
use super::scanner::FileScanner;
use crate::constants::discovery::DEFAULT_MAX_FILE_SIZE;

/// Disk-backed file system using tokio for I/O and a blocking walker for discovery
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    max_file_size: u64,
}

impl LocalFileSystem {
    pub fn new() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        tokio::fs::copy(from, to).await.map(|_| ())
    }

    async fn glob(
        &self,
        root: &Path,
        include: &[String],
        exclude: &[String],
    ) -> io::Result<Vec<PathBuf>> {
        if !tokio::fs::try_exists(root).await? {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", root.display()),
            ));
        }

        let scanner =
            FileScanner::new(root, include, exclude).with_max_file_size(self.max_file_size);
        tokio::task::spawn_blocking(move || scanner.scan())
            .await
            .map_err(io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_read_copy_roundtrip() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFileSystem::new();
        let dir = temp.path().join("a/b");
        fs.create_dir_all(&dir).await.unwrap();
        fs.create_dir_all(&dir).await.unwrap();

        let file = dir.join("Card.tsx");
        fs.write(&file, "export const Card = () => null;").await.unwrap();
        assert!(fs.exists(&file).await);

        let copy = temp.path().join("Card.copy.tsx");
        fs.copy(&file, &copy).await.unwrap();
        assert_eq!(
            fs.read_to_string(&copy).await.unwrap(),
            "export const Card = () => null;"
        );
    }

    #[tokio::test]
    async fn test_glob_missing_root_is_error() {
        let fs = LocalFileSystem::new();
        let result = fs
            .glob(Path::new("/definitely/not/here"), &["**/*".to_string()], &[])
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_glob_lists_matches() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Nav.jsx"), "").unwrap();
        std::fs::write(temp.path().join("notes.md"), "").unwrap();

        let fs = LocalFileSystem::new();
        let files = fs
            .glob(temp.path(), &["**/*.jsx".to_string()], &[])
            .await
            .unwrap();
        assert_eq!(files, vec![temp.path().join("Nav.jsx")]);
    }
}
