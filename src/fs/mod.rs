//! File-System Boundary
//!
//! Every engine performs I/O through the [`FileSystem`] trait. These calls are
//! the only suspension points of an engine operation; everything else is
//! synchronous computation.
//!
//! - [`LocalFileSystem`]: tokio-backed disk access, gitignore-aware discovery
//! - [`MemoryFileSystem`]: in-memory tree for dry previews and tests

mod local;
mod memory;
pub mod scanner;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;
pub use scanner::{FileScanner, PatternSet};

use async_trait::async_trait;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Text file I/O and discovery used by the engines
#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    async fn exists(&self, path: &Path) -> bool;

    /// Recursive and idempotent
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    async fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Files under `root` whose root-relative path matches `include` and not
    /// `exclude`, as absolute paths in stable order
    async fn glob(
        &self,
        root: &Path,
        include: &[String],
        exclude: &[String],
    ) -> io::Result<Vec<PathBuf>>;
}

/// Shared handle to a file system implementation
pub type SharedFileSystem = Arc<dyn FileSystem>;

/// True when `path` is relative and cannot climb above the directory it is
/// joined to
pub fn is_contained(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
