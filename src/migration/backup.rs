//! Backup and restore of migration targets
//!
//! A backup is a timestamped directory under the plan's backup dir holding a
//! copy of every target file at its root-relative path, plus a
//! `manifest.json` listing each path with its SHA-256.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::types::{BackupEntry, BackupManifest, RollbackResult};
use crate::constants::migration::BACKUP_MANIFEST;
use crate::fs::{FileSystem, is_contained};
use crate::types::{EngineError, EngineErrorKind, ForgeError, Result, ResultExt};

pub const BACKUP_NOT_FOUND: &str = "Backup location not found";

/// Copy `files` (root-relative) into a fresh backup directory.
///
/// Returns the backup location. Files that do not exist are left out.
pub async fn create_backup(
    fs: &dyn FileSystem,
    root: &Path,
    backup_dir: &Path,
    plan_id: &str,
    files: &[PathBuf],
) -> Result<PathBuf> {
    let created_at = Utc::now();
    let id = Uuid::new_v4().simple().to_string();
    let location = root.join(backup_dir).join(format!(
        "{}-{}",
        created_at.format("%Y%m%dT%H%M%S"),
        &id[..8]
    ));
    fs.create_dir_all(&location)
        .await
        .with_context_fn(|| format!("Failed to create backup directory {}", location.display()))?;

    let mut entries = Vec::with_capacity(files.len());
    for relative in files {
        if !is_contained(relative) {
            return Err(ForgeError::migration(
                "backup",
                format!("Refusing to back up path outside root: {}", relative.display()),
            ));
        }
        let source = root.join(relative);
        if !fs.exists(&source).await {
            continue;
        }
        let content = fs
            .read_to_string(&source)
            .await
            .with_context_fn(|| format!("Failed to read {}", source.display()))?;
        let dest = location.join(relative);
        if let Some(parent) = dest.parent() {
            fs.create_dir_all(parent).await?;
        }
        fs.copy(&source, &dest)
            .await
            .with_context_fn(|| format!("Failed to back up {}", relative.display()))?;
        entries.push(BackupEntry {
            path: relative.clone(),
            sha256: sha256_hex(content.as_bytes()),
        });
    }

    let manifest = BackupManifest {
        plan_id: plan_id.to_string(),
        created_at,
        files: entries,
    };
    fs.write(
        &location.join(BACKUP_MANIFEST),
        &serde_json::to_string_pretty(&manifest)?,
    )
    .await
    .with_context("Failed to write backup manifest")?;

    tracing::info!(
        "Migration: Backed up {} files to {}",
        manifest.files.len(),
        location.display()
    );
    Ok(location)
}

/// Copy every file listed in the backup manifest back under `root`.
///
/// A missing location fails before any copy. Files whose checksum no longer
/// matches the manifest are not restored and are reported as errors.
pub async fn restore(fs: &dyn FileSystem, root: &Path, location: &Path) -> RollbackResult {
    let mut result = RollbackResult::default();

    if !fs.exists(location).await {
        result
            .errors
            .push(EngineError::new(EngineErrorKind::Backup, BACKUP_NOT_FOUND));
        return result;
    }

    let manifest = match read_manifest(fs, location).await {
        Ok(manifest) => manifest,
        Err(e) => {
            result.errors.push(EngineError::new(
                EngineErrorKind::Backup,
                format!("Backup manifest unreadable: {}", e),
            ));
            return result;
        }
    };

    for entry in &manifest.files {
        if !is_contained(&entry.path) {
            result.errors.push(EngineError::new(
                EngineErrorKind::Backup,
                format!("Backup entry outside root: {}", entry.path.display()),
            ));
            continue;
        }
        let saved = location.join(&entry.path);
        let content = match fs.read_to_string(&saved).await {
            Ok(content) => content,
            Err(e) => {
                result.errors.push(EngineError::new(
                    EngineErrorKind::Io,
                    format!("Failed to read backup of {}: {}", entry.path.display(), e),
                ));
                continue;
            }
        };
        if sha256_hex(content.as_bytes()) != entry.sha256 {
            result.errors.push(EngineError::new(
                EngineErrorKind::Backup,
                format!("Checksum mismatch: {}", entry.path.display()),
            ));
            continue;
        }

        let dest = root.join(&entry.path);
        if let Some(parent) = dest.parent()
            && let Err(e) = fs.create_dir_all(parent).await
        {
            result.errors.push(EngineError::new(EngineErrorKind::Io, e.to_string()));
            continue;
        }
        match fs.copy(&saved, &dest).await {
            Ok(()) => result.restored_files.push(entry.path.clone()),
            Err(e) => result.errors.push(EngineError::new(
                EngineErrorKind::Io,
                format!("Failed to restore {}: {}", entry.path.display(), e),
            )),
        }
    }

    result.success = result.errors.is_empty();
    tracing::info!(
        "Migration: Restored {}/{} files from {}",
        result.restored_files.len(),
        manifest.files.len(),
        location.display()
    );
    result
}

async fn read_manifest(fs: &dyn FileSystem, location: &Path) -> Result<BackupManifest> {
    let text = fs.read_to_string(&location.join(BACKUP_MANIFEST)).await?;
    Ok(serde_json::from_str(&text)?)
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;

    fn project() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("/app/src/Button.jsx", "export const Button = () => null;")
            .with_file("/app/src/Card.jsx", "export const Card = () => null;")
    }

    #[tokio::test]
    async fn test_backup_then_restore() {
        let fs = project();
        let files = vec![PathBuf::from("src/Button.jsx"), PathBuf::from("src/Card.jsx")];
        let location = create_backup(&fs, Path::new("/app"), Path::new(".bk"), "p", &files)
            .await
            .unwrap();
        assert!(location.starts_with("/app/.bk"));

        let manifest = read_manifest(&fs, &location).await.unwrap();
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.files[0].sha256.len(), 64);

        fs.insert("/app/src/Button.jsx", "broken");
        let restored = restore(&fs, Path::new("/app"), &location).await;
        assert!(restored.success, "{:?}", restored.errors);
        assert_eq!(restored.restored_files.len(), 2);
        assert_eq!(
            fs.contents("/app/src/Button.jsx").unwrap(),
            "export const Button = () => null;"
        );
    }

    #[tokio::test]
    async fn test_missing_files_are_not_backed_up() {
        let fs = project();
        let files = vec![PathBuf::from("src/Gone.jsx")];
        let location = create_backup(&fs, Path::new("/app"), Path::new(".bk"), "p", &files)
            .await
            .unwrap();
        assert!(read_manifest(&fs, &location).await.unwrap().files.is_empty());
        assert_eq!(fs.copy_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_missing_location() {
        let fs = project();
        let result = restore(&fs, Path::new("/app"), Path::new("/nonexistent")).await;
        assert!(!result.success);
        assert_eq!(result.errors[0].to_string(), BACKUP_NOT_FOUND);
        assert_eq!(fs.copy_count(), 0);
    }

    #[tokio::test]
    async fn test_tampered_backup_is_skipped() {
        let fs = project();
        let files = vec![PathBuf::from("src/Button.jsx")];
        let location = create_backup(&fs, Path::new("/app"), Path::new(".bk"), "p", &files)
            .await
            .unwrap();
        fs.insert(location.join("src/Button.jsx"), "tampered");
        fs.insert("/app/src/Button.jsx", "migrated");

        let result = restore(&fs, Path::new("/app"), &location).await;
        assert!(!result.success);
        assert!(result.errors[0].message.starts_with("Checksum mismatch"));
        assert_eq!(fs.contents("/app/src/Button.jsx").unwrap(), "migrated");
    }

    #[tokio::test]
    async fn test_backup_refuses_paths_outside_root() {
        let fs = project();
        for escaping in ["/app/src/Button.jsx", "../app/src/Button.jsx", "src/../../x.jsx"] {
            let files = vec![PathBuf::from(escaping)];
            let err = create_backup(&fs, Path::new("/app"), Path::new(".bk"), "p", &files)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("outside root"), "{}", err);
        }
        assert_eq!(fs.copy_count(), 0);
        assert_eq!(
            fs.contents("/app/src/Button.jsx").unwrap(),
            "export const Button = () => null;"
        );
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
