use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::instrument;

use super::backup::{self, create_backup};
use super::mapping::{ComponentMapping, generate_component_mapping};
use super::ordering::order_phases;
use super::transform::apply;
use super::types::{
    MigrationPhase, MigrationPlan, MigrationResult, MigrationState, RiskLevel, RollbackResult,
};
use crate::constants::migration::ALL_COMPONENTS;
use crate::fs::{SharedFileSystem, is_contained};
use crate::types::{EngineError, EngineErrorKind};

pub const DRY_RUN_WARNING: &str = "Dry run mode - no files were modified";
pub const DEPENDENCIES_NOT_SATISFIED: &str = "Phase dependencies not satisfied";
pub const VALIDATION_FAILED: &str = "Validation failed";
pub const TARGET_OUTSIDE_ROOT: &str = "Target outside project root";

/// Executes a [`MigrationPlan`] against one project root
pub struct MigrationEngine {
    root: PathBuf,
    fs: SharedFileSystem,
    plan: MigrationPlan,
}

/// Staged output of one phase; nothing is written until the phase succeeds
#[derive(Debug, Default)]
struct PhaseChanges {
    files: Vec<(PathBuf, String)>,
    skipped: Vec<PathBuf>,
    validation_errors: Vec<EngineError>,
}

impl MigrationEngine {
    pub fn new(root: impl AsRef<Path>, fs: SharedFileSystem, plan: MigrationPlan) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            fs,
            plan,
        }
    }

    pub fn plan(&self) -> &MigrationPlan {
        &self.plan
    }

    /// Run every phase in dependency order
    ///
    /// Phase failures are recorded and the run continues, except when the
    /// failed phase is high-risk: then the remaining phases are not attempted.
    /// A failed phase writes nothing.
    #[instrument(skip(self), fields(plan = %self.plan.id, dry_run = self.plan.dry_run))]
    pub async fn execute_migration(&self) -> MigrationResult {
        let mut result = MigrationResult::default();
        tracing::info!(
            "Migration: Starting {} ({} phases)",
            self.plan.id,
            self.plan.phases.len()
        );

        let targets: Vec<Vec<PathBuf>> = self
            .plan
            .phases
            .iter()
            .map(|phase| self.resolve_targets(phase, &mut result.warnings))
            .collect();

        if self.plan.dry_run {
            result.warnings.push(DRY_RUN_WARNING.to_string());
        } else {
            result.final_state = MigrationState::BackingUp;
            let mut files: Vec<PathBuf> = targets.iter().flatten().cloned().collect();
            files.sort();
            files.dedup();
            match create_backup(
                self.fs.as_ref(),
                &self.root,
                &self.plan.backup_dir,
                &self.plan.id,
                &files,
            )
            .await
            {
                Ok(location) => result.backup_location = Some(location),
                Err(e) => {
                    tracing::error!("Migration: Backup failed: {}", e);
                    result.errors.push(EngineError::new(
                        EngineErrorKind::Backup,
                        format!("Backup failed: {}", e),
                    ));
                    result.final_state = MigrationState::Aborted;
                    return result;
                }
            }
        }

        result.final_state = MigrationState::ExecutingPhases;
        let mut preview: HashMap<PathBuf, String> = HashMap::new();
        let mut completed: HashSet<&str> = HashSet::new();

        for idx in order_phases(&self.plan.phases) {
            let phase = &self.plan.phases[idx];
            let outcome = match phase
                .dependencies
                .iter()
                .find(|dep| !completed.contains(dep.as_str()))
            {
                Some(missing) => Err(EngineError::new(
                    EngineErrorKind::Dependency,
                    format!("{}: {}", DEPENDENCIES_NOT_SATISFIED, missing),
                )),
                None => match self.run_phase(phase, &targets[idx], &preview).await {
                    Ok(changes) => self.commit(changes, &mut preview, &mut result).await,
                    Err(e) => Err(e),
                },
            };

            match outcome {
                Ok(written) => {
                    tracing::info!("Migration: Phase {} completed ({} files)", phase.id, written);
                    completed.insert(phase.id.as_str());
                    result.completed_phases.push(phase.id.clone());
                }
                Err(error) => {
                    tracing::warn!("Migration: Phase {} failed: {}", phase.id, error);
                    result.failed_phases.push(phase.id.clone());
                    result.errors.push(error);
                    if phase.risk_level == RiskLevel::High {
                        tracing::error!(
                            "Migration: High-risk phase {} failed, aborting remaining phases",
                            phase.id
                        );
                        result.final_state = MigrationState::Aborted;
                        break;
                    }
                }
            }
        }

        if result.final_state != MigrationState::Aborted {
            result.final_state = MigrationState::Completed;
        }
        result.success =
            result.failed_phases.is_empty() && result.final_state == MigrationState::Completed;

        tracing::info!(
            "Migration: Finished {} ({} completed, {} failed, {} files modified)",
            result.final_state,
            result.completed_phases.len(),
            result.failed_phases.len(),
            result.modified_files.len()
        );
        result
    }

    /// Restore the files recorded in a backup created by `execute_migration`
    #[instrument(skip(self))]
    pub async fn rollback(&self, backup_location: &Path) -> RollbackResult {
        let location = if backup_location.is_absolute() {
            backup_location.to_path_buf()
        } else {
            self.root.join(backup_location)
        };
        tracing::info!("Migration: Rolling back from {}", location.display());
        backup::restore(self.fs.as_ref(), &self.root, &location).await
    }

    pub fn generate_component_mapping(&self, source: &str, target: &str) -> Vec<ComponentMapping> {
        generate_component_mapping(source, target)
    }

    /// Root-relative target files of a phase, deduplicated in order
    fn resolve_targets(&self, phase: &MigrationPhase, warnings: &mut Vec<String>) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in &phase.components {
            if entry == ALL_COMPONENTS {
                files.extend(self.plan.components.values().cloned());
            } else if let Some(path) = self.plan.components.get(entry) {
                files.push(path.clone());
            } else if entry.contains('/') || entry.contains('.') {
                files.push(PathBuf::from(entry));
            } else {
                warnings.push(format!("Unknown component in phase {}: {}", phase.id, entry));
            }
        }

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(files.len());
        for path in files {
            let relative = path
                .strip_prefix(&self.root)
                .map(Path::to_path_buf)
                .unwrap_or(path);
            if !is_contained(&relative) {
                tracing::warn!("Migration: Ignoring target outside root: {}", relative.display());
                warnings.push(format!(
                    "{} in phase {}: {}",
                    TARGET_OUTSIDE_ROOT,
                    phase.id,
                    relative.display()
                ));
                continue;
            }
            if seen.insert(relative.clone()) {
                resolved.push(relative);
            }
        }
        resolved
    }

    async fn run_phase(
        &self,
        phase: &MigrationPhase,
        targets: &[PathBuf],
        preview: &HashMap<PathBuf, String>,
    ) -> Result<PhaseChanges, EngineError> {
        tracing::debug!(
            "Migration: Phase {} ({}, risk {}, {} targets)",
            phase.id,
            phase.name,
            phase.risk_level,
            targets.len()
        );
        let mut changes = PhaseChanges::default();

        for relative in targets {
            let path = self.root.join(relative);
            let original = match preview.get(relative) {
                Some(text) => text.clone(),
                None => {
                    if !self.fs.exists(&path).await {
                        tracing::warn!("Migration: Target not found: {}", relative.display());
                        changes.skipped.push(relative.clone());
                        continue;
                    }
                    self.fs.read_to_string(&path).await.map_err(|e| {
                        EngineError::new(
                            EngineErrorKind::Io,
                            format!("Failed to read {}: {}", relative.display(), e),
                        )
                    })?
                }
            };

            let mut content = original.clone();
            for transformation in &phase.transformations {
                content = apply(transformation, &content).map_err(|e| {
                    EngineError::new(
                        EngineErrorKind::Transformation,
                        format!(
                            "Transformation {} failed on {}: {}",
                            transformation.id,
                            relative.display(),
                            e
                        ),
                    )
                })?;
                if let Some(validator) = &transformation.validator
                    && !validator.check(&content)
                {
                    changes.validation_errors.push(EngineError::new(
                        EngineErrorKind::Validation,
                        format!(
                            "{}: {} ({})",
                            VALIDATION_FAILED,
                            relative.display(),
                            transformation.id
                        ),
                    ));
                }
            }

            if content != original {
                changes.files.push((relative.clone(), content));
            }
        }

        Ok(changes)
    }

    /// Write (or preview) a successful phase's output; returns the file count
    async fn commit(
        &self,
        changes: PhaseChanges,
        preview: &mut HashMap<PathBuf, String>,
        result: &mut MigrationResult,
    ) -> Result<usize, EngineError> {
        for skipped in &changes.skipped {
            MigrationResult::record_file(&mut result.skipped_files, skipped);
        }
        result.errors.extend(changes.validation_errors);

        let count = changes.files.len();
        for (relative, content) in changes.files {
            if self.plan.dry_run {
                MigrationResult::record_file(&mut result.previewed_files, &relative);
                preview.insert(relative, content);
                continue;
            }
            self.fs
                .write(&self.root.join(&relative), &content)
                .await
                .map_err(|e| {
                    EngineError::new(
                        EngineErrorKind::Io,
                        format!("Failed to write {}: {}", relative.display(), e),
                    )
                })?;
            MigrationResult::record_file(&mut result.modified_files, &relative);
        }
        Ok(count)
    }
}
