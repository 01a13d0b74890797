//! Create Service - main application orchestrator.
//!
//! Runs the whole pipeline for one project, strictly forward:
//! 1. Validate the target location (before any external process)
//! 2. Create the project root
//! 3. Run the generator
//! 4. Clone the template into a temporary sub-directory and merge it
//! 5. Activate the env file
//! 6. Apply the recipe patches
//! 7. Remove temporary artifacts
//!
//! Any failure after step 1 rolls back the project root unless
//! [`CreateOptions::keep_on_failure`] is set.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, PatchService,
        ports::{CommandRunner, DirEntryKind, Filesystem, NoopObserver, PipelineObserver},
    },
    domain::{
        DomainValidator as validator, ExistingPolicy, LocationState, PatchSummary,
        ProjectLocation, ProjectRecipe, RootOwnership,
    },
    error::CreatorResult,
};

/// Entry of the template clone that is never merged into the project.
const VCS_METADATA: &str = ".git";

/// Prefix of the temporary clone directory inside the project root.
pub const CLONE_DIR_PREFIX: &str = ".clone-";

/// One step of the pipeline, as reported to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStep {
    Validate,
    CreateRoot,
    Generate,
    FetchTemplate,
    SetupEnvFile,
    Patch(String),
    Cleanup,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validate => f.write_str("Validating location"),
            Self::CreateRoot => f.write_str("Creating project directory"),
            Self::Generate => f.write_str("Running project generator"),
            Self::FetchTemplate => f.write_str("Fetching template repository"),
            Self::SetupEnvFile => f.write_str("Activating env file"),
            Self::Patch(name) => write!(f, "Patching {name}"),
            Self::Cleanup => f.write_str("Removing temporary files"),
        }
    }
}

/// Knobs for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub existing: ExistingPolicy,
    /// Leave the partial project on failure instead of rolling back.
    pub keep_on_failure: bool,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReport {
    pub location: PathBuf,
    /// Top-level template entries merged into the project.
    pub merged_entries: usize,
    /// `false` when an active env file already existed and was kept.
    pub env_file_activated: bool,
    pub patches: PatchSummary,
}

/// What a run would do, for `--dry-run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePlan {
    pub location: PathBuf,
    pub reuse_existing_directory: bool,
    pub commands: Vec<String>,
    pub env_file: (String, String),
    pub patches: Vec<PlannedPatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPatch {
    pub name: String,
    pub path: String,
    pub edits: Vec<String>,
}

/// Main pipeline service.
pub struct CreateService {
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
    observer: Box<dyn PipelineObserver>,
}

impl CreateService {
    /// Create a new service with the given adapters.
    pub fn new(runner: Box<dyn CommandRunner>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            runner,
            filesystem,
            observer: Box::new(NoopObserver),
        }
    }

    /// Report progress to `observer`.
    pub fn with_observer(mut self, observer: Box<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Validate and describe a run without executing anything.
    pub fn plan(
        &self,
        recipe: &ProjectRecipe,
        location: impl AsRef<Path>,
        options: &CreateOptions,
    ) -> CreatorResult<CreatePlan> {
        let location = location.as_ref();
        validator::validate_recipe(recipe)?;
        let project = self.validate_location(location, options.existing)?;

        let temp = location.join(format!("{CLONE_DIR_PREFIX}<id>"));
        Ok(CreatePlan {
            location: location.to_path_buf(),
            reuse_existing_directory: project.ownership() == RootOwnership::Reused,
            commands: vec![
                recipe.generator.command(location).to_string(),
                recipe.template.clone_command(&temp).to_string(),
            ],
            env_file: (
                recipe.env_file.example.to_string(),
                recipe.env_file.active.to_string(),
            ),
            patches: recipe
                .patches
                .iter()
                .map(|p| PlannedPatch {
                    name: p.name().to_string(),
                    path: p.path().to_string(),
                    edits: p.edits().iter().map(|e| e.describe()).collect(),
                })
                .collect(),
        })
    }

    /// Create a project at `location`.
    #[instrument(
        skip_all,
        fields(recipe = %recipe.name, location = %location.as_ref().display())
    )]
    pub fn create(
        &self,
        recipe: &ProjectRecipe,
        location: impl AsRef<Path>,
        options: &CreateOptions,
    ) -> CreatorResult<CreateReport> {
        let location = location.as_ref();

        // 1. Validate - nothing external runs before this passes
        self.observer.step_started(&PipelineStep::Validate);
        validator::validate_recipe(recipe)?;
        let project = self.validate_location(location, options.existing)?;
        self.observer.step_finished(&PipelineStep::Validate);
        info!(policy = %options.existing, "Location validated");

        match self.run_steps(recipe, &project) {
            Ok(report) => {
                info!("Project created successfully");
                Ok(report)
            }
            Err(e) => {
                if options.keep_on_failure {
                    warn!(error = %e, path = %project, "Step failed, leaving partial project");
                } else {
                    warn!(error = %e, "Step failed, attempting rollback");
                    self.rollback(&project);
                }
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Pipeline steps
    // -------------------------------------------------------------------------

    fn run_steps(
        &self,
        recipe: &ProjectRecipe,
        project: &ProjectLocation,
    ) -> CreatorResult<CreateReport> {
        let root = project.path();

        // 2. Root
        if project.needs_creation() {
            self.step(PipelineStep::CreateRoot, || self.filesystem.create_dir_all(root))?;
        }

        // 3. Generator
        self.step(PipelineStep::Generate, || {
            self.runner.run(&recipe.generator.command(root)).map(|_| ())
        })?;

        // 4. Template
        let merged_entries = self.step(PipelineStep::FetchTemplate, || {
            self.fetch_template(recipe, root)
        })?;

        // 5. Env file
        let env_file_activated =
            self.step(PipelineStep::SetupEnvFile, || self.setup_env_file(recipe, root))?;

        // 6. Patches
        let patcher = PatchService::new(self.filesystem.as_ref());
        let mut patches = PatchSummary::default();
        for patch in &recipe.patches {
            let step = PipelineStep::Patch(patch.name().to_string());
            patches.push(self.step(step, || patcher.apply_one(root, patch))?);
        }

        Ok(CreateReport {
            location: root.to_path_buf(),
            merged_entries,
            env_file_activated,
            patches,
        })
    }

    /// Clone into `<root>/.clone-<uuid>`, merge, remove the clone.
    fn fetch_template(&self, recipe: &ProjectRecipe, root: &Path) -> CreatorResult<usize> {
        let temp = root.join(format!("{CLONE_DIR_PREFIX}{}", Uuid::new_v4().simple()));
        debug!(temp = %temp.display(), "Cloning template");

        let result = self
            .runner
            .run(&recipe.template.clone_command(&temp))
            .and_then(|_| self.merge_dir(&temp, root, true));

        self.observer.step_started(&PipelineStep::Cleanup);
        self.remove_temp(&temp);
        self.observer.step_finished(&PipelineStep::Cleanup);

        result
    }

    /// Move every entry of `from` into `into`.
    ///
    /// Entries are enumerated explicitly so dotfiles are included. Existing
    /// directories are merged recursively; anything else at the destination
    /// is replaced by the template's entry.
    fn merge_dir(&self, from: &Path, into: &Path, top_level: bool) -> CreatorResult<usize> {
        let mut moved = 0;
        for entry in self.filesystem.list_dir(from)? {
            if top_level && entry.name == VCS_METADATA {
                continue;
            }

            let dest = into.join(&entry.name);
            if self.filesystem.exists(&dest) {
                let dest_is_dir = self.filesystem.is_dir(&dest);
                if entry.kind == DirEntryKind::Directory && dest_is_dir {
                    self.merge_dir(&entry.path, &dest, false)?;
                    moved += 1;
                    continue;
                }
                debug!(path = %dest.display(), "Template entry replaces generated entry");
                if dest_is_dir {
                    self.filesystem.remove_dir_all(&dest)?;
                } else {
                    self.filesystem.remove_file(&dest)?;
                }
            }

            self.filesystem.rename(&entry.path, &dest)?;
            moved += 1;
        }
        Ok(moved)
    }

    fn remove_temp(&self, temp: &Path) {
        if !self.filesystem.exists(temp) {
            return;
        }
        if let Err(e) = self.filesystem.remove_dir_all(temp) {
            warn!(error = %e, path = %temp.display(), "Failed to remove temporary clone");
        }
    }

    /// Rename the example env file; returns `false` if an active one exists.
    fn setup_env_file(&self, recipe: &ProjectRecipe, root: &Path) -> CreatorResult<bool> {
        let example = recipe.env_file.example.under(root);
        let active = recipe.env_file.active.under(root);

        if self.filesystem.exists(&active) {
            self.observer
                .step_skipped(&PipelineStep::SetupEnvFile, "active env file already exists");
            info!(path = %active.display(), "Keeping existing env file");
            return Ok(false);
        }
        if !self.filesystem.exists(&example) {
            return Err(ApplicationError::MissingEnvExample { path: example }.into());
        }

        self.filesystem.rename(&example, &active)?;
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn validate_location(
        &self,
        location: &Path,
        policy: ExistingPolicy,
    ) -> CreatorResult<ProjectLocation> {
        let state = self.observe(location)?;
        debug!(?state, "Observed location");
        Ok(ProjectLocation::check(location, state, policy)?)
    }

    fn observe(&self, path: &Path) -> CreatorResult<LocationState> {
        if !self.filesystem.exists(path) {
            return Ok(LocationState::Absent);
        }
        if !self.filesystem.is_dir(path) {
            return Ok(LocationState::NotADirectory);
        }
        if self.filesystem.list_dir(path)?.is_empty() {
            Ok(LocationState::EmptyDirectory)
        } else {
            Ok(LocationState::NonEmptyDirectory)
        }
    }

    fn step<T>(
        &self,
        step: PipelineStep,
        f: impl FnOnce() -> CreatorResult<T>,
    ) -> CreatorResult<T> {
        self.observer.step_started(&step);
        info!(step = %step, "Step started");
        let value = f()?;
        self.observer.step_finished(&step);
        Ok(value)
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, project: &ProjectLocation) {
        let root = project.path();
        let result = match project.ownership() {
            RootOwnership::Created => {
                if self.filesystem.exists(root) {
                    self.filesystem.remove_dir_all(root)
                } else {
                    Ok(())
                }
            }
            RootOwnership::Reused => self.empty_dir(root),
        };

        match result {
            Ok(()) => info!(path = %root.display(), "Rollback successful"),
            Err(e) => {
                let err = ApplicationError::RollbackFailed {
                    path: root.to_path_buf(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "Rollback failed");
            }
        }
    }

    fn empty_dir(&self, dir: &Path) -> CreatorResult<()> {
        for entry in self.filesystem.list_dir(dir)? {
            match entry.kind {
                DirEntryKind::Directory => self.filesystem.remove_dir_all(&entry.path)?,
                DirEntryKind::File => self.filesystem.remove_file(&entry.path)?,
            }
        }
        Ok(())
    }
}
