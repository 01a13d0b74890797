//! Patch Service - applies recipe patches to files on disk.
//!
//! Used by the create pipeline and, on its own, to re-apply or check the
//! patches of an existing project.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DomainValidator as validator, FilePatch, PatchReport, PatchSummary},
    error::CreatorResult,
};

/// Service for reading, patching and writing project files.
pub struct PatchService<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> PatchService<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Apply one patch to `root/<patch.path>`, writing only if it changed.
    #[instrument(skip_all, fields(patch = patch.name()))]
    pub fn apply_one(&self, root: &Path, patch: &FilePatch) -> CreatorResult<PatchReport> {
        let (path, result) = self.compute(root, patch)?;
        if result.report.changed() {
            self.filesystem.write_file(&path, &result.content)?;
            info!(
                file = %patch.path(),
                applied = result.report.applied(),
                "Patched file"
            );
        } else {
            debug!(file = %patch.path(), "File already patched");
        }
        Ok(result.report)
    }

    /// Apply several patches.
    ///
    /// Every patch is computed before anything is written, so an anchor
    /// failure in a later file leaves earlier files untouched.
    pub fn apply_all(&self, root: &Path, patches: &[FilePatch]) -> CreatorResult<PatchSummary> {
        let mut computed = Vec::with_capacity(patches.len());
        for patch in patches {
            computed.push(self.compute(root, patch)?);
        }

        let mut summary = PatchSummary::default();
        for (path, result) in computed {
            if result.report.changed() {
                self.filesystem.write_file(&path, &result.content)?;
            }
            summary.push(result.report);
        }
        info!(
            applied = summary.applied(),
            already_applied = summary.already_applied(),
            "Patches applied"
        );
        Ok(summary)
    }

    /// Report what applying `patches` would do, without writing.
    pub fn check(&self, root: &Path, patches: &[FilePatch]) -> CreatorResult<PatchSummary> {
        let mut summary = PatchSummary::default();
        for patch in patches {
            let (_, result) = self.compute(root, patch)?;
            summary.push(result.report);
        }
        Ok(summary)
    }

    fn compute(
        &self,
        root: &Path,
        patch: &FilePatch,
    ) -> CreatorResult<(std::path::PathBuf, crate::domain::PatchResult)> {
        validator::validate_patch(patch)?;

        let path = patch.path().under(root);
        if !self.filesystem.exists(&path) {
            return Err(ApplicationError::PatchTargetMissing { path }.into());
        }

        let content = self.filesystem.read_to_string(&path)?;
        let result = patch.apply(&content)?;
        Ok((path, result))
    }
}
