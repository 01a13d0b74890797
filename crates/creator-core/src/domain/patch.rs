//! File patches: ordered edits against one generated file.

use serde::Serialize;

use super::{DomainError, Edit, EditOutcome, RelativePath};

/// An ordered list of [`Edit`]s applied to one file of the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    name: String,
    path: RelativePath,
    edits: Vec<Edit>,
}

impl FilePatch {
    pub fn new(name: impl Into<String>, path: RelativePath) -> Self {
        Self {
            name: name.into(),
            path,
            edits: Vec::new(),
        }
    }

    pub fn with_edit(mut self, edit: Edit) -> Self {
        self.edits.push(edit);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Run every edit against `content`.
    ///
    /// All-or-nothing: the first failing edit aborts the patch and the
    /// caller's file is never half-edited, since nothing is written until
    /// the whole buffer has been produced.
    pub fn apply(&self, content: &str) -> Result<PatchResult, DomainError> {
        let file = self.path.to_string();
        let mut buffer = content.to_owned();
        let mut edits = Vec::with_capacity(self.edits.len());

        for edit in &self.edits {
            let outcome = edit.apply_to(&file, &mut buffer)?;
            edits.push(EditReport {
                description: edit.describe(),
                outcome,
            });
        }

        Ok(PatchResult {
            content: buffer,
            report: PatchReport {
                name: self.name.clone(),
                path: self.path.clone(),
                edits,
            },
        })
    }
}

/// Patched buffer plus what happened to produce it.
#[derive(Debug, Clone)]
pub struct PatchResult {
    pub content: String,
    pub report: PatchReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditReport {
    pub description: String,
    pub outcome: EditOutcome,
}

/// Per-file outcome of a patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub name: String,
    pub path: RelativePath,
    pub edits: Vec<EditReport>,
}

impl PatchReport {
    pub fn applied(&self) -> usize {
        self.edits.iter().filter(|e| e.outcome.changed()).count()
    }

    pub fn already_applied(&self) -> usize {
        self.edits.len() - self.applied()
    }

    /// `true` if at least one edit changed the file.
    pub fn changed(&self) -> bool {
        self.applied() > 0
    }
}

/// Outcome of a whole patch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchSummary {
    pub files: Vec<PatchReport>,
}

impl PatchSummary {
    pub fn push(&mut self, report: PatchReport) {
        self.files.push(report);
    }

    pub fn applied(&self) -> usize {
        self.files.iter().map(PatchReport::applied).sum()
    }

    pub fn already_applied(&self) -> usize {
        self.files.iter().map(PatchReport::already_applied).sum()
    }

    pub fn changed(&self) -> bool {
        self.files.iter().any(PatchReport::changed)
    }
}
