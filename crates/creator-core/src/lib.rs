//! project-creator core - hexagonal architecture implementation
//!
//! Domain and application layers of the project-creator tool, following
//! a ports-and-adapters layout.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        creator-cli (project-creator)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (CreateService, PatchService)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (CommandRunner, Filesystem, Observer)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    creator-adapters (Infrastructure)    │
//! │ (SystemCommandRunner, LocalFilesystem)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (ProjectLocation, Edit, FilePatch,     │
//! │   ProjectRecipe)                        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use creator_core::prelude::*;
//!
//! let service = CreateService::new(runner, filesystem);
//! let options = CreateOptions::default();
//! let report = service.create(&recipe, "/tmp/proj1", &options)?;
//! assert!(report.patches.applied() > 0);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CreateOptions, CreateReport, CreateService, PatchService, PipelineStep,
        ports::{CommandOutput, CommandRunner, DirEntryKind, Filesystem, PipelineObserver},
    };
    pub use crate::domain::{
        CommandSpec, Edit, EditOutcome, ExistingPolicy, FilePatch, PatchReport, PatchSummary,
        ProjectLocation, ProjectRecipe, RelativePath,
    };
    pub use crate::error::{CreatorError, CreatorResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
