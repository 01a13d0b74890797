//! Core domain layer for project-creator.
//!
//! Pure logic with no I/O: location rules, anchored edits, file patches,
//! command descriptions and recipes. Filesystem and process access go
//! through the ports in `crate::application::ports`.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or process calls
//! - **Data-only recipes**: a recipe describes a run, services execute it

pub mod command;
pub mod common;
pub mod edit;
pub mod error;
pub mod location;
pub mod patch;
pub mod recipe;

mod validation;

pub use command::CommandSpec;
pub use common::RelativePath;
pub use edit::{Edit, EditOutcome};
pub use error::{DomainError, ErrorCategory};
pub use location::{ExistingPolicy, LocationState, ProjectLocation, RootOwnership};
pub use patch::{EditReport, FilePatch, PatchReport, PatchResult, PatchSummary};
pub use recipe::{EnvFileSpec, GeneratorSpec, ProjectRecipe, TemplateRepository};
pub use validation::DomainValidator;
