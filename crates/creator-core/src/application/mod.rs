//! Application layer for project-creator.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (CreateService, PatchService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! patching rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CreateOptions, CreatePlan, CreateReport, CreateService, PatchService, PipelineStep,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem, PipelineObserver};

pub use error::ApplicationError;
