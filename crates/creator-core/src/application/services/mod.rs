//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create a project" or "patch a project".

pub mod create_service;
pub mod patch_service;

pub use create_service::{CreateOptions, CreatePlan, CreateReport, CreateService, PipelineStep};
pub use patch_service::PatchService;
