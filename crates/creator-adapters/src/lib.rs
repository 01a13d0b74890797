//! Infrastructure adapters for project-creator.
//!
//! This crate implements the ports defined in `creator-core::application::ports`
//! and ships the built-in recipes. It contains all process and filesystem I/O.

pub mod filesystem;
pub mod process;
pub mod recipes;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{ScriptedCommandRunner, SystemCommandRunner};
pub use recipes::{RecipeSettings, SUPPORTED_DJANGO, django_recipe};
