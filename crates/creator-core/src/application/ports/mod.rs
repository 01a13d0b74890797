//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `creator-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `CommandRunner`: external processes (generator, git)
//!   - `Filesystem`: file and directory operations
//!   - `PipelineObserver`: progress notifications (implemented by the CLI)
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, DirEntry, DirEntryKind, Filesystem, NoopObserver,
    PipelineObserver,
};

#[cfg(test)]
pub use output::MockCommandRunner;
