//! Process adapters.

mod scripted;
mod system;

pub use scripted::{ScriptedCommandRunner, ScriptedHandler};
pub use system::SystemCommandRunner;
