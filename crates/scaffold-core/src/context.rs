//! The generator a command runs inside.

use std::io;
use std::path::PathBuf;

/// Path resolution, template lookup and logging for a generation run.
///
/// A command borrows its context for its whole lifetime and never owns it.
/// Implementations must be Send + Sync so commands can run on any tokio worker.
#[async_trait::async_trait]
pub trait GeneratorContext: Send + Sync {
    /// Physical path a logical path is written to. Pure lookup, no I/O.
    fn target_path(&self, path: &str) -> PathBuf;

    /// Whether something already exists at the logical path's target.
    async fn target_exists(&self, path: &str) -> io::Result<bool>;

    /// Location of the template for a logical path, searching any
    /// inheritance/override chain.
    ///
    /// Returns `Ok(None)` when no template provides the path.
    async fn template_path(&self, path: &str) -> io::Result<Option<PathBuf>>;

    /// Format a human-readable message about a command.
    fn format_message(&self, path: &str, command_type: &str, text: &str) -> String;

    /// Record an event about a command. Fire-and-forget.
    fn log(&self, path: &str, command_type: &str, text: &str);
}
