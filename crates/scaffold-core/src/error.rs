//! Error types for scaffold commands.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type for scaffold operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a command.
///
/// A declined overwrite is not an error; it surfaces as `false` from
/// [`FileCommand::check`](crate::FileCommand::check).
#[derive(Debug, Error)]
pub enum Error {
    /// No template location resolves for the logical path.
    #[error("{command_type} {path}: there is no template for \"{path}\"")]
    TemplateNotFound {
        /// Logical path of the command.
        path: String,
        /// Kind of command that failed.
        command_type: &'static str,
    },

    /// A filesystem or prompt operation failed.
    #[error("{command_type} {path}: failed to {action}: {source}")]
    Io {
        /// Logical path of the command.
        path: String,
        /// Kind of command that failed.
        command_type: &'static str,
        /// The step that failed.
        action: Action,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Generator configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] scaffold_config::ConfigError),
}

impl Error {
    /// Logical path of the failing command, if the error belongs to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::TemplateNotFound { path, .. } | Self::Io { path, .. } => Some(path),
            Self::Config(_) => None,
        }
    }
}

/// Pipeline step an I/O failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Asking whether the target exists.
    CheckTarget,
    /// Searching the template chain.
    LocateTemplate,
    /// Reading the template file.
    ReadTemplate,
    /// Reading the current target for comparison.
    ReadTarget,
    /// Asking whether a previous backup occupies the slot.
    CheckBackup,
    /// Deleting the previous backup.
    RemoveBackup,
    /// Renaming the target to its backup path.
    MoveToBackup,
    /// Asking the user whether to overwrite.
    Confirm,
    /// Writing output to the target.
    WriteTarget,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CheckTarget => "check target",
            Self::LocateTemplate => "locate template",
            Self::ReadTemplate => "read template",
            Self::ReadTarget => "read target",
            Self::CheckBackup => "check for old backup",
            Self::RemoveBackup => "remove old backup",
            Self::MoveToBackup => "move target to backup",
            Self::Confirm => "confirm overwrite",
            Self::WriteTarget => "write target",
        };
        f.write_str(text)
    }
}

/// The command an error is attributed to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Origin<'a> {
    pub(crate) path: &'a str,
    pub(crate) command_type: &'static str,
}

impl<'a> Origin<'a> {
    pub(crate) fn io(self, action: Action) -> impl FnOnce(io::Error) -> Error + 'a {
        move |source| Error::Io {
            path: self.path.to_string(),
            command_type: self.command_type,
            action,
            source,
        }
    }

    pub(crate) fn template_not_found(self) -> Error {
        Error::TemplateNotFound {
            path: self.path.to_string(),
            command_type: self.command_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_path_type_and_step() {
        let origin = Origin {
            path: "report.md",
            command_type: "file",
        };
        let err = origin.io(Action::MoveToBackup)(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "denied",
        ));

        assert_eq!(
            err.to_string(),
            "file report.md: failed to move target to backup: denied"
        );
        assert_eq!(err.path(), Some("report.md"));
    }

    #[test]
    fn backup_steps_are_distinguished() {
        let origin = Origin {
            path: "report.md",
            command_type: "file",
        };
        let check = origin.io(Action::CheckBackup)(io::Error::other("stat failed"));
        let remove = origin.io(Action::RemoveBackup)(io::Error::other("unlink failed"));

        assert_eq!(
            check.to_string(),
            "file report.md: failed to check for old backup: stat failed"
        );
        assert_eq!(
            remove.to_string(),
            "file report.md: failed to remove old backup: unlink failed"
        );
    }

    #[test]
    fn template_not_found_message() {
        let origin = Origin {
            path: "lib/index.js",
            command_type: "file",
        };
        let err = origin.template_not_found();

        assert!(matches!(err, Error::TemplateNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "file lib/index.js: there is no template for \"lib/index.js\""
        );
    }
}
