//! FileSystem trait for the I/O a scaffold command performs.

use std::io;
use std::path::{Path, PathBuf};

/// File metadata compatible across implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Whether the path exists.
    pub exists: bool,
    /// Whether the path is a file (false if directory or doesn't exist).
    pub is_file: bool,
    /// Whether the path is a directory.
    pub is_dir: bool,
    /// Whether the path is a symbolic link.
    pub is_symlink: bool,
    /// File size in bytes (0 for directories or non-existent files).
    pub size: u64,
}

impl FileMetadata {
    /// Metadata for a path that does not exist.
    pub fn missing() -> Self {
        Self {
            exists: false,
            is_file: false,
            is_dir: false,
            is_symlink: false,
            size: 0,
        }
    }
}

/// Async filesystem abstraction.
///
/// Every operation is a suspension point: callers await each step before
/// starting the next, so a single command never has two operations in flight.
///
/// # Error Handling
///
/// Uses `std::io::Result<T>` throughout:
/// - Native: Direct mapping from std::fs errors
/// - Memory: Construct io::Error with the matching ErrorKind
#[async_trait::async_trait]
pub trait FileSystem: Send + Sync {
    /// Check if a path exists.
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Read file contents as a string.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::NotFound` if file doesn't exist.
    /// Returns `io::ErrorKind::InvalidData` if file is not valid UTF-8.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Read file contents as bytes.
    ///
    /// Use this for exact comparisons where UTF-8 validation must not fail.
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Get file/directory metadata.
    ///
    /// Returns metadata even if the file doesn't exist (exists=false).
    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Write string contents to a file, truncating or creating it.
    ///
    /// Parent directories are NOT created automatically.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Write bytes to a file.
    async fn write_bytes(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Remove a file.
    ///
    /// Only removes files, never directories.
    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a file or symlink entry without following links.
    ///
    /// A symlink is unlinked itself, wherever it points. Directories are
    /// refused.
    async fn remove_entry(&self, path: &Path) -> io::Result<()>;

    /// Rename a file, replacing `to` where the platform allows it.
    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Create a directory and all parent directories.
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Get the root this filesystem is scoped to.
    ///
    /// All operations are validated against this root.
    fn project_root(&self) -> &Path;
}

/// Normalize a path syntactically, without touching disk.
///
/// `.` components are dropped and `..` pops the previous component. A `..`
/// that would climb above the first component is rejected.
pub(crate) fn normalize_lexically(path: &Path) -> io::Result<PathBuf> {
    let mut components = Vec::new();
    let mut root = PathBuf::new();

    for component in path.components() {
        match component {
            std::path::Component::Prefix(_) | std::path::Component::RootDir => {
                root.push(component.as_os_str());
                components.clear();
            }
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                if components.pop().is_none() {
                    return Err(io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        format!("Path escapes its root using ..: {}", path.display()),
                    ));
                }
            }
            std::path::Component::Normal(name) => components.push(name),
        }
    }

    let mut result = root;
    for component in components {
        result.push(component);
    }
    Ok(result)
}
