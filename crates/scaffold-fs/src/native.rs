//! Native filesystem implementation using std::fs + tokio.

use crate::file_system::normalize_lexically;
use crate::{FileMetadata, FileSystem};
use std::io;
use std::path::{Path, PathBuf};
use tokio::task;

/// Native filesystem implementation using std::fs + tokio.
///
/// Blocking std::fs calls run on tokio's blocking pool via
/// `spawn_blocking`, so awaiting them never stalls the runtime.
#[derive(Debug, Clone)]
pub struct NativeFileSystem {
    /// Canonical root; every path is checked against it.
    project_root: PathBuf,
}

impl NativeFileSystem {
    /// Create a new native filesystem scoped to a root directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither the root nor its parent can be canonicalized.
    pub fn new(project_root: impl AsRef<Path>) -> io::Result<Self> {
        let root = project_root.as_ref();
        let project_root = match root.canonicalize() {
            Ok(canonical) => canonical,
            Err(_) => {
                // Root may not exist yet: canonicalize the parent and rejoin the name
                let name = root.file_name().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidInput, "Invalid project root path")
                })?;
                let parent = root.parent().ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("Project root does not exist: {}", root.display()),
                    )
                })?;
                let parent = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
                parent.canonicalize()?.join(name)
            }
        };

        Ok(Self { project_root })
    }

    /// Validate that a path is within the project root.
    ///
    /// Relative paths are joined onto the root. Paths that don't exist yet
    /// (a fresh target, a backup about to be created) are resolved through
    /// their parent directory.
    fn validate_path(&self, path: &Path) -> io::Result<PathBuf> {
        let absolute = self.absolute(path);

        let resolved = match absolute.canonicalize() {
            Ok(canonical) => canonical,
            Err(_) => match (absolute.parent(), absolute.file_name()) {
                (Some(parent), Some(name)) => match parent.canonicalize() {
                    Ok(canonical_parent) => canonical_parent.join(name),
                    Err(_) => normalize_lexically(&absolute)?,
                },
                _ => normalize_lexically(&absolute)?,
            },
        };

        if !resolved.starts_with(&self.project_root) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!(
                    "Path traversal detected: {} is outside project root {}",
                    resolved.display(),
                    self.project_root.display()
                ),
            ));
        }

        Ok(resolved)
    }

    /// Validate a directory entry without following it if it is a symlink.
    ///
    /// Only the parent directory is resolved; the last component is kept as
    /// given, so a link is checked by where it lives, not where it points.
    fn validate_entry(&self, path: &Path) -> io::Result<PathBuf> {
        let absolute = self.absolute(path);

        let resolved = match (absolute.parent(), absolute.file_name()) {
            (Some(parent), Some(name)) => match parent.canonicalize() {
                Ok(canonical_parent) => canonical_parent.join(name),
                Err(_) => normalize_lexically(&absolute)?,
            },
            _ => normalize_lexically(&absolute)?,
        };

        if !resolved.starts_with(&self.project_root) || resolved == self.project_root {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!(
                    "Path traversal detected: {} is outside project root {}",
                    resolved.display(),
                    self.project_root.display()
                ),
            ));
        }

        Ok(resolved)
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

/// Run a blocking std::fs call on the blocking pool.
async fn blocking<T, F>(f: F) -> io::Result<T>
where
    F: FnOnce() -> io::Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f).await.map_err(io::Error::other)?
}

#[async_trait::async_trait]
impl FileSystem for NativeFileSystem {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        let validated = self.validate_path(path)?;
        blocking(move || validated.try_exists()).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let validated = self.validate_path(path)?;
        blocking(move || std::fs::read_to_string(&validated)).await
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let validated = self.validate_path(path)?;
        blocking(move || std::fs::read(&validated)).await
    }

    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        // Stat the entry itself so a symlink reports as a symlink
        let entry = self.validate_entry(path)?;

        blocking(move || match std::fs::symlink_metadata(&entry) {
            Ok(meta) => Ok(FileMetadata {
                exists: true,
                is_file: meta.is_file(),
                is_dir: meta.is_dir(),
                is_symlink: meta.file_type().is_symlink(),
                size: meta.len(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileMetadata::missing()),
            Err(e) => Err(e),
        })
        .await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.write_bytes(path, contents.as_bytes()).await
    }

    async fn write_bytes(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let validated = self.validate_path(path)?;
        let contents = contents.to_vec();
        blocking(move || std::fs::write(&validated, contents)).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        let meta = self.metadata(path).await?;
        if meta.is_symlink {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Refusing to remove symlink",
            ));
        }

        let entry = self.validate_entry(path)?;
        blocking(move || std::fs::remove_file(&entry)).await
    }

    async fn remove_entry(&self, path: &Path) -> io::Result<()> {
        let entry = self.validate_entry(path)?;
        blocking(move || {
            if std::fs::symlink_metadata(&entry)?.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Refusing to remove directory: {}", entry.display()),
                ));
            }
            // Unlinks a symlink itself, never its target
            std::fs::remove_file(&entry)
        })
        .await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        // Move the entries themselves, not whatever a symlink points at
        let from = self.validate_entry(from)?;
        let to = self.validate_entry(to)?;
        blocking(move || std::fs::rename(&from, &to)).await
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let validated = self.validate_path(path)?;
        blocking(move || std::fs::create_dir_all(&validated)).await
    }

    fn project_root(&self) -> &Path {
        &self.project_root
    }
}
