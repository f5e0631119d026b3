//! In-memory filesystem implementation.

use crate::file_system::normalize_lexically;
use crate::{FileMetadata, FileSystem};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// In-memory filesystem.
///
/// Files live in a flat map keyed by normalized absolute path; directories are
/// implicit. Useful for dry runs and for exercising commands without disk I/O.
///
/// # Thread Safety
///
/// Uses `Arc<RwLock<HashMap>>` for interior mutability. Clones share storage.
#[derive(Clone, Debug)]
pub struct MemoryFileSystem {
    project_root: PathBuf,
    files: Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>,
}

impl MemoryFileSystem {
    /// Create a new in-memory filesystem from pre-loaded files.
    ///
    /// # Parameters
    ///
    /// - `project_root`: Virtual root (e.g., "/project")
    /// - `files`: Map of paths to file contents; relative paths are taken
    ///   relative to the root
    pub fn new(
        project_root: impl AsRef<Path>,
        files: HashMap<PathBuf, Vec<u8>>,
    ) -> io::Result<Self> {
        let fs = Self {
            project_root: normalize_lexically(project_root.as_ref())?,
            files: Arc::new(RwLock::new(HashMap::with_capacity(files.len()))),
        };

        for (path, contents) in files {
            fs.add_file(path, contents)?;
        }

        Ok(fs)
    }

    /// Create an empty in-memory filesystem.
    pub fn empty(project_root: impl AsRef<Path>) -> io::Result<Self> {
        Self::new(project_root, HashMap::new())
    }

    /// Add a file (used during setup).
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> io::Result<()> {
        let normalized = self.validate_path(path.as_ref())?;
        self.files.write().insert(normalized, contents.into());
        Ok(())
    }

    /// Snapshot of a file's contents, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let normalized = self.validate_path(path.as_ref()).ok()?;
        self.files.read().get(&normalized).cloned()
    }

    /// Number of files currently stored.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Whether no files are stored.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    fn validate_path(&self, path: &Path) -> io::Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        };
        let normalized = normalize_lexically(&absolute)?;

        if !normalized.starts_with(&self.project_root) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!(
                    "Path traversal detected: {} is outside {}",
                    normalized.display(),
                    self.project_root.display()
                ),
            ));
        }

        Ok(normalized)
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )
    }
}

#[async_trait::async_trait]
impl FileSystem for MemoryFileSystem {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        let normalized = self.validate_path(path)?;
        Ok(self.files.read().contains_key(&normalized))
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let normalized = self.validate_path(path)?;
        self.files
            .read()
            .get(&normalized)
            .cloned()
            .ok_or_else(|| Self::not_found(&normalized))
    }

    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let normalized = self.validate_path(path)?;
        Ok(match self.files.read().get(&normalized) {
            Some(contents) => FileMetadata {
                exists: true,
                is_file: true,
                is_dir: false,
                is_symlink: false,
                size: contents.len() as u64,
            },
            None => FileMetadata::missing(),
        })
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.write_bytes(path, contents.as_bytes()).await
    }

    async fn write_bytes(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let normalized = self.validate_path(path)?;
        self.files.write().insert(normalized, contents.to_vec());
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        let normalized = self.validate_path(path)?;
        self.files
            .write()
            .remove(&normalized)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(&normalized))
    }

    async fn remove_entry(&self, path: &Path) -> io::Result<()> {
        // No symlinks in memory: every entry is a plain file
        self.remove_file(path).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let from_normalized = self.validate_path(from)?;
        let to_normalized = self.validate_path(to)?;

        let mut files = self.files.write();
        let contents = files
            .remove(&from_normalized)
            .ok_or_else(|| Self::not_found(&from_normalized))?;
        files.insert(to_normalized, contents);
        Ok(())
    }

    async fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        // Flat storage: directories are implicit
        Ok(())
    }

    fn project_root(&self) -> &Path {
        &self.project_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rename_replaces_destination() {
        let fs = MemoryFileSystem::empty("/project").unwrap();
        fs.add_file("a.txt", "new").unwrap();
        fs.add_file("a.txt.bak", "old").unwrap();

        fs.rename(Path::new("a.txt"), Path::new("a.txt.bak"))
            .await
            .unwrap();

        assert!(!fs.exists(Path::new("a.txt")).await.unwrap());
        assert_eq!(fs.get("a.txt.bak").unwrap(), b"new");
        assert_eq!(fs.len(), 1);
    }

    #[tokio::test]
    async fn rejects_paths_outside_root() {
        let fs = MemoryFileSystem::empty("/project").unwrap();
        let err = fs.write(Path::new("/elsewhere/x"), "x").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[tokio::test]
    async fn read_to_string_rejects_invalid_utf8() {
        let fs = MemoryFileSystem::empty("/project").unwrap();
        fs.add_file("bin", vec![0xff, 0xfe]).unwrap();

        let err = fs.read_to_string(Path::new("bin")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(fs.read(Path::new("bin")).await.unwrap(), vec![0xff, 0xfe]);
    }
}
