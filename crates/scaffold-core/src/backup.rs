//! Backup of an existing target before it is overwritten.
//!
//! There is exactly one backup slot per target: `<target>.bak`. Each backup
//! deletes whatever occupies the slot and then renames the target into it.
//! The two steps are not atomic together; a crash between them leaves neither
//! the old backup nor the target.
//!
//! The slot is inspected and cleared as a directory entry: a symlink sitting
//! at `<target>.bak` is unlinked, whatever it points at.

use crate::error::{Action, Origin, Result};
use scaffold_fs::FileSystem;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Suffix appended to a target's file name to form its backup path.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Backup path for a target: the full path with [`BACKUP_SUFFIX`] appended.
///
/// ```
/// use scaffold_core::backup_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(backup_path(Path::new("out/app.tar.gz")), PathBuf::from("out/app.tar.gz.bak"));
/// ```
pub fn backup_path(target: &Path) -> PathBuf {
    let mut path = OsString::from(target.as_os_str());
    path.push(BACKUP_SUFFIX);
    PathBuf::from(path)
}

/// Move `target` to its backup path, destroying any previous backup.
pub(crate) async fn move_to_backup(
    fs: &dyn FileSystem,
    target: &Path,
    origin: Origin<'_>,
) -> Result<PathBuf> {
    let backup = backup_path(target);

    let slot = fs
        .metadata(&backup)
        .await
        .map_err(origin.io(Action::CheckBackup))?;

    if slot.exists {
        warn!(
            path = origin.path,
            backup = %backup.display(),
            symlink = slot.is_symlink,
            "discarding previous backup"
        );
        fs.remove_entry(&backup)
            .await
            .map_err(origin.io(Action::RemoveBackup))?;
    }

    fs.rename(target, &backup)
        .await
        .map_err(origin.io(Action::MoveToBackup))?;

    Ok(backup)
}
