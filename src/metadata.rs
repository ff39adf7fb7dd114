//! Filesystem metadata propagation.

use std::fs::{self, File, FileTimes, Metadata};
use std::io;
use std::path::Path;

/// Applies the permissions and access/modification times of `source` to
/// `target`.
///
/// Times are written before permissions so a read-only `source` does not stop
/// the target from being updated. Directory times are only set on Unix.
pub fn copy_metadata(source: &Metadata, target: &Path) -> io::Result<()> {
    set_times(source, target)?;
    fs::set_permissions(target, source.permissions())
}

fn set_times(source: &Metadata, target: &Path) -> io::Result<()> {
    let mut times = FileTimes::new().set_modified(source.modified()?);
    if let Ok(accessed) = source.accessed() {
        times = times.set_accessed(accessed);
    }

    #[cfg(not(unix))]
    if source.is_dir() {
        return Ok(());
    }

    #[cfg(unix)]
    let file = File::open(target)?;
    #[cfg(not(unix))]
    let file = File::options().write(true).open(target)?;

    file.set_times(times)
}

/// Makes `path` writable by its owner if `metadata` says it is read-only.
pub fn ensure_writable(path: &Path, metadata: &Metadata) -> io::Result<()> {
    let mut permissions = metadata.permissions();
    if !permissions.readonly() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(permissions.mode() | 0o200);
    }
    #[cfg(not(unix))]
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);

    fs::set_permissions(path, permissions)
}
