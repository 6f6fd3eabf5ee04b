use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Write a complete snapshot to a sibling `.tmp` file and rename it over
/// `path`, so readers only ever see the old or the new contents.
///
/// A symlinked `path` is resolved first so the link survives and its target
/// gets the new contents. The replaced file's permissions carry over.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let target = resolve_target(path)?;
    let tmp_path = tmp_path_for(&target);

    if let Err(e) = write_file(&tmp_path, &target, write) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, &target)?;
    Ok(())
}

fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => Ok(fs::canonicalize(path)?),
        _ => Ok(path.to_path_buf()),
    }
}

fn write_file<F>(path: &Path, target: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let mut file = File::create(path)?;
    write(&mut file)?;
    file.sync_all()?;

    if let Ok(meta) = fs::metadata(target) {
        fs::set_permissions(path, meta.permissions())?;
    }
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("catalog"));
    name.push(".tmp");
    path.with_file_name(name)
}
