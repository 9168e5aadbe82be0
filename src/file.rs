use anyhow::{Context, Result};
use std::{
    fs::{self, DirBuilder, Permissions},
    io::{ErrorKind, Write},
    os::unix::fs::{DirBuilderExt, PermissionsExt},
    path::Path,
};
use tempfile::NamedTempFile;

pub const DIR_MODE: u32 = 0o710;
pub const FILE_MODE: u32 = 0o640;

/// True if `path` is missing or holds something other than `data`.
pub fn needs_updating(path: &Path, data: &[u8]) -> Result<bool> {
    match fs::read(path) {
        Ok(existing) => Ok(existing != data),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(true),
        Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
    }
}

/// Atomically replaces `path` with `data`, unless it already holds exactly
/// that. Returns whether the file was written.
///
/// Missing parent directories are created with mode `0710`; the file itself
/// gets mode `0640`.
pub fn write_config(path: &Path, data: &[u8]) -> Result<bool> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(dir)
        .with_context(|| format!("creating {}", dir.display()))?;

    if !needs_updating(path, data)? {
        tracing::debug!(path = %path.display(), "up to date");
        return Ok(false);
    }

    let mut outfile = NamedTempFile::new_in(dir)?;
    outfile.write_all(data)?;
    outfile.as_file().sync_all()?;
    fs::set_permissions(outfile.path(), Permissions::from_mode(FILE_MODE))?;
    outfile
        .persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = data.len(), "updated");
    Ok(true)
}
