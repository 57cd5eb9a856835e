//! Idempotent filesystem operations.
//!
//! Removal of something already absent and creation of something already
//! present both succeed, so steps can be re-run on a dirty tree.

use crate::error::{ErrorExt, PackagerError, Result};
use path_absolutize::Absolutize;
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Resolve `path` against the current directory and fold `.` and `..`
/// without touching the filesystem.
///
/// Commands run with the project as their working directory, so every path
/// handed to them must already be absolute.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    path.absolutize()
        .map(|p| p.into_owned())
        .fs_context("resolving absolute path", path)
}

/// Fail if erasing `dir` would also erase `root`.
///
/// Both paths must come from [`absolute`]. `dir` may live anywhere except at
/// `root` or one of its ancestors.
pub fn ensure_not_enclosing(dir: &Path, root: &Path) -> Result<()> {
    if root.starts_with(dir) {
        return Err(PackagerError::UnsafeOutputDir {
            path: dir.to_path_buf(),
            root: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Copies a regular file, creating the destination's parent directories.
///
/// Fails if the source is missing or not a file. Returns the bytes copied.
pub async fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    let metadata = fs::metadata(from)
        .await
        .fs_context("reading source metadata", from)?;
    if !metadata.is_file() {
        return Err(PackagerError::Fs {
            context: "copying file".to_string(),
            path: from.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "source is not a file"),
        });
    }

    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }

    fs::copy(from, to).await.fs_context("copying file", to)
}
