//! File system utilities for packaging.
//!
//! Two removal flavours live here. [`remove_dir_all`] and [`remove_file`]
//! only forgive a missing target. The `*_best_effort` functions additionally
//! tolerate the failures a locked or half-deleted tree produces, log them and
//! report the target as [`Removal::Kept`]; any other error still propagates.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use tokio::fs;

/// Outcome of a best-effort removal.
#[derive(Debug)]
pub enum Removal {
    /// The target was deleted.
    Removed,
    /// There was nothing to delete.
    Absent,
    /// Deletion failed with a tolerated error and the target was left in place.
    Kept(io::Error),
}

impl Removal {
    pub fn is_kept(&self) -> bool {
        matches!(self, Removal::Kept(_))
    }
}

/// Errors a best-effort removal swallows.
///
/// These are what deleting a tree that is partially in use produces: files
/// locked by a running process, directories that could not be emptied, or a
/// target of the other kind than expected.
pub fn is_tolerated(err: &io::Error) -> bool {
    // ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
    #[cfg(windows)]
    {
        if matches!(err.raw_os_error(), Some(32) | Some(33)) {
            return true;
        }
    }

    matches!(
        err.kind(),
        ErrorKind::NotFound
            | ErrorKind::PermissionDenied
            | ErrorKind::ResourceBusy
            | ErrorKind::DirectoryNotEmpty
            | ErrorKind::NotADirectory
            | ErrorKind::IsADirectory
    )
}

/// Removes `path` whether it is a directory tree or a single file.
///
/// Tries a recursive directory removal first and falls back to a single-file
/// removal. Absence counts as success.
pub async fn remove_path_best_effort(path: &Path) -> Result<Removal> {
    match fs::remove_dir_all(path).await {
        Ok(()) => {
            log::debug!("Removed directory {}", path.display());
            Ok(Removal::Removed)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Removal::Absent),
        Err(dir_err) => {
            log::debug!(
                "{} is not removable as a directory ({}), trying as a file",
                path.display(),
                dir_err
            );
            remove_file_best_effort(path).await
        }
    }
}

/// Removes a directory tree, tolerating locked or missing entries.
pub async fn remove_dir_best_effort(path: &Path) -> Result<Removal> {
    settle(path, fs::remove_dir_all(path).await, "removing directory")
}

/// Removes a single file, tolerating locked or missing files.
pub async fn remove_file_best_effort(path: &Path) -> Result<Removal> {
    settle(path, fs::remove_file(path).await, "removing file")
}

fn settle(path: &Path, result: io::Result<()>, context: &'static str) -> Result<Removal> {
    match result {
        Ok(()) => Ok(Removal::Removed),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Removal::Absent),
        Err(e) if is_tolerated(&e) => {
            log::warn!("Kept {}: {}", path.display(), e);
            Ok(Removal::Kept(e))
        }
        Err(e) => Err(e).fs_context(context, path),
    }
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes the file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(Error::GenericError(format!(
            "{} does not exist or is not a file",
            from.display()
        )));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them.
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "{} does not exist or is not a directory",
            from.display()
        )));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).fs_context("creating destination directory", parent)?;
        }

        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())
                    .fs_context("reading symlink", entry.path())?;
                symlink(&target, &dest_path, entry.path().is_dir())
                    .fs_context("creating symlink", &dest_path)?;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file", entry.path())?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Moves a file or directory, copying and deleting when a rename is not
/// possible (e.g. across filesystems).
pub async fn move_path(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            log::debug!(
                "Rename {} -> {} crosses devices, copying instead",
                from.display(),
                to.display()
            );
            if from.is_dir() {
                copy_dir(from, to).await?;
                fs::remove_dir_all(from)
                    .await
                    .fs_context("removing moved directory", from)
            } else {
                copy_file(from, to).await?;
                fs::remove_file(from)
                    .await
                    .fs_context("removing moved file", from)
            }
        }
        Err(e) => Err(e).fs_context("moving", from),
    }
}

/// Lists entries of `dir` matching the glob `pattern` (relative to `dir`).
///
/// Unreadable entries are logged and skipped.
pub fn glob_in(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        pattern
    );

    let mut matches = Vec::new();
    for entry in glob::glob(&full)? {
        match entry {
            Ok(path) => matches.push(path),
            Err(e) => log::warn!("Skipping {}: {}", e.path().display(), e.error()),
        }
    }
    Ok(matches)
}

/// Marks a file executable (0755). No-op on platforms without mode bits.
pub async fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .await
            .fs_context("setting permissions", path)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path, _is_dir: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path, is_dir: bool) -> io::Result<()> {
    if is_dir {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
