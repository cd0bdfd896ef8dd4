//! Pruning of files the freeze tool over-copies.
//!
//! The freeze tool copies every library reachable from the application,
//! most of which the GUI never loads. Trimming runs while the frozen
//! executable is alive, so files it actually uses are locked by the OS and
//! survive; everything else goes. Individual failures are logged and
//! skipped, so a partially trimmed tree is an acceptable outcome.

use crate::bundler::{
    error::Result,
    settings::TrimSettings,
    utils::fs::{self, Removal},
};
use std::path::{Path, PathBuf};

/// What trimming did to the frozen tree.
#[derive(Debug, Default)]
pub struct TrimReport {
    /// Entries deleted
    pub removed: Vec<PathBuf>,
    /// Entries left in place (locked, or not of the expected kind)
    pub kept: Vec<PathBuf>,
}

impl TrimReport {
    fn record(&mut self, path: PathBuf, removal: Removal) {
        match removal {
            Removal::Removed => self.removed.push(path),
            Removal::Kept(_) => self.kept.push(path),
            Removal::Absent => {}
        }
    }
}

/// Applies the trim rules below `root`.
pub async fn trim_frozen_tree(root: &Path, rules: &TrimSettings) -> Result<TrimReport> {
    let mut report = TrimReport::default();

    for dir in &rules.dirs {
        let path = root.join(dir);
        let removal = fs::remove_dir_best_effort(&path).await?;
        report.record(path, removal);
    }

    for pattern in &rules.files {
        for path in fs::glob_in(root, pattern)? {
            let removal = fs::remove_file_best_effort(&path).await?;
            report.record(path, removal);
        }
    }

    for pattern in &rules.entries {
        for path in fs::glob_in(root, pattern)? {
            let removal = fs::remove_path_best_effort(&path).await?;
            report.record(path, removal);
        }
    }

    log::info!(
        "Trimmed {} entries from {} ({} kept)",
        report.removed.len(),
        root.display(),
        report.kept.len()
    );
    Ok(report)
}
