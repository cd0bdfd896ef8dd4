//! Recursive directory compression.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Writes `source_dir` into a deflated zip archive at `archive_path`.
///
/// Entry names are relative to the parent of `source_dir`, so the archive
/// holds the directory itself (`App-1.0-win64/`) followed by every directory
/// and file below it. The archive is finished and synced to disk before this
/// returns.
///
/// # Returns
///
/// Number of file entries written.
pub async fn zip_dir(source_dir: &Path, archive_path: &Path) -> Result<usize> {
    if !source_dir.is_dir() {
        return Err(Error::GenericError(format!(
            "cannot archive {}: not a directory",
            source_dir.display()
        )));
    }

    let source_dir = source_dir.to_path_buf();
    let archive_path = archive_path.to_path_buf();

    tokio::task::spawn_blocking(move || write_archive(&source_dir, &archive_path))
        .await
        .map_err(|e| Error::GenericError(format!("Archive task panicked: {}", e)))?
}

fn write_archive(source_dir: &Path, archive_path: &Path) -> Result<usize> {
    let base = source_dir.parent().unwrap_or(Path::new(""));
    let file = File::create(archive_path).fs_context("creating archive", archive_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut files = 0;
    for entry in walkdir::WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(entry.path().strip_prefix(base)?);

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else {
            zip.start_file(name, options)?;
            let mut input = File::open(entry.path()).fs_context("opening file", entry.path())?;
            io::copy(&mut input, &mut zip).fs_context("compressing file", entry.path())?;
            files += 1;
        }
    }

    let mut file = zip.finish()?;
    file.flush().fs_context("flushing archive", archive_path)?;
    file.sync_all().fs_context("syncing archive", archive_path)?;

    log::info!(
        "Archived {} files into {}",
        files,
        archive_path.display()
    );
    Ok(files)
}

/// Zip entry names always use `/`, whatever the host separator.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Archive path conventionally paired with a directory: `<dir>.zip`.
pub fn archive_path_for(dir: &Path) -> PathBuf {
    let mut name = dir.as_os_str().to_os_string();
    name.push(".zip");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[tokio::test]
    async fn archive_contains_directory_and_every_file() {
        let temp = tempfile::tempdir().unwrap();
        let staging = temp.path().join("App-1.0-win64");
        std::fs::create_dir_all(staging.join("resources/icons")).unwrap();
        std::fs::write(staging.join("app.exe"), b"MZ").unwrap();
        std::fs::write(staging.join("resources/icons/app.ico"), b"icon").unwrap();

        let archive = archive_path_for(&staging);
        let files = zip_dir(&staging, &archive).await.unwrap();
        assert_eq!(files, 2);

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let names: Vec<String> = zip.file_names().map(String::from).collect();
        assert!(names.contains(&"App-1.0-win64/".to_string()));
        assert!(names.contains(&"App-1.0-win64/resources/icons/".to_string()));
        assert!(names.contains(&"App-1.0-win64/app.exe".to_string()));
        assert!(names.contains(&"App-1.0-win64/resources/icons/app.ico".to_string()));

        let mut icon = String::new();
        zip.by_name("App-1.0-win64/resources/icons/app.ico")
            .unwrap()
            .read_to_string(&mut icon)
            .unwrap();
        assert_eq!(icon, "icon");
    }

    #[tokio::test]
    async fn archiving_a_missing_directory_fails() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing");
        assert!(zip_dir(&missing, &archive_path_for(&missing)).await.is_err());
    }
}
