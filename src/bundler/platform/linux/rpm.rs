//! RPM package pipeline.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::{RpmPaths, Settings},
    utils::{fs, process},
};
use flate2::{Compression, write::GzEncoder};
use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

const STEPS: usize = 3;

/// Runs the RPM pipeline, returning the packages left in `dist/`.
pub async fn bundle_project(settings: &Settings) -> Result<Vec<PathBuf>> {
    let paths = RpmPaths::new(settings);
    log::info!(
        "Packaging {} {} as an RPM package",
        settings.product_name(),
        settings.version_string()
    );

    log::info!("[1/{STEPS}] Aliasing entry script");
    super::alias_entry_script(&paths.entry_script, &paths.entry_alias).await?;

    // bdist_rpm does not compress the manual page itself.
    log::info!("[2/{STEPS}] Compressing {}", paths.manpage.display());
    gzip_file(&paths.manpage, &paths.manpage_gz).await?;

    log::info!("[3/{STEPS}] Building");
    let mut command = process::command_from_argv(&settings.linux().rpm.build_command)?;
    command.current_dir(settings.project_root());
    process::run_tool(&mut command, settings.tool_failures()).await?;

    let packages = fs::glob_in(&paths.dist_dir, "*.rpm")?;
    for package in &packages {
        log::info!("Built {}", package.display());
    }
    Ok(packages)
}

/// Writes a gzip-compressed copy of `source` to `target`.
///
/// The copy is finished and synced before this returns.
pub async fn gzip_file(source: &Path, target: &Path) -> Result<()> {
    let source = source.to_path_buf();
    let target = target.to_path_buf();
    tokio::task::spawn_blocking(move || write_gzip(&source, &target))
        .await
        .map_err(|e| Error::GenericError(format!("Compression task panicked: {}", e)))?
}

fn write_gzip(source: &Path, target: &Path) -> Result<()> {
    let input = File::open(source).fs_context("opening manual page", source)?;
    let output = File::create(target).fs_context("creating compressed manual page", target)?;

    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut BufReader::new(input), &mut encoder)
        .fs_context("compressing manual page", target)?;
    let output = encoder
        .finish()
        .fs_context("finishing compressed manual page", target)?;
    output
        .sync_all()
        .fs_context("syncing compressed manual page", target)?;
    Ok(())
}
