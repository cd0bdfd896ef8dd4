//! Windows installer pipeline.
//!
//! Steps, strictly in order:
//!
//! 1. Remove the previous raw build, staging directory and archive (best effort)
//! 2. Freeze the application into `exe.<tag>-<runtime>`
//! 3. Rename the raw build to the versioned staging directory
//! 4. Launch the frozen executable so the files it loads are locked
//! 5. Trim the toolkit files the executable does not hold
//! 6. Zip the staging directory
//! 7. Compile the installer
//!
//! The zip archive and every compiled installer are returned.

pub mod inno;
pub mod lock;
pub mod trim;

use crate::bundler::{
    error::{Context, Result},
    settings::{Settings, WindowsPaths},
    utils::{archive, fs, process},
    version::NormalizedVersion,
};
use std::path::PathBuf;

const STEPS: usize = 7;

/// Runs the Windows pipeline.
pub async fn bundle_project(settings: &Settings) -> Result<Vec<PathBuf>> {
    let paths = WindowsPaths::new(settings);
    let version = NormalizedVersion::parse(settings.version_string())?;
    log::info!(
        "Packaging {} {} (installer version {}) for win{}",
        settings.product_name(),
        settings.version_string(),
        version,
        settings.arch().code()
    );

    log::info!("[1/{STEPS}] Removing previous build output");
    for stale in [&paths.raw_build_dir, &paths.staging_dir, &paths.archive] {
        fs::remove_path_best_effort(stale).await?;
    }

    log::info!("[2/{STEPS}] Freezing application");
    let mut freeze = process::command_from_argv(&settings.windows().freeze_command)?;
    freeze.current_dir(settings.project_root());
    process::run_tool(&mut freeze, settings.tool_failures()).await?;

    log::info!(
        "[3/{STEPS}] Staging {} as {}",
        paths.raw_build_dir.display(),
        paths.staging_dir.display()
    );
    fs::move_path(&paths.raw_build_dir, &paths.staging_dir)
        .await
        .context("frozen build is missing")?;

    log::info!("[4/{STEPS}] Launching {}", paths.executable.display());
    let holder =
        lock::launch_lock_holder(&paths.executable, settings.windows().lock_delay()).await?;

    log::info!("[5/{STEPS}] Trimming unused toolkit files");
    let report = trim::trim_frozen_tree(&paths.staging_dir, &settings.windows().trim).await?;
    for kept in &report.kept {
        log::debug!("In use, kept: {}", kept.display());
    }
    log::debug!("Lock holder pid {:?} left running", holder.id());

    log::info!("[6/{STEPS}] Archiving {}", paths.staging_dir.display());
    archive::zip_dir(&paths.staging_dir, &paths.archive).await?;

    log::info!("[7/{STEPS}] Compiling installer");
    inno::compile_installer(settings, &paths, &version).await?;

    let mut artifacts = vec![paths.archive.clone()];
    artifacts.extend(fs::glob_in(&paths.installer_output_dir, &paths.installer_glob)?);
    Ok(artifacts)
}
