//! Staging the frozen bundle and creating the writable disk image.

use crate::bundler::{
    error::{Context, Result},
    settings::{MacPaths, Settings},
    utils::{
        fs,
        process::{self, ToolOutput},
    },
};
use std::{ffi::OsString, path::PathBuf};
use tokio::process::Command;

/// Moves the frozen bundle into a fresh staging folder.
///
/// A staging folder left over from an earlier run is removed first.
pub async fn stage_bundle(paths: &MacPaths) -> Result<()> {
    fs::remove_dir_all(&paths.staging_dir).await?;
    fs::create_dir_all(&paths.staging_dir, false).await?;
    fs::move_path(&paths.frozen_bundle, &paths.staged_bundle)
        .await
        .with_context(|| format!("staging {}", paths.frozen_bundle.display()))?;
    log::debug!("Staged bundle at {}", paths.staged_bundle.display());
    Ok(())
}

/// Deletes every `*.dmg` in the build directory.
///
/// Unlike trimming this is strict: any failure other than absence aborts.
pub async fn clean_old_images(settings: &Settings) -> Result<Vec<PathBuf>> {
    let stale = fs::glob_in(settings.build_dir(), "*.dmg")?;
    for image in &stale {
        log::debug!("Removing old image {}", image.display());
        fs::remove_file(image).await?;
    }
    Ok(stale)
}

/// `hdiutil create` arguments for the uncompressed read-write image.
pub fn create_args(settings: &Settings, paths: &MacPaths) -> Vec<OsString> {
    let macos = settings.macos();
    vec![
        "create".into(),
        "-srcfolder".into(),
        paths.staging_dir.clone().into_os_string(),
        "-volname".into(),
        paths.volume_name.clone().into(),
        "-fs".into(),
        macos.filesystem.clone().into(),
        "-format".into(),
        "UDRW".into(),
        "-size".into(),
        macos.image_size.clone().into(),
        paths.raw_image.clone().into_os_string(),
    ]
}

/// Creates the raw image from the staging folder.
pub async fn create_raw_image(settings: &Settings, paths: &MacPaths) -> Result<ToolOutput> {
    let mut command = Command::new("hdiutil");
    command
        .args(create_args(settings, paths))
        .current_dir(settings.build_dir());
    process::run_tool(&mut command, settings.tool_failures()).await
}
