//! macOS disk image pipeline.
//!
//! 1. Check the bundler is installed and freeze a windowed one-file bundle
//! 2. Move the bundle into a fresh version-named staging folder
//! 3. Delete old disk images
//! 4. Create the uncompressed image
//! 5. Compress it and remove the uncompressed image

pub mod dmg;
pub mod freeze;

use crate::bundler::{
    error::Result,
    settings::{MacPaths, Settings},
};
use std::path::PathBuf;

const STEPS: usize = 5;

/// Runs the macOS pipeline, returning the compressed image.
pub async fn bundle_project(settings: &Settings) -> Result<Vec<PathBuf>> {
    let paths = MacPaths::new(settings);
    log::info!(
        "Packaging {} {} as a disk image",
        settings.product_name(),
        settings.version_string()
    );

    log::info!("[1/{STEPS}] Freezing application bundle");
    freeze::freeze_bundle(settings).await?;

    log::info!("[2/{STEPS}] Staging {}", paths.staging_dir.display());
    dmg::stage_bundle(&paths).await?;

    log::info!("[3/{STEPS}] Removing old disk images");
    let removed = dmg::clean_old_images(settings).await?;
    log::debug!("Removed {} old images", removed.len());

    log::info!("[4/{STEPS}] Creating {}", paths.raw_image.display());
    dmg::create_raw_image(settings, &paths).await?;

    log::info!("[5/{STEPS}] Compressing into {}", paths.image.display());
    dmg::compress_image(settings, &paths).await?;

    Ok(vec![paths.image])
}
