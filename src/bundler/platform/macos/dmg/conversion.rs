//! Compression of the writable image into the distributable one.

use crate::bundler::{
    error::Result,
    settings::{MacPaths, Settings},
    utils::{
        fs,
        process::{self, ToolOutput},
    },
};
use std::ffi::OsString;
use tokio::process::Command;

/// `hdiutil convert` arguments producing a zlib-compressed read-only image.
pub fn convert_args(settings: &Settings, paths: &MacPaths) -> Vec<OsString> {
    vec![
        "convert".into(),
        paths.raw_image.clone().into_os_string(),
        "-format".into(),
        "UDZO".into(),
        "-imagekey".into(),
        format!("zlib-level={}", settings.macos().compression_level).into(),
        "-o".into(),
        paths.image.clone().into_os_string(),
    ]
}

/// Converts UDRW to UDZO, then deletes the raw image.
pub async fn compress_image(settings: &Settings, paths: &MacPaths) -> Result<ToolOutput> {
    let mut command = Command::new("hdiutil");
    command
        .args(convert_args(settings, paths))
        .current_dir(settings.build_dir());
    let output = process::run_tool(&mut command, settings.tool_failures()).await?;

    fs::remove_file(&paths.raw_image).await?;
    Ok(output)
}
