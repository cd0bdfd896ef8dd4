//! One-file windowed application bundle via the bundler tool.

use crate::bundler::{
    builder::tool_detection,
    error::Result,
    settings::Settings,
    utils::process::{self, ToolOutput},
};
use std::{ffi::OsString, path::Path};
use tokio::process::Command;

/// Arguments for the bundler, relative to the project root.
pub fn bundler_args(settings: &Settings) -> Vec<OsString> {
    let macos = settings.macos();
    let resources = settings.resources_dir();
    let icon = macos
        .icon
        .clone()
        .unwrap_or_else(|| resources.join(format!("{}.icns", settings.package_stem())));

    let mut args: Vec<OsString> = vec!["--noconfirm".into()];
    args.push(pair("--add-data=", resources, resources));
    args.push(prefixed("--icon=", &icon));
    args.push(format!("--name={}", settings.product_name()).into());
    args.push(format!("--osx-bundle-identifier={}", settings.bundle_identifier()).into());
    args.push("--windowed".into());
    args.push("--onefile".into());
    args.push(settings.package().entry_script.clone().into_os_string());
    args
}

fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path);
    arg
}

/// `--add-data=<src>:<dest>`
fn pair(flag: &str, source: &Path, dest: &Path) -> OsString {
    let mut arg = prefixed(flag, source);
    arg.push(":");
    arg.push(dest);
    arg
}

/// Checks the bundler is installed, then freezes the application.
pub async fn freeze_bundle(settings: &Settings) -> Result<ToolOutput> {
    let tool = &settings.macos().bundler;
    let executable = tool_detection::require_tool(
        tool,
        &format!("Install it with \"pip install {tool}\"."),
    )?;

    let mut command = Command::new(executable);
    command
        .args(bundler_args(settings))
        .current_dir(settings.project_root());
    process::run_tool(&mut command, settings.tool_failures()).await
}
