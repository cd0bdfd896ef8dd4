//! Packaging manifest loading from `packaging.toml`.
//!
//! ```toml
//! [package]
//! product_name = "Nagstamon"
//! version = "3.2-20231201beta"
//! entry_script = "nagstamon.py"
//! resources_dir = "Nagstamon/resources"
//!
//! [windows]
//! lock_delay_secs = 5
//!
//! [macos]
//! bundle_identifier = "de.ifw-dresden.nagstamon"
//!
//! [linux.debian]
//! root_wrapper = "fakeroot"
//! ```
//!
//! Every section other than `[package]` is optional.

use crate::bundler::{LinuxSettings, MacOsSettings, PackageSettings, WindowsSettings};
use crate::error::{CliError, PackagerError, Result};
use std::path::Path;

/// File name looked up in the build directory when no manifest is given.
pub const MANIFEST_FILE_NAME: &str = "packaging.toml";

/// Parsed `packaging.toml`.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagingManifest {
    /// `[package]`
    pub package: PackageSettings,

    /// `[windows]`
    #[serde(default)]
    pub windows: WindowsSettings,

    /// `[macos]`
    #[serde(default)]
    pub macos: MacOsSettings,

    /// `[linux.debian]` and `[linux.rpm]`
    #[serde(default)]
    pub linux: LinuxSettings,
}

/// Reads and parses a manifest.
pub fn load_manifest(path: &Path) -> Result<PackagingManifest> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PackagerError::Cli(CliError::ManifestUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })?;

    let manifest: PackagingManifest = toml::from_str(&content)?;
    if manifest.package.product_name.trim().is_empty() {
        return Err(PackagerError::Cli(CliError::InvalidArguments {
            reason: format!("[package].product_name is empty in {}", path.display()),
        }));
    }

    log::debug!(
        "Loaded manifest for {} from {}",
        manifest.package.product_name,
        path.display()
    );
    Ok(manifest)
}
