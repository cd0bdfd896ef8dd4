//! Package metadata and configuration.

use std::path::PathBuf;

/// Package metadata shared by every pipeline.
///
/// Maps the `[package]` section of `packaging.toml`.
///
/// # Examples
///
/// ```toml
/// [package]
/// product_name = "Nagstamon"
/// version = "3.1-20231201beta"
/// entry_script = "nagstamon.py"
/// resources_dir = "Nagstamon/resources"
/// runtime_version = "3.6"
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PackageSettings {
    /// Product name used in artifact names, volume labels and bundle names.
    pub product_name: String,

    /// Raw version string, possibly carrying prerelease tokens.
    ///
    /// Can be left out when supplied through `--release-version`.
    ///
    /// Default: empty
    #[serde(default)]
    pub version: String,

    /// Main application script, relative to the project root.
    pub entry_script: PathBuf,

    /// Packaging resources (icons, manual page), relative to the project root.
    ///
    /// Default: `resources`
    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,

    /// Version of the interpreter runtime the freeze tool targets.
    ///
    /// Appears in the freeze tool's raw build directory and in the
    /// generated-scripts directory of the Debian build.
    ///
    /// Default: `3`
    #[serde(default = "default_runtime_version")]
    pub runtime_version: String,
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from("resources")
}

fn default_runtime_version() -> String {
    "3".to_string()
}
