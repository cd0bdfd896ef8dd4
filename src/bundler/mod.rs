//! Release packaging for frozen applications.
//!
//! Turns a frozen application tree and a release version into one native
//! distributable: a Windows installer with its zip archive, a macOS disk
//! image, a Debian package or an RPM package.
//!
//! # Modules
//!
//! - [`settings`] - immutable run configuration and derived artifact paths
//! - [`version`] - installer-safe version normalization
//! - [`platform`] - host detection, pipeline selection and the pipelines
//! - [`builder`] - orchestration, checksums, tool detection
//! - [`utils`] - filesystem, archive and external process helpers

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;
pub mod version;

pub use builder::Bundler;
pub use error::{Error, Result};
pub use platform::{HostPlatform, PackageType, Selection};
pub use settings::{
    Arch, DebianPaths, DebianSettings, LinuxSettings, MacOsSettings, MacPaths, PackageSettings,
    RpmPaths, RpmSettings, Settings, SettingsBuilder, TrimSettings, WindowsPaths,
    WindowsSettings,
};
pub use utils::process::ToolFailurePolicy;
pub use version::NormalizedVersion;

use std::path::PathBuf;

/// Result of one packaging pipeline.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Package type produced
    pub package_type: PackageType,
    /// Produced files, the primary package first
    pub paths: Vec<PathBuf>,
    /// Combined size of all files in bytes
    pub size: u64,
    /// SHA-256 of the primary package
    pub checksum: String,
}
