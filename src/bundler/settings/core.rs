//! Core Settings struct and implementations.

use super::{Arch, LinuxSettings, MacOsSettings, PackageSettings, WindowsSettings};
use crate::bundler::utils::process::ToolFailurePolicy;
use std::path::{Path, PathBuf};

/// Main settings for one packaging run.
///
/// Built once by [`SettingsBuilder`](super::SettingsBuilder) from the packaging
/// manifest and command line, then passed by reference to every pipeline
/// step. Nothing mutates it afterwards.
///
/// # Examples
///
/// ```no_run
/// use release_packager::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> release_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .build_dir("/src/nagstamon/build")
///     .package_settings(PackageSettings {
///         product_name: "Nagstamon".into(),
///         version: "3.1-20231201beta".into(),
///         entry_script: "nagstamon.py".into(),
///         resources_dir: "Nagstamon/resources".into(),
///         runtime_version: "3.6".into(),
///     })
///     .build()?;
/// assert_eq!(settings.project_root().to_str(), Some("/src/nagstamon"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata.
    package: PackageSettings,

    /// Raw version, after command line overrides.
    version: String,

    windows: WindowsSettings,
    macos: MacOsSettings,
    linux: LinuxSettings,

    /// Directory holding packaging resources and receiving artifacts.
    build_dir: PathBuf,

    /// Project root, by default one level above `build_dir`.
    project_root: PathBuf,

    /// Target architecture of the frozen build.
    arch: Arch,

    /// What to do when an external tool exits unsuccessfully.
    tool_failures: ToolFailurePolicy,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the raw version string.
    pub fn version_string(&self) -> &str {
        &self.version
    }

    /// Returns the package metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Lowercase product name, used for Linux package and script names.
    pub fn package_stem(&self) -> String {
        self.package.product_name.to_lowercase()
    }

    /// Bundle identifier of the macOS application bundle.
    ///
    /// Falls back to `org.<stem>`, with every character outside
    /// `[a-z0-9-]` replaced by `-`.
    pub fn bundle_identifier(&self) -> String {
        if let Some(identifier) = &self.macos.bundle_identifier {
            return identifier.clone();
        }
        let stem: String = self
            .package_stem()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
            .collect();
        format!("org.{stem}")
    }

    pub fn windows(&self) -> &WindowsSettings {
        &self.windows
    }

    pub fn macos(&self) -> &MacOsSettings {
        &self.macos
    }

    pub fn linux(&self) -> &LinuxSettings {
        &self.linux
    }

    /// Returns the build directory (the invocation directory by default).
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Returns the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Absolute path of the main application script.
    pub fn entry_script(&self) -> PathBuf {
        self.project_root.join(&self.package.entry_script)
    }

    /// Packaging resources directory relative to the project root.
    pub fn resources_dir(&self) -> &Path {
        &self.package.resources_dir
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    pub fn tool_failures(&self) -> ToolFailurePolicy {
        self.tool_failures
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package: PackageSettings,
        version: String,
        windows: WindowsSettings,
        macos: MacOsSettings,
        linux: LinuxSettings,
        build_dir: PathBuf,
        project_root: PathBuf,
        arch: Arch,
        tool_failures: ToolFailurePolicy,
    ) -> Self {
        Self {
            package,
            version,
            windows,
            macos,
            linux,
            build_dir,
            project_root,
            arch,
            tool_failures,
        }
    }
}
