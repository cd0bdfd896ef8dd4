//! Builder for constructing Settings.

use super::{Arch, LinuxSettings, MacOsSettings, PackageSettings, Settings, WindowsSettings};
use crate::bundler::{
    error::{Context, ErrorExt},
    utils::process::ToolFailurePolicy,
};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Only the package settings are required. Everything else falls back to
/// the invocation environment: the current directory as build directory,
/// its parent as project root and the host pointer width as architecture.
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    package_settings: Option<PackageSettings>,
    windows: WindowsSettings,
    macos: MacOsSettings,
    linux: LinuxSettings,
    build_dir: Option<PathBuf>,
    project_root: Option<PathBuf>,
    version: Option<String>,
    arch: Option<Arch>,
    tool_failures: ToolFailurePolicy,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets package metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    pub fn windows_settings(mut self, settings: WindowsSettings) -> Self {
        self.windows = settings;
        self
    }

    pub fn macos_settings(mut self, settings: MacOsSettings) -> Self {
        self.macos = settings;
        self
    }

    pub fn linux_settings(mut self, settings: LinuxSettings) -> Self {
        self.linux = settings;
        self
    }

    /// Sets the build directory.
    ///
    /// Default: current working directory
    pub fn build_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the project root.
    ///
    /// Default: parent of the build directory
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the version from the package settings.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the target architecture.
    ///
    /// Default: [`Arch::host`]
    pub fn arch(mut self, arch: Arch) -> Self {
        self.arch = Some(arch);
        self
    }

    /// Sets the external tool failure policy.
    ///
    /// Default: [`ToolFailurePolicy::Abort`]
    pub fn tool_failures(mut self, policy: ToolFailurePolicy) -> Self {
        self.tool_failures = policy;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the package settings are missing, if no version
    /// is known, or if the current directory cannot be resolved.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let package = self
            .package_settings
            .context("package_settings is required")?;

        let version = self
            .version
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| package.version.clone());
        if version.trim().is_empty() {
            crate::bail!(
                "no release version: set [package].version in the manifest or pass --release-version"
            );
        }

        let build_dir = match self.build_dir {
            Some(dir) => dir,
            None => std::env::current_dir().fs_context("resolving current directory", ".")?,
        };
        let build_dir = std::path::absolute(&build_dir)
            .fs_context("resolving build directory", &build_dir)?;

        let project_root = match self.project_root {
            Some(root) => std::path::absolute(&root).fs_context("resolving project root", &root)?,
            None => build_dir
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| build_dir.clone()),
        };

        Ok(Settings::new(
            package,
            version.trim().to_string(),
            self.windows,
            self.macos,
            self.linux,
            build_dir,
            project_root,
            self.arch.unwrap_or_else(Arch::host),
            self.tool_failures,
        ))
    }
}
