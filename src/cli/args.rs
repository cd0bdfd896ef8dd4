//! Command line argument parsing.
//!
//! Every argument is optional: a bare invocation from the build directory
//! packages the project one level up using `packaging.toml`.

use crate::bundler::{Arch, Settings, SettingsBuilder, ToolFailurePolicy};
use crate::metadata::{MANIFEST_FILE_NAME, PackagingManifest};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Release packaging orchestrator
#[derive(Parser, Debug)]
#[command(
    name = "release-packager",
    version,
    about = "Packages a frozen application for the host platform",
    long_about = "Packages a frozen application for the host platform.

Exactly one pipeline runs, selected from the host:
  Windows                   zip archive + setup executable
  macOS                     compressed disk image
  Debian, Ubuntu, Mint      .deb
  Fedora                    .rpm

Any other distribution is reported and the packager exits successfully without
touching the filesystem."
)]
pub struct Args {
    /// Directory holding packaging resources; artifacts are written here
    ///
    /// Default: current directory
    #[arg(long, value_name = "DIR", env = "PACKAGER_BUILD_DIR")]
    pub build_dir: Option<PathBuf>,

    /// Project root holding the application sources
    ///
    /// Default: parent of the build directory
    #[arg(long, value_name = "DIR", env = "PACKAGER_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Packaging manifest
    ///
    /// Default: packaging.toml in the build directory
    #[arg(long, value_name = "FILE", env = "PACKAGER_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Release version, overriding [package].version
    #[arg(long, value_name = "VERSION", env = "PACKAGER_RELEASE_VERSION")]
    pub release_version: Option<String>,

    /// Target architecture: 32 or 64
    ///
    /// Default: host pointer width
    #[arg(long, value_name = "BITS", env = "PACKAGER_ARCH", value_parser = parse_arch)]
    pub arch: Option<Arch>,

    /// os-release file identifying the Linux distribution
    #[arg(
        long,
        value_name = "FILE",
        env = "PACKAGER_OS_RELEASE",
        default_value = "/etc/os-release"
    )]
    pub os_release: PathBuf,

    /// Log failing external tools and continue instead of aborting
    #[arg(long, env = "PACKAGER_TOLERATE_TOOL_FAILURES")]
    pub tolerate_tool_failures: bool,
}

fn parse_arch(value: &str) -> Result<Arch, String> {
    let bits: u8 = value
        .trim()
        .parse()
        .map_err(|_| format!("expected 32 or 64, got {value:?}"))?;
    Arch::try_from(bits).map_err(|e| e.to_string())
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build directory, falling back to the current directory.
    pub fn resolved_build_dir(&self) -> std::io::Result<PathBuf> {
        match &self.build_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Manifest path, falling back to `packaging.toml` in `build_dir`.
    pub fn manifest_path(&self, build_dir: &Path) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| build_dir.join(MANIFEST_FILE_NAME))
    }

    pub fn tool_failure_policy(&self) -> ToolFailurePolicy {
        if self.tolerate_tool_failures {
            ToolFailurePolicy::Warn
        } else {
            ToolFailurePolicy::Abort
        }
    }

    /// Combines the manifest with these arguments into run settings.
    pub fn settings(
        &self,
        build_dir: &Path,
        manifest: PackagingManifest,
    ) -> crate::bundler::Result<Settings> {
        let mut builder = SettingsBuilder::new()
            .build_dir(build_dir)
            .package_settings(manifest.package)
            .windows_settings(manifest.windows)
            .macos_settings(manifest.macos)
            .linux_settings(manifest.linux)
            .tool_failures(self.tool_failure_policy());

        if let Some(root) = &self.project_root {
            builder = builder.project_root(root);
        }
        if let Some(version) = &self.release_version {
            builder = builder.version(version.clone());
        }
        if let Some(arch) = self.arch {
            builder = builder.arch(arch);
        }
        builder.build()
    }
}
