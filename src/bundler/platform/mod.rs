//! Host detection and pipeline selection.
//!
//! Exactly one pipeline runs per invocation. [`HostPlatform::detect`] looks at
//! the operating system and, on anything that is neither Windows nor macOS,
//! at the distribution identifier from os-release. [`HostPlatform::select`]
//! then maps the host onto a [`PackageType`] through exhaustive matching, or
//! reports the distribution as unsupported.

pub mod linux;
pub mod macos;
pub mod windows;

use crate::bundler::error::Result;
use linux::distro::{self, Distribution};
use std::{fmt, path::Path};

/// Package types the packager can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PackageType {
    /// Windows setup executable plus zip archive
    WindowsInstaller,
    /// macOS compressed disk image
    Dmg,
    /// Debian package
    Deb,
    /// RPM package
    Rpm,
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PackageType::WindowsInstaller => "windows-installer",
            PackageType::Dmg => "dmg",
            PackageType::Deb => "deb",
            PackageType::Rpm => "rpm",
        })
    }
}

/// The host the packager runs on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostPlatform {
    Windows,
    MacOs,
    /// Any other system, identified by its os-release `ID`.
    ///
    /// Empty when the system has no os-release file.
    Unix { distribution_id: String },
}

/// Outcome of pipeline selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Run the pipeline producing this package type.
    Pipeline(PackageType),
    /// No pipeline exists for this distribution.
    Unsupported { distribution_id: String },
}

impl HostPlatform {
    /// Detects the running host.
    ///
    /// `os_release` is only read on hosts that are neither Windows nor macOS.
    pub async fn detect(os_release: &Path) -> Result<Self> {
        Ok(match std::env::consts::OS {
            "windows" => HostPlatform::Windows,
            "macos" => HostPlatform::MacOs,
            _ => HostPlatform::Unix {
                distribution_id: distro::read_distribution_id(os_release).await?,
            },
        })
    }

    /// Selects the single pipeline for this host.
    pub fn select(&self) -> Selection {
        match self {
            HostPlatform::Windows => Selection::Pipeline(PackageType::WindowsInstaller),
            HostPlatform::MacOs => Selection::Pipeline(PackageType::Dmg),
            HostPlatform::Unix { distribution_id } => match Distribution::from_id(distribution_id) {
                Some(distribution) => Selection::Pipeline(distribution.package_type()),
                None => Selection::Unsupported {
                    distribution_id: distribution_id.clone(),
                },
            },
        }
    }
}
