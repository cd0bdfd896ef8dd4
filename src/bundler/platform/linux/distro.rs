//! Linux distribution identification.

use crate::bundler::{
    error::{ErrorExt, Result},
    platform::PackageType,
};
use std::{io::ErrorKind, path::Path};

/// Distributions with a packaging pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Distribution {
    Debian,
    Ubuntu,
    LinuxMint,
    Fedora,
}

impl Distribution {
    /// Every supported distribution.
    pub const ALL: [Distribution; 4] = [
        Distribution::Debian,
        Distribution::Ubuntu,
        Distribution::LinuxMint,
        Distribution::Fedora,
    ];

    /// Matches an os-release `ID`, ignoring case.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|distribution| distribution.id().eq_ignore_ascii_case(id))
    }

    /// Canonical os-release `ID`.
    pub fn id(self) -> &'static str {
        match self {
            Distribution::Debian => "debian",
            Distribution::Ubuntu => "ubuntu",
            Distribution::LinuxMint => "linuxmint",
            Distribution::Fedora => "fedora",
        }
    }

    /// Pipeline building packages for this distribution.
    pub fn package_type(self) -> PackageType {
        match self {
            Distribution::Debian | Distribution::Ubuntu | Distribution::LinuxMint => {
                PackageType::Deb
            }
            Distribution::Fedora => PackageType::Rpm,
        }
    }
}

/// Extracts the `ID` value from os-release content, without quotes.
pub fn parse_os_release_id(content: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| line.trim().strip_prefix("ID="))
        .map(|value| value.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string())
        .next()
}

/// Reads the distribution identifier from an os-release file.
///
/// A missing file or a file without `ID` yields an empty identifier, which
/// no pipeline matches.
pub async fn read_distribution_id(os_release: &Path) -> Result<String> {
    match tokio::fs::read_to_string(os_release).await {
        Ok(content) => {
            let id = parse_os_release_id(&content).unwrap_or_default();
            log::debug!("Distribution id from {}: {:?}", os_release.display(), id);
            Ok(id)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("{} not found, distribution unknown", os_release.display());
            Ok(String::new())
        }
        Err(e) => Err(e).fs_context("reading os-release", os_release),
    }
}
