//! Linux platform-specific settings.

use std::path::PathBuf;

/// Linux packaging configuration (`[linux]`).
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LinuxSettings {
    /// Debian package settings.
    pub debian: DebianSettings,
    /// RPM package settings.
    pub rpm: RpmSettings,
}

/// Debian package (.deb) configuration.
///
/// The package itself is described by the control/rules files in
/// `metadata_dir`; this only tells the packager where they are and how to
/// drive them.
///
/// ```toml
/// [linux.debian]
/// metadata_dir = "debian"
/// root_wrapper = "fakeroot"
/// ```
///
/// # See Also
///
/// - [`RpmSettings`] - RPM package configuration
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct DebianSettings {
    /// Packaging metadata directory, relative to the build directory.
    ///
    /// Default: `debian`
    pub metadata_dir: PathBuf,

    /// Wrapper simulating root privileges around `debian/rules`.
    ///
    /// Default: `fakeroot`
    pub root_wrapper: String,

    /// File name pattern of produced packages in the project root's parent.
    ///
    /// Default: None (lowercase product name + `*.deb`)
    pub package_glob: Option<String>,
}

impl Default for DebianSettings {
    fn default() -> Self {
        Self {
            metadata_dir: PathBuf::from("debian"),
            root_wrapper: "fakeroot".into(),
            package_glob: None,
        }
    }
}

/// RPM package (.rpm) configuration.
///
/// ```toml
/// [linux.rpm]
/// build_command = ["python3", "setup.py", "bdist_rpm"]
/// manpage = "Nagstamon/resources/nagstamon.1"
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct RpmSettings {
    /// RPM build invocation, run from the project root.
    ///
    /// Default: `["python3", "setup.py", "bdist_rpm"]`
    pub build_command: Vec<String>,

    /// Plaintext manual page, relative to the project root.
    ///
    /// Default: None (`<resources_dir>/<lowercase product name>.1`)
    pub manpage: Option<PathBuf>,
}

impl Default for RpmSettings {
    fn default() -> Self {
        Self {
            build_command: vec!["python3".into(), "setup.py".into(), "bdist_rpm".into()],
            manpage: None,
        }
    }
}
