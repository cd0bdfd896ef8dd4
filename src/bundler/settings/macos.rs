//! macOS platform-specific settings.

use std::path::PathBuf;

/// macOS disk image pipeline configuration.
///
/// # Configuration
///
/// ```toml
/// [macos]
/// bundle_identifier = "de.ifw-dresden.nagstamon"
/// icon = "Nagstamon/resources/nagstamon.icns"
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct MacOsSettings {
    /// Bundler executable looked up on PATH.
    ///
    /// Default: `pyinstaller`
    pub bundler: String,

    /// Bundle identifier (CFBundleIdentifier).
    ///
    /// Default: None (`org.` + lowercase product name, see
    /// [`Settings::bundle_identifier`](super::Settings::bundle_identifier))
    pub bundle_identifier: Option<String>,

    /// Bundle icon, relative to the project root.
    ///
    /// Default: None
    pub icon: Option<PathBuf>,

    /// Size of the uncompressed image.
    ///
    /// Default: `100M`
    pub image_size: String,

    /// Filesystem of the uncompressed image.
    ///
    /// Default: `HFS+`
    pub filesystem: String,

    /// zlib level used when compressing the image.
    ///
    /// Default: 9
    pub compression_level: u8,
}

impl Default for MacOsSettings {
    fn default() -> Self {
        Self {
            bundler: "pyinstaller".into(),
            bundle_identifier: None,
            icon: None,
            image_size: "100M".into(),
            filesystem: "HFS+".into(),
            compression_level: 9,
        }
    }
}
