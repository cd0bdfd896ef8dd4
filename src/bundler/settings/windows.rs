//! Windows platform-specific settings.

use std::{path::PathBuf, time::Duration};

/// Windows installer pipeline configuration.
///
/// # Configuration
///
/// ```toml
/// [windows]
/// freeze_command = ["python", "setup.py", "build_exe"]
/// executable = "nagstamon.exe"
/// installer_script = "windows/nagstamon.iss"
/// lock_delay_secs = 5
/// ```
///
/// # See Also
///
/// - [`TrimSettings`] - files removed from the frozen tree
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct WindowsSettings {
    /// Freeze tool invocation, run from the project root.
    ///
    /// Default: `["python", "setup.py", "build_exe"]`
    pub freeze_command: Vec<String>,

    /// Executable inside the frozen tree launched to hold file locks.
    ///
    /// Default: None (lowercase product name + `.exe`)
    pub executable: Option<String>,

    /// Installer compiler script, relative to the build directory.
    ///
    /// Default: None (`windows/` + lowercase product name + `.iss`)
    pub installer_script: Option<PathBuf>,

    /// Explicit path to the installer compiler.
    ///
    /// Default: None (looked up under `PROGRAMFILES`)
    pub compiler: Option<PathBuf>,

    /// Installation directory of the compiler below `PROGRAMFILES`.
    ///
    /// Default: `Inno Setup 5`
    pub compiler_dir: String,

    /// Compiler executable name.
    ///
    /// Default: `iscc.exe`
    pub compiler_exe: String,

    /// Seconds to wait after launching the executable before trimming.
    ///
    /// Default: 5
    pub lock_delay_secs: u64,

    /// Trimming rules for the frozen tree.
    pub trim: TrimSettings,
}

impl Default for WindowsSettings {
    fn default() -> Self {
        Self {
            freeze_command: vec!["python".into(), "setup.py".into(), "build_exe".into()],
            executable: None,
            installer_script: None,
            compiler: None,
            compiler_dir: "Inno Setup 5".into(),
            compiler_exe: "iscc.exe".into(),
            lock_delay_secs: 5,
            trim: TrimSettings::default(),
        }
    }
}

impl WindowsSettings {
    /// Delay between launching the lock holder and trimming.
    pub fn lock_delay(&self) -> Duration {
        Duration::from_secs(self.lock_delay_secs)
    }
}

/// Files and directories the freeze tool over-copies into the frozen tree.
///
/// All entries are relative to the frozen tree root; `files` and `entries`
/// are glob patterns.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct TrimSettings {
    /// Directories removed recursively.
    pub dirs: Vec<String>,

    /// Loose files removed one by one.
    pub files: Vec<String>,

    /// Entries removed whether they are files or directories.
    pub entries: Vec<String>,
}

impl Default for TrimSettings {
    fn default() -> Self {
        Self {
            dirs: [
                "imageformats",
                "mediaservice",
                "platforms",
                "PyQt5/uic",
                "PyQt5/Qt/qml",
                "PyQt5/Qt/resources",
                "PyQt5/Qt/translations",
            ]
            .map(String::from)
            .to_vec(),
            files: ["PyQt5/*.pyd", "PyQt5/Qt/bin/*"].map(String::from).to_vec(),
            entries: vec!["PyQt5/Qt/plugins/*".to_string()],
        }
    }
}
