//! Deterministic artifact paths derived from [`Settings`].
//!
//! Each pipeline computes its paths once at start. They are only ever
//! created, consumed or deleted on disk, never recomputed mid-run.

use super::Settings;
use crate::bundler::utils::archive::archive_path_for;
use std::path::{Path, PathBuf};

/// Paths used by the Windows installer pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowsPaths {
    /// Raw freeze output, `exe.<freeze-tag>-<runtime>`.
    pub raw_build_dir: PathBuf,
    /// Versioned staging directory, `<App>-<version>-win<arch>`.
    pub staging_dir: PathBuf,
    /// Zip archive of the staging directory.
    pub archive: PathBuf,
    /// Executable launched to hold file locks.
    pub executable: PathBuf,
    /// Resources inside the staging directory, handed to the installer.
    pub staged_resources: PathBuf,
    /// Installer compiler script.
    pub installer_script: PathBuf,
    /// Directory receiving the compiled installer.
    pub installer_output_dir: PathBuf,
    /// File name pattern of compiled installers inside `installer_output_dir`.
    pub installer_glob: String,
}

impl WindowsPaths {
    pub fn new(settings: &Settings) -> Self {
        let build_dir = settings.build_dir();
        let arch = settings.arch();
        let artifact_stem = format!(
            "{}-{}-win{}",
            settings.product_name(),
            settings.version_string(),
            arch.code()
        );

        let raw_build_dir = build_dir.join(format!(
            "exe.{}-{}",
            arch.freeze_tag(),
            settings.package().runtime_version
        ));
        let staging_dir = build_dir.join(&artifact_stem);
        let archive = archive_path_for(&staging_dir);

        let executable_name = settings
            .windows()
            .executable
            .clone()
            .unwrap_or_else(|| format!("{}.exe", settings.package_stem()));

        let installer_script = settings
            .windows()
            .installer_script
            .clone()
            .unwrap_or_else(|| {
                PathBuf::from("windows").join(format!("{}.iss", settings.package_stem()))
            });

        Self {
            executable: staging_dir.join(executable_name),
            staged_resources: staging_dir.join("resources"),
            installer_script: build_dir.join(installer_script),
            installer_output_dir: build_dir.to_path_buf(),
            installer_glob: format!("{artifact_stem}*.exe"),
            raw_build_dir,
            staging_dir,
            archive,
        }
    }
}

/// Paths used by the macOS disk image pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacPaths {
    /// Bundle produced by the bundler, `<root>/dist/<App>.app`.
    pub frozen_bundle: PathBuf,
    /// Staging folder, `<App> <version> Staging DMG`.
    pub staging_dir: PathBuf,
    /// Bundle location inside the staging folder.
    pub staged_bundle: PathBuf,
    /// Writable intermediate image.
    pub raw_image: PathBuf,
    /// Final compressed image.
    pub image: PathBuf,
    /// Volume label, `<App> <version>`.
    pub volume_name: String,
}

impl MacPaths {
    pub fn new(settings: &Settings) -> Self {
        let build_dir = settings.build_dir();
        let bundle_name = format!("{}.app", settings.product_name());
        let volume_name = format!("{} {}", settings.product_name(), settings.version_string());
        let staging_dir = build_dir.join(format!("{volume_name} Staging DMG"));

        Self {
            frozen_bundle: settings.project_root().join("dist").join(&bundle_name),
            staged_bundle: staging_dir.join(&bundle_name),
            staging_dir,
            raw_image: build_dir.join(format!("{volume_name} uncompressed.dmg")),
            image: build_dir.join(format!("{volume_name}.dmg")),
            volume_name,
        }
    }
}

/// Paths used by the Debian package pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebianPaths {
    /// Scripts generated by a previous build, `scripts-<runtime>`.
    pub scripts_dir: PathBuf,
    /// Build cache of the native build system.
    pub build_cache_dir: PathBuf,
    /// Packaging metadata shipped in the build directory.
    pub metadata_source: PathBuf,
    /// Metadata copy inside the project root, consumed by the build system.
    pub metadata_copy: PathBuf,
    /// Control script inside the metadata copy.
    pub rules: PathBuf,
    /// Main application script.
    pub entry_script: PathBuf,
    /// Extension-less alias of the main script.
    pub entry_alias: PathBuf,
    /// Directory the build system writes packages into.
    pub package_dir: PathBuf,
    /// File name pattern of produced packages.
    pub package_glob: String,
    /// Directory receiving collected packages.
    pub output_dir: PathBuf,
}

impl DebianPaths {
    pub fn new(settings: &Settings) -> Self {
        let build_dir = settings.build_dir();
        let root = settings.project_root();
        let debian = &settings.linux().debian;
        let metadata_copy = root.join("debian");
        let entry_script = settings.entry_script();

        Self {
            scripts_dir: build_dir.join(format!(
                "scripts-{}",
                settings.package().runtime_version
            )),
            build_cache_dir: build_dir.join(".pybuild"),
            metadata_source: build_dir.join(&debian.metadata_dir),
            rules: metadata_copy.join("rules"),
            metadata_copy,
            entry_alias: entry_alias(&entry_script),
            entry_script,
            package_dir: root.parent().unwrap_or(root).to_path_buf(),
            package_glob: debian
                .package_glob
                .clone()
                .unwrap_or_else(|| format!("{}*.deb", settings.package_stem())),
            output_dir: build_dir.to_path_buf(),
        }
    }
}

/// Paths used by the RPM package pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpmPaths {
    /// Main application script.
    pub entry_script: PathBuf,
    /// Extension-less alias of the main script.
    pub entry_alias: PathBuf,
    /// Plaintext manual page.
    pub manpage: PathBuf,
    /// Compressed copy written next to it.
    pub manpage_gz: PathBuf,
    /// Directory the build system writes packages into.
    pub dist_dir: PathBuf,
}

impl RpmPaths {
    pub fn new(settings: &Settings) -> Self {
        let root = settings.project_root();
        let entry_script = settings.entry_script();
        let manpage = root.join(settings.linux().rpm.manpage.clone().unwrap_or_else(|| {
            settings
                .resources_dir()
                .join(format!("{}.1", settings.package_stem()))
        }));
        let mut manpage_gz = manpage.clone().into_os_string();
        manpage_gz.push(".gz");

        Self {
            entry_alias: entry_alias(&entry_script),
            entry_script,
            manpage,
            manpage_gz: PathBuf::from(manpage_gz),
            dist_dir: root.join("dist"),
        }
    }
}

/// `nagstamon.py` -> `nagstamon`, in the same directory.
fn entry_alias(entry_script: &Path) -> PathBuf {
    entry_script.with_extension("")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::bundler::{Arch, PackageSettings, SettingsBuilder};

    fn settings(arch: Arch) -> Settings {
        SettingsBuilder::new()
            .build_dir("/src/nagstamon/build")
            .package_settings(PackageSettings {
                product_name: "Nagstamon".into(),
                version: "3.1-20231201beta".into(),
                entry_script: "nagstamon.py".into(),
                resources_dir: "Nagstamon/resources".into(),
                runtime_version: "3.6".into(),
            })
            .arch(arch)
            .build()
            .unwrap()
    }

    #[test]
    fn windows_paths_follow_artifact_naming() {
        let paths = WindowsPaths::new(&settings(Arch::X86_64));
        assert_eq!(
            paths.raw_build_dir,
            Path::new("/src/nagstamon/build/exe.win-amd64-3.6")
        );
        assert_eq!(
            paths.staging_dir,
            Path::new("/src/nagstamon/build/Nagstamon-3.1-20231201beta-win64")
        );
        assert_eq!(
            paths.archive,
            Path::new("/src/nagstamon/build/Nagstamon-3.1-20231201beta-win64.zip")
        );
        assert_eq!(
            paths.executable,
            Path::new("/src/nagstamon/build/Nagstamon-3.1-20231201beta-win64/nagstamon.exe")
        );
        assert_eq!(
            paths.installer_script,
            Path::new("/src/nagstamon/build/windows/nagstamon.iss")
        );

        let paths32 = WindowsPaths::new(&settings(Arch::X86));
        assert_eq!(
            paths32.raw_build_dir,
            Path::new("/src/nagstamon/build/exe.win32-3.6")
        );
    }

    #[test]
    fn mac_paths_use_version_named_images() {
        let paths = MacPaths::new(&settings(Arch::X86_64));
        assert_eq!(paths.volume_name, "Nagstamon 3.1-20231201beta");
        assert_eq!(
            paths.staged_bundle,
            Path::new("/src/nagstamon/build/Nagstamon 3.1-20231201beta Staging DMG/Nagstamon.app")
        );
        assert_eq!(
            paths.raw_image,
            Path::new("/src/nagstamon/build/Nagstamon 3.1-20231201beta uncompressed.dmg")
        );
        assert_eq!(paths.frozen_bundle, Path::new("/src/nagstamon/dist/Nagstamon.app"));
    }

    #[test]
    fn linux_paths_alias_the_entry_script() {
        let settings = settings(Arch::X86_64);
        let deb = DebianPaths::new(&settings);
        assert_eq!(deb.entry_alias, Path::new("/src/nagstamon/nagstamon"));
        assert_eq!(deb.scripts_dir, Path::new("/src/nagstamon/build/scripts-3.6"));
        assert_eq!(deb.package_dir, Path::new("/src"));
        assert_eq!(deb.package_glob, "nagstamon*.deb");

        let rpm = RpmPaths::new(&settings);
        assert_eq!(
            rpm.manpage_gz,
            Path::new("/src/nagstamon/Nagstamon/resources/nagstamon.1.gz")
        );
    }
}
