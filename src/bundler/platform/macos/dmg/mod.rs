//! macOS disk image creation.
//!
//! The image goes through two `hdiutil` passes: `creation` builds an
//! uncompressed read-write image from a staging folder holding the bundle,
//! `conversion` compresses it into the read-only image that is shipped.

mod conversion;
mod creation;

pub use conversion::{compress_image, convert_args};
pub use creation::{clean_old_images, create_args, create_raw_image, stage_bundle};

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::bundler::{MacPaths, PackageSettings, Settings, SettingsBuilder};

    fn settings(build_dir: &std::path::Path) -> Settings {
        SettingsBuilder::new()
            .build_dir(build_dir)
            .package_settings(PackageSettings {
                product_name: "Nagstamon".into(),
                version: "3.2".into(),
                entry_script: "nagstamon.py".into(),
                resources_dir: "Nagstamon/resources".into(),
                runtime_version: "3".into(),
            })
            .build()
            .unwrap()
    }

    fn strings(args: Vec<std::ffi::OsString>) -> Vec<String> {
        args.into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn hdiutil_arguments_name_images_after_the_version() {
        let settings = settings(std::path::Path::new("/src/nagstamon/build"));
        let paths = MacPaths::new(&settings);

        assert_eq!(
            strings(create_args(&settings, &paths)),
            [
                "create",
                "-srcfolder",
                "/src/nagstamon/build/Nagstamon 3.2 Staging DMG",
                "-volname",
                "Nagstamon 3.2",
                "-fs",
                "HFS+",
                "-format",
                "UDRW",
                "-size",
                "100M",
                "/src/nagstamon/build/Nagstamon 3.2 uncompressed.dmg",
            ]
        );
        assert_eq!(
            strings(convert_args(&settings, &paths)),
            [
                "convert",
                "/src/nagstamon/build/Nagstamon 3.2 uncompressed.dmg",
                "-format",
                "UDZO",
                "-imagekey",
                "zlib-level=9",
                "-o",
                "/src/nagstamon/build/Nagstamon 3.2.dmg",
            ]
        );
    }

    #[tokio::test]
    async fn staging_replaces_previous_folder() {
        let temp = tempfile::tempdir().unwrap();
        let build = temp.path().join("build");
        std::fs::create_dir_all(&build).unwrap();
        let settings = settings(&build);
        let paths = MacPaths::new(&settings);

        std::fs::create_dir_all(paths.frozen_bundle.join("Contents/MacOS")).unwrap();
        std::fs::write(paths.frozen_bundle.join("Contents/MacOS/Nagstamon"), b"bin").unwrap();
        std::fs::create_dir_all(&paths.staging_dir).unwrap();
        std::fs::write(paths.staging_dir.join("leftover"), b"old").unwrap();

        stage_bundle(&paths).await.unwrap();

        assert!(!paths.frozen_bundle.exists());
        assert!(paths.staged_bundle.join("Contents/MacOS/Nagstamon").is_file());
        assert!(!paths.staging_dir.join("leftover").exists());
    }

    #[tokio::test]
    async fn old_images_are_removed() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(temp.path());
        std::fs::write(temp.path().join("Nagstamon 3.1.dmg"), b"old").unwrap();
        std::fs::write(temp.path().join("notes.txt"), b"keep").unwrap();

        let removed = clean_old_images(&settings).await.unwrap();

        assert_eq!(removed, vec![temp.path().join("Nagstamon 3.1.dmg")]);
        assert!(temp.path().join("notes.txt").exists());
        assert!(clean_old_images(&settings).await.unwrap().is_empty());
    }
}
