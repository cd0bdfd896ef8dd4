//! Windows pipeline run end to end with stand-in freeze tool, executable
//! and installer compiler.
#![cfg(unix)]

use release_packager::bundler::{
    Arch, Error, PackageSettings, Settings, SettingsBuilder, ToolFailurePolicy, WindowsSettings,
    platform::windows,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::tempdir;

/// Mimics the freeze tool: needs `setup.py` in its working directory and
/// writes `build/exe.win-amd64-3` below it. Also drops the lock holder
/// and an installer compiler that records its arguments.
const FREEZE: &str = r#"test -f setup.py || exit 3
pwd > freeze.cwd
out=build/exe.win-amd64-3
mkdir -p $out/platforms $out/PyQt5/Qt/plugins/styles $out/resources $out/lib
touch $out/platforms/qwindows.dll $out/PyQt5/QtCore.pyd $out/PyQt5/Qt/plugins/styles/qstyle.dll
touch $out/resources/app.ico $out/lib/core.dll
cat > $out/app.exe <<'EOF'
#!/bin/sh
touch held
exec sleep 3
EOF
chmod +x $out/app.exe
cat > build/iscc <<'EOF'
#!/bin/sh
printf '%s\n' "$@" > iscc.log
touch App-1.0-rc1-win64-setup.exe
EOF
chmod +x build/iscc
"#;

/// Same tree, but the frozen executable exits at once.
const FREEZE_SHORT_LIVED: &str = r#"out=build/exe.win-amd64-3
mkdir -p $out/platforms
touch $out/platforms/qwindows.dll
printf '#!/bin/sh\nexit 0\n' > $out/app.exe
chmod +x $out/app.exe
"#;

/// Lays out `<tmp>/app` (project root) with `<root>/build` as build dir.
fn project(tmp: &Path) -> (PathBuf, PathBuf) {
    let root = tmp.join("app");
    let build = root.join("build");
    fs::create_dir_all(&build).unwrap();
    fs::write(root.join("setup.py"), "# freeze configuration\n").unwrap();
    fs::write(root.join("app.py"), "print('app')\n").unwrap();
    (root, build)
}

fn settings(build: &Path, freeze: &str) -> Settings {
    let windows = WindowsSettings {
        freeze_command: vec!["sh".into(), "-c".into(), freeze.into()],
        compiler: Some(build.join("iscc")),
        lock_delay_secs: 1,
        ..Default::default()
    };
    SettingsBuilder::new()
        .build_dir(build)
        .package_settings(PackageSettings {
            product_name: "App".into(),
            version: "1.0-rc1".into(),
            entry_script: "app.py".into(),
            resources_dir: "resources".into(),
            runtime_version: "3".into(),
        })
        .windows_settings(windows)
        .arch(Arch::X86_64)
        .tool_failures(ToolFailurePolicy::Abort)
        .build()
        .unwrap()
}

fn zip_entries(archive: &Path) -> Vec<String> {
    let file = fs::File::open(archive).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}

#[tokio::test]
async fn pipeline_freezes_stages_trims_archives_and_compiles() {
    let tmp = tempdir().unwrap();
    let (root, build) = project(tmp.path());
    let staging = build.join("App-1.0-rc1-win64");
    fs::create_dir_all(&staging).unwrap();
    fs::write(staging.join("stale.txt"), "previous run").unwrap();

    let artifacts = windows::bundle_project(&settings(&build, FREEZE))
        .await
        .unwrap();

    // freeze ran from the project root
    assert_eq!(
        fs::read_to_string(root.join("freeze.cwd")).unwrap().trim(),
        fs::canonicalize(&root).unwrap().to_str().unwrap()
    );

    // raw build renamed into the staging directory
    assert!(!build.join("exe.win-amd64-3").exists());
    assert!(staging.join("app.exe").is_file());
    assert!(!staging.join("stale.txt").exists());

    // trimmed after the holder started
    assert!(staging.join("held").is_file());
    assert!(!staging.join("platforms").exists());
    assert!(!staging.join("PyQt5/QtCore.pyd").exists());
    assert!(!staging.join("PyQt5/Qt/plugins/styles").exists());
    assert!(staging.join("lib/core.dll").is_file());

    let archive = build.join("App-1.0-rc1-win64.zip");
    assert_eq!(
        zip_entries(&archive),
        [
            "App-1.0-rc1-win64/",
            "App-1.0-rc1-win64/PyQt5/",
            "App-1.0-rc1-win64/PyQt5/Qt/",
            "App-1.0-rc1-win64/PyQt5/Qt/plugins/",
            "App-1.0-rc1-win64/app.exe",
            "App-1.0-rc1-win64/held",
            "App-1.0-rc1-win64/lib/",
            "App-1.0-rc1-win64/lib/core.dll",
            "App-1.0-rc1-win64/resources/",
            "App-1.0-rc1-win64/resources/app.ico",
        ]
    );

    let compiler_args = fs::read_to_string(build.join("iscc.log")).unwrap();
    let compiler_args: Vec<&str> = compiler_args.lines().collect();
    assert_eq!(
        compiler_args,
        [
            format!("/Dsource={}", staging.display()),
            "/Dversion_is=1.0.1".to_string(),
            "/Dversion=1.0-rc1".to_string(),
            "/Darch=64".to_string(),
            "/Darchs_allowed=x64".to_string(),
            format!("/Dresources={}", staging.join("resources").display()),
            format!("/O{}", build.display()),
            build.join("windows").join("app.iss").display().to_string(),
        ]
    );

    assert_eq!(
        artifacts,
        vec![archive, build.join("App-1.0-rc1-win64-setup.exe")]
    );
}

#[tokio::test]
async fn exited_holder_aborts_before_trimming() {
    let tmp = tempdir().unwrap();
    let (_root, build) = project(tmp.path());

    let err = windows::bundle_project(&settings(&build, FREEZE_SHORT_LIVED))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::LockHolderExited { .. }), "{err}");
    let staging = build.join("App-1.0-rc1-win64");
    assert!(staging.join("platforms/qwindows.dll").is_file());
    assert!(!build.join("App-1.0-rc1-win64.zip").exists());
}
