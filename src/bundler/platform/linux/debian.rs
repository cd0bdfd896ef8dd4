//! Debian package pipeline.
//!
//! The package itself is produced by the project's `debian/rules`, run
//! through a root simulation wrapper. This module prepares the project tree
//! for it and collects the `.deb` files it drops into the parent directory.

use crate::bundler::{
    error::Result,
    settings::{DebianPaths, Settings},
    utils::{fs, process},
};
use std::path::PathBuf;
use tokio::process::Command;

const STEPS: usize = 7;

/// Runs the Debian pipeline, returning the collected packages.
pub async fn bundle_project(settings: &Settings) -> Result<Vec<PathBuf>> {
    let paths = DebianPaths::new(settings);
    log::info!(
        "Packaging {} {} as a Debian package",
        settings.product_name(),
        settings.version_string()
    );

    log::info!("[1/{STEPS}] Removing previous build artifacts");
    for stale in [&paths.scripts_dir, &paths.build_cache_dir, &paths.metadata_copy] {
        fs::remove_dir_all(stale).await?;
    }

    log::info!("[2/{STEPS}] Aliasing entry script");
    super::alias_entry_script(&paths.entry_script, &paths.entry_alias).await?;

    log::info!(
        "[3/{STEPS}] Copying {} into {}",
        paths.metadata_source.display(),
        paths.metadata_copy.display()
    );
    fs::copy_dir(&paths.metadata_source, &paths.metadata_copy).await?;

    log::info!("[4/{STEPS}] Marking {} executable", paths.rules.display());
    fs::set_executable(&paths.rules).await?;

    log::info!("[5/{STEPS}] Building");
    run_rules(settings, "build").await?;

    log::info!("[6/{STEPS}] Building binary package");
    run_rules(settings, "binary").await?;

    log::info!(
        "[7/{STEPS}] Collecting {} from {}",
        paths.package_glob,
        paths.package_dir.display()
    );
    collect_packages(&paths).await
}

/// `<wrapper> debian/rules <target>` in the project root.
async fn run_rules(settings: &Settings, target: &str) -> Result<()> {
    let mut command = Command::new(&settings.linux().debian.root_wrapper);
    command
        .arg(PathBuf::from("debian").join("rules"))
        .arg(target)
        .current_dir(settings.project_root());
    process::run_tool(&mut command, settings.tool_failures()).await?;
    Ok(())
}

async fn collect_packages(paths: &DebianPaths) -> Result<Vec<PathBuf>> {
    let mut collected = Vec::new();
    for package in fs::glob_in(&paths.package_dir, &paths.package_glob)? {
        let Some(name) = package.file_name() else {
            continue;
        };
        let target = paths.output_dir.join(name);
        fs::move_path(&package, &target).await?;
        log::info!("Collected {}", target.display());
        collected.push(target);
    }
    Ok(collected)
}
