//! Command line interface for the release packager.

mod args;

pub use args::Args;

use crate::bundler::{Bundler, HostPlatform, Selection};
use crate::error::Result;
use crate::metadata;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    run_with(Args::parse_args()).await
}

/// Runs the packager with already parsed arguments.
///
/// The host is identified before anything else is read, so an unsupported
/// distribution never needs a manifest and leaves the filesystem untouched.
pub async fn run_with(args: Args) -> Result<i32> {
    let host = HostPlatform::detect(&args.os_release).await?;
    log::debug!("Host platform: {:?}", host);

    let package_type = match host.select() {
        Selection::Pipeline(package_type) => package_type,
        Selection::Unsupported { distribution_id } => {
            println!("{}", unsupported_message(&distribution_id));
            return Ok(0);
        }
    };

    let build_dir = args.resolved_build_dir()?;
    let manifest = metadata::load_manifest(&args.manifest_path(&build_dir))?;
    let settings = args.settings(&build_dir, manifest)?;
    log::info!(
        "Building {} for {} {} ({}-bit)",
        package_type,
        settings.product_name(),
        settings.version_string(),
        settings.arch()
    );

    let bundler = Bundler::new(settings);
    for artifact in bundler.bundle_types(&[package_type]).await? {
        println!(
            "{} ({} bytes, sha256 {})",
            artifact.package_type, artifact.size, artifact.checksum
        );
        for path in &artifact.paths {
            println!("  {}", path.display());
        }
    }

    Ok(0)
}

fn unsupported_message(distribution_id: &str) -> String {
    let shown = if distribution_id.is_empty() {
        "unknown"
    } else {
        distribution_id
    };
    format!("Your system ({shown}) is not supported for automated build yet")
}
