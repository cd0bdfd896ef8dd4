//! Main bundler orchestration.

use crate::{
    bail,
    bundler::{
        BundledArtifact, PackageType, Result, Settings, error::ErrorExt, platform,
        utils::process::ToolFailurePolicy,
    },
};

use super::checksum::calculate_sha256;

/// Runs packaging pipelines against one immutable [`Settings`].
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs the pipeline for each package type, in order.
    ///
    /// A pipeline that produces no files is an error, unless tool failures
    /// are tolerated, in which case it is logged and skipped.
    pub async fn bundle_types(&self, types: &[PackageType]) -> Result<Vec<BundledArtifact>> {
        let mut artifacts = Vec::new();

        for package_type in types {
            let paths = match package_type {
                PackageType::WindowsInstaller => {
                    platform::windows::bundle_project(&self.settings).await?
                }
                PackageType::Dmg => platform::macos::bundle_project(&self.settings).await?,
                PackageType::Deb => platform::linux::debian::bundle_project(&self.settings).await?,
                PackageType::Rpm => platform::linux::rpm::bundle_project(&self.settings).await?,
            };

            let Some(first_path) = paths.first() else {
                match self.settings.tool_failures() {
                    ToolFailurePolicy::Abort => {
                        bail!("{} pipeline finished without producing a package", package_type)
                    }
                    ToolFailurePolicy::Warn => {
                        log::warn!("{} pipeline produced no package", package_type);
                        continue;
                    }
                }
            };
            let checksum = calculate_sha256(first_path).await?;

            let mut size = 0u64;
            for p in &paths {
                let metadata = tokio::fs::metadata(p)
                    .await
                    .fs_context("reading artifact metadata", p)?;
                size += metadata.len();
            }

            artifacts.push(BundledArtifact {
                package_type: *package_type,
                paths,
                size,
                checksum,
            });
        }

        Ok(artifacts)
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
