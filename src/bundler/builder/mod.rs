//! Bundle orchestration and coordination.
//!
//! [`Bundler`] runs the pipeline for each requested [`PackageType`] and
//! turns the produced files into [`BundledArtifact`]s with their total size
//! and a SHA-256 checksum.
//!
//! ```no_run
//! use release_packager::bundler::{Bundler, PackageType, Settings};
//!
//! # async fn example(settings: Settings) -> release_packager::bundler::Result<()> {
//! let bundler = Bundler::new(settings);
//! for artifact in bundler.bundle_types(&[PackageType::Deb]).await? {
//!     println!("{} ({} bytes) {}", artifact.package_type, artifact.size, artifact.checksum);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`PackageType`]: crate::bundler::PackageType
//! [`BundledArtifact`]: crate::bundler::BundledArtifact

mod checksum;
mod orchestrator;
pub mod tool_detection;

pub use orchestrator::Bundler;
