//! Linux package pipelines and distribution detection.

pub mod debian;
pub mod distro;
pub mod rpm;

use crate::bundler::{error::Result, utils::fs};
use std::path::Path;

/// Copies the entry script to its extension-less name next to it.
///
/// The native build systems install the script under that name.
pub(crate) async fn alias_entry_script(entry_script: &Path, alias: &Path) -> Result<()> {
    log::debug!("Aliasing {} as {}", entry_script.display(), alias.display());
    fs::copy_file(entry_script, alias).await
}
