//! External tool detection and availability checking.
//!
//! Only the macOS pipeline checks for its bundler before starting. The
//! other pipelines discover a missing tool when spawning it fails.

use crate::bundler::error::{Error, Result};
use std::path::PathBuf;

/// Looks `tool` up on `PATH`.
pub fn find_tool(tool: &str) -> Option<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool, e);
            None
        }
    }
}

/// Looks `tool` up on `PATH`, failing with an installation hint when absent.
pub fn require_tool(tool: &str, hint: &str) -> Result<PathBuf> {
    find_tool(tool).ok_or_else(|| Error::ToolNotFound {
        tool: tool.to_string(),
        hint: hint.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_carries_hint() {
        let err = require_tool(
            "no-such-bundler-on-this-machine",
            "Install it with \"pip install PyInstaller\".",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "`no-such-bundler-on-this-machine` was not found on PATH. Install it with \"pip install PyInstaller\"."
        );
    }

    #[test]
    #[cfg(unix)]
    fn present_tool_resolves_to_absolute_path() {
        let path = require_tool("sh", "").unwrap();
        assert!(path.is_absolute());
    }
}
