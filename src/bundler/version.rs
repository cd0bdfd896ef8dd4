//! Installer-safe version strings.
//!
//! The Windows installer compiler only accepts versions made of short
//! dot-separated segments. [`NormalizedVersion`] reshapes an author supplied
//! version such as `3.1-20231201beta` into `3.1.2023.1201`:
//!
//! 1. prerelease tokens (`alpha`, `beta`, `rc`, any case) are removed
//! 2. hyphens (and any other non-alphanumeric separator) become dots
//! 3. empty segments are dropped, so no double, leading or trailing dots remain
//! 4. segments longer than four characters are split into four character chunks
//!
//! Normalizing an already normalized string returns it unchanged.

use crate::bundler::error::{Error, Result};
use regex::Regex;
use std::{fmt, sync::LazyLock};

/// Maximum characters per segment accepted by the installer compiler.
pub const MAX_SEGMENT_LEN: usize = 4;

static PRERELEASE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?i)alpha|beta|rc").unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});

/// A version string whose segments all match `[0-9A-Za-z]{1,4}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedVersion(String);

impl NormalizedVersion {
    /// Normalizes a raw version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyVersion`] when nothing but prerelease tokens and
    /// separators remain, e.g. for `"rc"`.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(Error::EmptyVersion(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a raw version string. May return an empty string.
pub fn normalize(raw: &str) -> String {
    // Removing a token can splice its neighbours into a new one ("alalphapha").
    let mut stripped = raw.to_string();
    while PRERELEASE_TOKEN.is_match(&stripped) {
        stripped = PRERELEASE_TOKEN.replace_all(&stripped, "").into_owned();
    }

    let mut segments = Vec::new();
    for part in stripped
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
    {
        split_long_segment(part, &mut segments);
    }

    segments.join(".")
}

/// Pushes `part` as one segment, or as consecutive four character chunks when longer.
fn split_long_segment<'a>(part: &'a str, segments: &mut Vec<&'a str>) {
    let mut rest = part;
    while rest.len() > MAX_SEGMENT_LEN {
        let (head, tail) = rest.split_at(MAX_SEGMENT_LEN);
        segments.push(head);
        rest = tail;
    }
    segments.push(rest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_version_passes_through() {
        assert_eq!(normalize("1.2.3"), "1.2.3");
    }

    #[test]
    fn prerelease_suffix_becomes_segment() {
        assert_eq!(normalize("1.20.3-alpha1"), "1.20.3.1");
    }

    #[test]
    fn long_date_segment_is_split() {
        assert_eq!(normalize("20231201beta"), "2023.1201");
    }

    #[test]
    fn tokens_are_removed_in_any_case() {
        for raw in ["3.0-ALPHA2", "3.0-Beta2", "3.0-rC2", "3.0rc2"] {
            let normalized = normalize(raw);
            let lower = normalized.to_lowercase();
            assert!(!lower.contains("alpha"), "{raw} -> {normalized}");
            assert!(!lower.contains("beta"), "{raw} -> {normalized}");
            assert!(!lower.contains("rc"), "{raw} -> {normalized}");
        }
    }

    #[test]
    fn spliced_token_is_removed_too() {
        assert_eq!(normalize("1.alalphapha"), "1");
    }

    #[test]
    fn split_keeps_every_character() {
        assert_eq!(normalize("3.123456"), "3.1234.56");
        assert_eq!(normalize("123456789"), "1234.5678.9");
        let raw = "7.20240131";
        assert_eq!(normalize(raw).replace('.', ""), raw.replace('.', ""));
    }

    #[test]
    fn separators_collapse_without_stray_dots() {
        assert_eq!(normalize("1..2--3-rc"), "1.2.3");
        assert_eq!(normalize("-1.2-"), "1.2");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in [
            "1.2.3",
            "1.20.3-alpha1",
            "20231201beta",
            "3.1-20231201rc7",
            "0.9.10-beta-3",
            "12345.6789012",
            "1.alalphapha",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "{raw}");
        }
    }

    #[test]
    fn every_segment_is_short_and_alphanumeric() {
        let version = NormalizedVersion::parse("3.2-20231201beta+build77777").unwrap();
        for segment in version.segments() {
            assert!((1..=MAX_SEGMENT_LEN).contains(&segment.len()), "{version}");
            assert!(segment.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn token_only_version_is_rejected() {
        assert!(matches!(
            NormalizedVersion::parse("rc"),
            Err(Error::EmptyVersion(_))
        ));
    }
}
