//! Target architecture and its fixed installer descriptor.

use crate::bundler::error::Error;
use std::fmt;

/// CPU architecture of the frozen build.
///
/// Only the two Windows installer architectures are modelled. Each maps to a
/// fixed descriptor used when naming the freeze output, locating the installer
/// compiler and restricting the architectures the installer accepts.
///
/// Deserializes from the architecture code, `32` or `64`.
///
/// # Examples
///
/// ```
/// use release_packager::bundler::Arch;
///
/// let arch = Arch::try_from(64u8).unwrap();
/// assert_eq!(arch, Arch::X86_64);
/// assert_eq!(arch.archs_allowed(), "x64");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize)]
#[serde(try_from = "u8")]
pub enum Arch {
    /// x86 / i686 (32-bit)
    X86,
    /// x86_64 / AMD64 (64-bit)
    X86_64,
}

impl Arch {
    /// Architecture of the running packager binary.
    pub fn host() -> Self {
        if cfg!(target_pointer_width = "64") {
            Arch::X86_64
        } else {
            Arch::X86
        }
    }

    /// Architecture code, `32` or `64`.
    pub fn code(self) -> u8 {
        match self {
            Arch::X86 => 32,
            Arch::X86_64 => 64,
        }
    }

    /// Platform tag the freeze tool embeds in its raw build directory name.
    pub fn freeze_tag(self) -> &'static str {
        match self {
            Arch::X86 => "win32",
            Arch::X86_64 => "win-amd64",
        }
    }

    /// Suffix of the `PROGRAMFILES` variable under which the (32-bit)
    /// installer compiler is installed.
    pub fn program_files_suffix(self) -> &'static str {
        match self {
            Arch::X86 => "",
            Arch::X86_64 => "(X86)",
        }
    }

    /// Value for the installer's allowed-architectures directive.
    ///
    /// Empty for 32-bit, which lets the installer run anywhere.
    pub fn archs_allowed(self) -> &'static str {
        match self {
            Arch::X86 => "",
            Arch::X86_64 => "x64",
        }
    }
}

impl TryFrom<u8> for Arch {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            32 => Ok(Arch::X86),
            64 => Ok(Arch::X86_64),
            other => Err(Error::ArchError(format!(
                "unsupported architecture code {other}, expected 32 or 64"
            ))),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for arch in [Arch::X86, Arch::X86_64] {
            assert_eq!(Arch::try_from(arch.code()).unwrap(), arch);
        }
        assert!(Arch::try_from(16u8).is_err());
    }

    #[test]
    fn descriptor_matches_installer_expectations() {
        assert_eq!(Arch::X86.program_files_suffix(), "");
        assert_eq!(Arch::X86_64.program_files_suffix(), "(X86)");
        assert_eq!(Arch::X86.freeze_tag(), "win32");
        assert_eq!(Arch::X86_64.freeze_tag(), "win-amd64");
        assert_eq!(Arch::X86.archs_allowed(), "");
    }
}
