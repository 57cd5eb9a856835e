//! Target platform identification.

use crate::error::{PackagerError, Result};
use std::{fmt, str::FromStr};

/// Operating system the executable is packaged for.
///
/// Identifiers follow Node's `process.platform` values, since the packaged
/// executable is a Node runtime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    /// macOS: strip signature, inject with a Mach-O segment, ad-hoc re-sign
    Darwin,
    /// Linux: inject only
    Linux,
    /// Windows: strip signature with signtool, inject, re-sign with SHA-256
    Win32,
}

impl Platform {
    /// Every platform the packager accepts.
    pub const SUPPORTED: [Platform; 3] = [Platform::Darwin, Platform::Linux, Platform::Win32];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Darwin => "darwin",
            Platform::Linux => "linux",
            Platform::Win32 => "win32",
        }
    }

    /// Host platform identifier in Node's naming (`darwin`, `linux`, `win32`,
    /// or the raw OS name for anything else).
    pub fn host_identifier() -> &'static str {
        match std::env::consts::OS {
            "macos" => "darwin",
            "windows" => "win32",
            other => other,
        }
    }

    /// Detect the host platform.
    pub fn detect() -> Result<Self> {
        Self::from_identifier(Self::host_identifier())
    }

    /// Parse an identifier; only exact matches are accepted.
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        Self::SUPPORTED
            .into_iter()
            .find(|p| p.as_str() == identifier)
            .ok_or_else(|| PackagerError::UnsupportedPlatform {
                platform: identifier.to_string(),
            })
    }

    /// Extension of native executables (`.exe` on Windows, empty elsewhere).
    pub fn executable_extension(&self) -> &'static str {
        match self {
            Platform::Win32 => ".exe",
            Platform::Darwin | Platform::Linux => "",
        }
    }

    /// Signing tools that must be on PATH for this platform's steps.
    pub fn signing_tools(&self) -> &'static [&'static str] {
        match self {
            Platform::Darwin => &["codesign"],
            Platform::Linux => &[],
            Platform::Win32 => &["signtool"],
        }
    }
}

impl FromStr for Platform {
    type Err = PackagerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_identifier(s)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
