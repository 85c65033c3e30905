//! Platform archive tokens and the coarse OS families they map to.

use std::fmt;
use std::str::FromStr;

use crate::{FetchError, Result};

/// Platform/architecture identifier selecting which snapshot build to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveToken {
    Mac,
    Mac64,
    Win,
    Win64,
    Linux,
    Linux64,
    LinuxArm,
    ChromeOs,
}

impl ArchiveToken {
    pub const ALL: [ArchiveToken; 8] = [
        ArchiveToken::Mac,
        ArchiveToken::Mac64,
        ArchiveToken::Win,
        ArchiveToken::Win64,
        ArchiveToken::Linux,
        ArchiveToken::Linux64,
        ArchiveToken::LinuxArm,
        ArchiveToken::ChromeOs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveToken::Mac => "mac",
            ArchiveToken::Mac64 => "mac64",
            ArchiveToken::Win => "win",
            ArchiveToken::Win64 => "win64",
            ArchiveToken::Linux => "linux",
            ArchiveToken::Linux64 => "linux64",
            ArchiveToken::LinuxArm => "linux-arm",
            ArchiveToken::ChromeOs => "chromeos",
        }
    }

    /// Resolve the coarse OS family used for directory naming inside the
    /// extracted archive. The first family whose name is a substring of the
    /// token wins (`linux64` matches `linux`, `mac64` matches `mac`).
    pub fn family(&self) -> Result<PlatformFamily> {
        let token = self.as_str();
        PlatformFamily::ORDERED
            .iter()
            .copied()
            .find(|family| token.contains(family.as_str()))
            .ok_or_else(|| FetchError::UnknownPlatformFamily {
                token: token.to_string(),
            })
    }
}

impl fmt::Display for ArchiveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveToken {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|token| token.as_str() == s)
            .ok_or_else(|| FetchError::UnknownArchiveToken {
                token: s.to_string(),
            })
    }
}

/// One of the four coarse OS groups the snapshot archives are organized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFamily {
    Mac,
    Linux,
    Win,
    ChromeOs,
}

impl PlatformFamily {
    /// Match order matters: a token is assigned to the first family whose
    /// name it contains.
    pub const ORDERED: [PlatformFamily; 4] = [
        PlatformFamily::Mac,
        PlatformFamily::Linux,
        PlatformFamily::Win,
        PlatformFamily::ChromeOs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformFamily::Mac => "mac",
            PlatformFamily::Linux => "linux",
            PlatformFamily::Win => "win",
            PlatformFamily::ChromeOs => "chromeos",
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
