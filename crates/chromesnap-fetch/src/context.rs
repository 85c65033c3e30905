//! Snapshot context: resolves archive URLs, filenames and binary paths for a
//! (base URL, archive token, version) triple.

use std::path::{Path, PathBuf};

use url::Url;

use crate::platform::ArchiveToken;
use crate::Result;

pub const CHROMIUM_BASE_URL: &str =
    "http://commondatastorage.googleapis.com/chromium-browser-snapshots";
pub const WEBKIT_BASE_URL: &str =
    "http://commondatastorage.googleapis.com/chromium-webkit-snapshots";

/// Which upstream project's snapshots to pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    #[default]
    Chromium,
    Blink,
}

impl Flavor {
    pub fn base_url(&self) -> &'static str {
        match self {
            Flavor::Chromium => CHROMIUM_BASE_URL,
            Flavor::Blink => WEBKIT_BASE_URL,
        }
    }
}

/// Everything needed to locate one snapshot build: where the bucket lives,
/// which platform archive to pull and at which version.
#[derive(Debug, Clone)]
pub struct SnapshotContext {
    base_url: String,
    token: ArchiveToken,
    version: String,
}

impl SnapshotContext {
    pub fn new(flavor: Flavor, token: ArchiveToken, version: impl Into<String>) -> Self {
        Self {
            base_url: flavor.base_url().to_string(),
            token,
            version: version.into(),
        }
    }

    /// Build a context against an arbitrary snapshot bucket root. The URL is
    /// validated up front so a malformed base fails before any download.
    pub fn from_base_url(
        base_url: &str,
        token: ArchiveToken,
        version: impl Into<String>,
    ) -> Result<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            version: version.into(),
        })
    }

    pub fn token(&self) -> ArchiveToken {
        self.token
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Per-platform listing directory inside the snapshot bucket.
    pub fn listing_dir(&self) -> &'static str {
        match self.token {
            ArchiveToken::Mac | ArchiveToken::Mac64 => "Mac",
            ArchiveToken::Win => "Win",
            ArchiveToken::Win64 => "Win_x64",
            ArchiveToken::Linux => "Linux",
            ArchiveToken::Linux64 => "Linux_x64",
            ArchiveToken::LinuxArm => "Linux_ARM_Cross-Compile",
            ArchiveToken::ChromeOs => "Linux_ChromiumOS_Full",
        }
    }

    /// Name of the zip file the bucket stores for this platform.
    pub fn archive_name(&self) -> &'static str {
        match self.token {
            ArchiveToken::Mac | ArchiveToken::Mac64 => "chrome-mac.zip",
            ArchiveToken::Win | ArchiveToken::Win64 => "chrome-win32.zip",
            ArchiveToken::Linux | ArchiveToken::Linux64 | ArchiveToken::LinuxArm => {
                "chrome-linux.zip"
            }
            ArchiveToken::ChromeOs => "chrome-chromeos.zip",
        }
    }

    /// Full download URL for this snapshot.
    pub fn archive_url(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url,
            self.listing_dir(),
            self.version,
            self.archive_name()
        )
    }

    /// File name the downloaded zip is saved under, prefixed with the version
    /// so zips of different versions never collide.
    pub fn zip_file_name(&self) -> String {
        format!("{}-{}", self.version, self.archive_name())
    }

    /// Where the downloaded zip lands inside the given download directory.
    pub fn zip_path(&self, download_dir: &Path) -> PathBuf {
        download_dir.join(self.zip_file_name())
    }

    /// Path of the chrome executable inside an unpacked archive rooted at
    /// `unpack_dir`. The path is constructed from the naming convention, not
    /// checked against the filesystem.
    pub fn binary_path(&self, unpack_dir: &Path) -> Result<PathBuf> {
        let family = self.token.family()?;
        Ok(unpack_dir
            .join(format!("chrome-{}", family))
            .join("chrome"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_selects_endpoint() {
        assert_eq!(Flavor::Chromium.base_url(), CHROMIUM_BASE_URL);
        assert_eq!(Flavor::Blink.base_url(), WEBKIT_BASE_URL);
        assert_eq!(Flavor::default(), Flavor::Chromium);
    }

    #[test]
    fn test_archive_url_linux64() {
        let context = SnapshotContext::new(Flavor::Chromium, ArchiveToken::Linux64, "12345");
        assert_eq!(
            context.archive_url(),
            "http://commondatastorage.googleapis.com/chromium-browser-snapshots\
             /Linux_x64/12345/chrome-linux.zip"
        );
    }

    #[test]
    fn test_archive_url_blink() {
        let context = SnapshotContext::new(Flavor::Blink, ArchiveToken::Mac64, "99999");
        assert_eq!(
            context.archive_url(),
            "http://commondatastorage.googleapis.com/chromium-webkit-snapshots\
             /Mac/99999/chrome-mac.zip"
        );
    }

    #[test]
    fn test_zip_path_uses_version_prefix() {
        let context = SnapshotContext::new(Flavor::Chromium, ArchiveToken::Win64, "777");
        let path = context.zip_path(Path::new("/downloads"));
        assert_eq!(path, Path::new("/downloads/777-chrome-win32.zip"));
    }

    #[test]
    fn test_binary_path_follows_family() {
        let context = SnapshotContext::new(Flavor::Chromium, ArchiveToken::Linux64, "12345");
        let path = context.binary_path(Path::new("/tmp/chrome_binary_x")).unwrap();
        assert_eq!(path, Path::new("/tmp/chrome_binary_x/chrome-linux/chrome"));

        let context = SnapshotContext::new(Flavor::Chromium, ArchiveToken::ChromeOs, "12345");
        let path = context.binary_path(Path::new("/tmp/chrome_binary_x")).unwrap();
        assert_eq!(path, Path::new("/tmp/chrome_binary_x/chrome-chromeos/chrome"));
    }

    #[test]
    fn test_from_base_url_rejects_garbage() {
        let result = SnapshotContext::from_base_url("not a url", ArchiveToken::Linux, "1");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_base_url_strips_trailing_slash() {
        let context =
            SnapshotContext::from_base_url("http://127.0.0.1:9/", ArchiveToken::Linux, "42")
                .unwrap();
        assert_eq!(context.archive_url(), "http://127.0.0.1:9/Linux/42/chrome-linux.zip");
    }
}
