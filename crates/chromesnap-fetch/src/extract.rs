//! Zip extraction for downloaded snapshot archives.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::{FetchError, Result};

/// Create a fresh uniquely-named unpack directory. The directory is kept on
/// disk past process exit; cleanup is the caller's (or the OS's) concern.
pub fn create_unpack_dir() -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix("chrome_binary_")
        .tempdir()?;
    Ok(dir.keep())
}

/// Unzip `zip_path` into `dest_dir`, restoring unix permission bits and
/// rejecting entries that would escape the destination directory.
pub fn unzip_to_dir(zip_path: &Path, dest_dir: &Path) -> Result<()> {
    let file = File::open(zip_path)?;
    let reader = BufReader::new(file);
    let mut archive =
        zip::ZipArchive::new(reader).map_err(|e| FetchError::ExtractionFailed {
            zip: zip_path.to_path_buf(),
            reason: format!("Failed to open zip: {}", e),
        })?;

    std::fs::create_dir_all(dest_dir)?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| FetchError::ExtractionFailed {
                zip: zip_path.to_path_buf(),
                reason: format!("Failed to read zip entry: {}", e),
            })?;

        // enclosed_name rejects absolute paths and `..` components
        let relative = entry.enclosed_name().ok_or_else(|| FetchError::ExtractionFailed {
            zip: zip_path.to_path_buf(),
            reason: format!("Path traversal detected in archive: {}", entry.name()),
        })?;

        if relative.as_os_str().is_empty() {
            continue;
        }

        let outpath = dest_dir.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut entry, &mut outfile)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
                }
            }
        }
    }

    Ok(())
}
