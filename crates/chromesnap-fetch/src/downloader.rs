//! Fetch job: downloads one snapshot archive to a local zip file.

use std::path::{Path, PathBuf};

use crate::context::SnapshotContext;
use crate::http::HttpClient;
use crate::Result;

/// A single snapshot download. The job is synchronous from the caller's point
/// of view: `run` resolves only once the zip is fully on disk or the download
/// has failed.
pub struct FetchJob {
    context: SnapshotContext,
    client: HttpClient,
    dest: PathBuf,
}

impl FetchJob {
    /// Create a job that downloads the context's archive into `download_dir`,
    /// under the `<version>-<archive-name>` naming convention.
    pub fn new(context: SnapshotContext, download_dir: &Path) -> Result<Self> {
        let client = HttpClient::new()?;
        Ok(Self::with_client(context, download_dir, client))
    }

    pub fn with_client(context: SnapshotContext, download_dir: &Path, client: HttpClient) -> Self {
        let dest = context.zip_path(download_dir);
        Self {
            context,
            client,
            dest,
        }
    }

    /// Local path the zip is written to.
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn context(&self) -> &SnapshotContext {
        &self.context
    }

    /// Download the archive, blocking until it is fully on disk. Returns the
    /// zip path on success.
    pub async fn run<F>(&self, progress: Option<F>) -> Result<PathBuf>
    where
        F: Fn(u64, u64),
    {
        let url = self.context.archive_url();
        log::debug!("fetching {} -> {}", url, self.dest.display());

        self.client.download(&url, &self.dest, progress).await?;

        log::debug!("saved {}", self.dest.display());
        Ok(self.dest.clone())
    }
}
