pub mod context;
pub mod downloader;
pub mod error;
pub mod extract;
pub mod http;
pub mod platform;

pub use context::{Flavor, SnapshotContext, CHROMIUM_BASE_URL, WEBKIT_BASE_URL};
pub use downloader::FetchJob;
pub use error::{FetchError, Result};
pub use extract::{create_unpack_dir, unzip_to_dir};
pub use http::{HttpClient, HttpClientConfig};
pub use platform::{ArchiveToken, PlatformFamily};
