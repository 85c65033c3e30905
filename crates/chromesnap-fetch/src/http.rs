//! HTTP client used for snapshot downloads.
//!
//! Thin wrapper around `reqwest` with retry logic (exponential backoff on
//! server errors and rate limits), timeouts and streaming downloads with an
//! optional progress callback.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Response, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::{FetchError, Result};

const DEFAULT_USER_AGENT: &str = concat!("chromesnap/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

pub struct HttpClient {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
        })
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Perform a GET request with automatic retries.
    pub async fn get(&self, url: &str) -> Result<Response> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        // Retry on server errors and rate limits
                        last_error = Some(FetchError::HttpStatus {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    } else {
                        // Don't retry on client errors (4xx except 429)
                        return Err(FetchError::HttpStatus {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }
                }
                Err(e) => {
                    last_error = Some(FetchError::Network(e));
                }
            }

            if attempt < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = self.retry_delay * 2_u32.pow(attempt);
                log::debug!("retrying {} in {:?}", url, delay);
                tokio::time::sleep(delay).await;
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Err(FetchError::MaxRetries {
                url: url.to_string(),
            }),
        }
    }

    /// Download a URL to a file, streaming the body to disk. The progress
    /// callback receives (downloaded, total) byte counts; total is 0 when the
    /// server sends no Content-Length.
    pub async fn download<F>(&self, url: &str, dest: &Path, progress: Option<F>) -> Result<()>
    where
        F: Fn(u64, u64),
    {
        let response = self.get(url).await?;
        let total_size = response.content_length().unwrap_or(0);

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = File::create(dest).await?;
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(FetchError::Network)?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(ref callback) = progress {
                callback(downloaded, total_size);
            }
        }

        file.flush().await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}
