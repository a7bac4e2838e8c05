//! Single-attempt HTTP GET that streams the body to a file.
//!
//! Uses libcurl's easy interface. Redirects are followed; the whole transfer
//! is bounded by one overall timeout. Only a final `200` response produces a
//! file: the body is streamed into a `.part` temp file that is renamed onto
//! the destination once the transfer completes. Non-200 bodies are drained
//! and discarded without touching the filesystem.

mod error;

pub use error::DownloadError;

use crate::storage::PartFile;
use std::cell::Cell;
use std::path::Path;
use std::time::Duration;

/// Overall timeout for one image GET.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of redirects followed per GET.
const MAX_REDIRECTS: u32 = 10;

/// The only status accepted as success.
const HTTP_OK: u32 = 200;

/// Per-request options for the downloader.
#[derive(Debug, Clone)]
pub struct DownloaderOptions {
    /// Overall timeout (connect + transfer).
    pub timeout: Duration,
    /// `User-Agent` header, if any.
    pub user_agent: Option<String>,
}

impl Default for DownloaderOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            user_agent: None,
        }
    }
}

/// Blocking image downloader. One call, one attempt; no retries.
#[derive(Debug, Clone, Default)]
pub struct Downloader {
    opts: DownloaderOptions,
}

impl Downloader {
    pub fn new(opts: DownloaderOptions) -> Self {
        Self { opts }
    }

    /// GETs `url` and writes the full response body to `destination`.
    ///
    /// Returns the number of bytes written. On any error nothing is left at
    /// `destination` and the temp file is removed.
    pub fn download(&self, url: &str, destination: &Path) -> Result<u64, DownloadError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.timeout(self.opts.timeout)?;
        if let Some(ua) = &self.opts.user_agent {
            easy.useragent(ua)?;
        }

        // Status of the most recent response head; reset on every hop.
        let status = Cell::new(0u32);
        let mut part: Option<PartFile> = None;
        let mut write_error: Option<std::io::Error> = None;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|line| {
                if let Some(code) = parse_status_line(line) {
                    status.set(code);
                }
                true
            })?;
            transfer.write_function(|data| {
                if status.get() != HTTP_OK {
                    return Ok(data.len());
                }
                if part.is_none() {
                    match PartFile::create(destination) {
                        Ok(p) => part = Some(p),
                        Err(e) => {
                            write_error = Some(e);
                            return Ok(0);
                        }
                    }
                }
                let written = match part.as_mut() {
                    Some(p) => p.write_chunk(data),
                    None => Ok(()),
                };
                match written {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        write_error = Some(e);
                        // Short count aborts the transfer with a write error.
                        Ok(0)
                    }
                }
            })?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if e.is_write_error() {
                if let Some(io_err) = write_error.take() {
                    return Err(DownloadError::FileWrite(io_err));
                }
            }
            return Err(DownloadError::Transport(e));
        }

        let code = easy.response_code()?;
        if code != HTTP_OK {
            return Err(DownloadError::HttpStatus(code));
        }

        let part = match part {
            Some(p) => p,
            None => PartFile::create(destination).map_err(DownloadError::FileWrite)?,
        };
        let written = part.finalize(destination).map_err(DownloadError::FileWrite)?;
        tracing::debug!(url, path = %destination.display(), bytes = written, "download complete");
        Ok(written)
    }
}

/// Parses `HTTP/1.1 200 OK` / `HTTP/2 404` status lines. Other header lines yield `None`.
fn parse_status_line(line: &[u8]) -> Option<u32> {
    let line = std::str::from_utf8(line).ok()?;
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}
