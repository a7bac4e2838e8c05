//! Per-run data carried through the pipeline.

use crate::downloader::DownloadError;
use crate::storage::unique_path;
use crate::url_model::{absolutize, qualifying_filename};
use std::path::{Path, PathBuf};

/// The page as rendered. Built once per run.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub source_url: String,
    pub rendered_html: String,
}

/// One `<img>` source, resolved and classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub raw_src: String,
    pub resolved_url: String,
    /// Set only when the URL names a qualifying image.
    pub filename: Option<String>,
}

impl ImageCandidate {
    pub fn from_src(page_url: &str, raw_src: &str, extension: &str) -> Self {
        let resolved_url = absolutize(page_url, raw_src);
        let filename = qualifying_filename(&resolved_url, extension);
        Self {
            raw_src: raw_src.to_string(),
            resolved_url,
            filename,
        }
    }
}

/// Where one image goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPath {
    pub directory: PathBuf,
    pub requested_filename: String,
    /// Free at allocation time.
    pub final_path: PathBuf,
}

impl DestinationPath {
    pub fn allocate(directory: &Path, requested_filename: &str) -> Self {
        let final_path = unique_path(&directory.join(requested_filename));
        Self {
            directory: directory.to_path_buf(),
            requested_filename: requested_filename.to_string(),
            final_path,
        }
    }
}

#[derive(Debug)]
pub struct DownloadOutcome {
    pub candidate: ImageCandidate,
    pub destination: DestinationPath,
    pub error: Option<DownloadError>,
}

impl DownloadOutcome {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub directory: PathBuf,
    /// One entry per qualifying image, in document order.
    pub outcomes: Vec<DownloadOutcome>,
}

impl RunSummary {
    pub fn downloaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.downloaded()
    }
}
