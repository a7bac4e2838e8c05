//! User-facing progress reporting.
//!
//! The pipeline talks to a [`Reporter`] instead of printing, so runs can be
//! observed (and tested) without capturing stdout. Diagnostics still go
//! through `tracing`.

use crate::downloader::DownloadError;
use crate::pipeline::RunSummary;
use std::path::Path;

/// A progress milestone within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    /// Destination directory is ready.
    Destination(&'a Path),
    /// A qualifying image is about to be fetched.
    Downloading(&'a str),
    /// An image was saved at this path.
    Saved(&'a Path),
}

pub trait Reporter {
    fn report_progress(&mut self, progress: Progress<'_>);
    /// A candidate's download failed; the run continues.
    fn report_error(&mut self, url: &str, error: &DownloadError);
    fn report_summary(&mut self, summary: &RunSummary);
}

/// Prints one line per event to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report_progress(&mut self, progress: Progress<'_>) {
        match progress {
            Progress::Destination(dir) => println!("destination: {}", dir.display()),
            Progress::Downloading(url) => println!("downloading: {url}"),
            Progress::Saved(path) => println!("done: {}", path.display()),
        }
    }

    fn report_error(&mut self, url: &str, error: &DownloadError) {
        println!("error: {url} failed: {error}");
    }

    fn report_summary(&mut self, summary: &RunSummary) {
        println!();
        println!("finished: {} file(s) downloaded", summary.downloaded());
    }
}
