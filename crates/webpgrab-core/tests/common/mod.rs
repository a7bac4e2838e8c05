//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod image_server;

use std::path::{Path, PathBuf};
use webpgrab_core::downloader::DownloadError;
use webpgrab_core::pipeline::RunSummary;
use webpgrab_core::render::{RenderError, RenderOptions, Renderer};
use webpgrab_core::report::{Progress, Reporter};

/// Renderer that returns fixed HTML for any URL.
pub struct StaticRenderer(pub String);

impl Renderer for StaticRenderer {
    fn render(&self, _url: &str, _options: &RenderOptions) -> Result<String, RenderError> {
        Ok(self.0.clone())
    }
}

/// Renderer that always times out.
pub struct TimeoutRenderer;

impl Renderer for TimeoutRenderer {
    fn render(&self, _url: &str, options: &RenderOptions) -> Result<String, RenderError> {
        Err(RenderError::Timeout(options.timeout))
    }
}

/// Owned copy of a reported event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Destination(PathBuf),
    Downloading(String),
    Saved(PathBuf),
    Error { url: String, status: Option<u32> },
    Summary { downloaded: usize, failed: usize },
}

/// Reporter that records every event in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<Event>,
}

impl RecordingReporter {
    pub fn errors(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Error { .. }))
            .collect()
    }

    pub fn saved(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Saved(p) => Some(p.as_path()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report_progress(&mut self, progress: Progress<'_>) {
        self.events.push(match progress {
            Progress::Destination(dir) => Event::Destination(dir.to_path_buf()),
            Progress::Downloading(url) => Event::Downloading(url.to_string()),
            Progress::Saved(path) => Event::Saved(path.to_path_buf()),
        });
    }

    fn report_error(&mut self, url: &str, error: &DownloadError) {
        self.events.push(Event::Error {
            url: url.to_string(),
            status: error.status(),
        });
    }

    fn report_summary(&mut self, summary: &RunSummary) {
        self.events.push(Event::Summary {
            downloaded: summary.downloaded(),
            failed: summary.failed(),
        });
    }
}
