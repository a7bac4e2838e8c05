//! Extraction pipeline: render → parse → heading directory → per-image download.
//!
//! Strictly sequential. A failed render, parse, missing heading or directory
//! creation aborts the run; a failed image download is reported and the loop
//! moves on to the next `<img>`.

mod types;

pub use types::{DestinationPath, DownloadOutcome, ImageCandidate, PageContext, RunSummary};

use crate::document::{DocumentQuery, ElementView, HtmlDocument, ParseError};
use crate::downloader::Downloader;
use crate::render::{RenderError, RenderOptions, Renderer};
use crate::report::{Progress, Reporter};
use crate::url_model::{sanitize_dir_name, DEFAULT_IMAGE_EXTENSION};
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors: any of these ends the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to render {url}: {source}")]
    Render {
        url: String,
        #[source]
        source: RenderError,
    },
    #[error("failed to parse rendered HTML: {0}")]
    Parse(#[from] ParseError),
    #[error("no <{tag}> heading with text found")]
    MissingHeading { tag: String },
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What to look for and where to put it.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub render: RenderOptions,
    /// Heading whose text names the destination directory.
    pub heading_tag: String,
    pub image_tag: String,
    pub source_attribute: String,
    /// Target extension without the dot.
    pub image_extension: String,
    /// Parent of the heading directory; empty means the working directory.
    pub output_root: PathBuf,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            heading_tag: "h1".to_string(),
            image_tag: "img".to_string(),
            source_attribute: "src".to_string(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            output_root: PathBuf::new(),
        }
    }
}

pub struct Pipeline<R> {
    renderer: R,
    downloader: Downloader,
    options: PipelineOptions,
}

impl<R: Renderer> Pipeline<R> {
    pub fn new(renderer: R, downloader: Downloader, options: PipelineOptions) -> Self {
        Self {
            renderer,
            downloader,
            options,
        }
    }

    /// Full run for `url`.
    pub fn run(&self, url: &str, reporter: &mut dyn Reporter) -> Result<RunSummary, PipelineError> {
        let page = self.fetch_page(url)?;
        let doc = HtmlDocument::parse(&page.rendered_html)?;
        self.process_document(&page.source_url, &doc, reporter)
    }

    /// Renders `url` into a [`PageContext`].
    pub fn fetch_page(&self, url: &str) -> Result<PageContext, PipelineError> {
        let rendered_html = self
            .renderer
            .render(url, &self.options.render)
            .map_err(|source| PipelineError::Render {
                url: url.to_string(),
                source,
            })?;
        Ok(PageContext {
            source_url: url.to_string(),
            rendered_html,
        })
    }

    /// Everything after parsing: directory setup and the download loop.
    pub fn process_document<D: DocumentQuery>(
        &self,
        page_url: &str,
        doc: &D,
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary, PipelineError> {
        let directory = self.destination_dir(doc)?;
        std::fs::create_dir_all(&directory).map_err(|source| PipelineError::CreateDir {
            path: directory.clone(),
            source,
        })?;
        tracing::info!(dir = %directory.display(), "destination ready");
        reporter.report_progress(Progress::Destination(&directory));

        let mut outcomes = Vec::new();
        for candidate in self.candidates(page_url, doc) {
            let Some(filename) = candidate.filename.as_deref() else {
                tracing::debug!(url = %candidate.resolved_url, "skipping non-qualifying image");
                continue;
            };
            // Allocate immediately before the download so earlier saves are seen.
            let destination = DestinationPath::allocate(&directory, filename);
            outcomes.push(self.download_one(candidate, destination, reporter));
        }

        let summary = RunSummary {
            directory,
            outcomes,
        };
        tracing::info!(
            downloaded = summary.downloaded(),
            failed = summary.failed(),
            "run finished"
        );
        reporter.report_summary(&summary);
        Ok(summary)
    }

    /// Sanitized heading directory under the output root.
    fn destination_dir<D: DocumentQuery>(&self, doc: &D) -> Result<PathBuf, PipelineError> {
        let missing = || PipelineError::MissingHeading {
            tag: self.options.heading_tag.clone(),
        };
        let heading = doc
            .find_first(&self.options.heading_tag)
            .ok_or_else(missing)?
            .text_content();
        if heading.trim().is_empty() {
            return Err(missing());
        }
        Ok(self.options.output_root.join(sanitize_dir_name(&heading)))
    }

    /// One candidate per image element carrying a source attribute, in document order.
    pub fn candidates<D: DocumentQuery>(&self, page_url: &str, doc: &D) -> Vec<ImageCandidate> {
        doc.find_all(&self.options.image_tag)
            .iter()
            .filter_map(|el| el.attribute(&self.options.source_attribute))
            .map(|src| ImageCandidate::from_src(page_url, src, &self.options.image_extension))
            .collect()
    }

    fn download_one(
        &self,
        candidate: ImageCandidate,
        destination: DestinationPath,
        reporter: &mut dyn Reporter,
    ) -> DownloadOutcome {
        let url = candidate.resolved_url.as_str();
        reporter.report_progress(Progress::Downloading(url));

        let error = match self.downloader.download(url, &destination.final_path) {
            Ok(bytes) => {
                tracing::info!(url, path = %destination.final_path.display(), bytes, "saved");
                reporter.report_progress(Progress::Saved(&destination.final_path));
                None
            }
            Err(e) => {
                tracing::warn!(url, "download failed: {}", e);
                reporter.report_error(url, &e);
                Some(e)
            }
        };
        DownloadOutcome {
            candidate,
            destination,
            error,
        }
    }
}

