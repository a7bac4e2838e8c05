//! `webpgrab <url>` – render the page and download its numbered images.

use anyhow::{Context, Result};
use webpgrab_core::config::GrabConfig;
use webpgrab_core::downloader::Downloader;
use webpgrab_core::pipeline::{Pipeline, PipelineOptions};
use webpgrab_core::render::ChromeRenderer;
use webpgrab_core::report::ConsoleReporter;

use crate::cli::Cli;

pub fn run_grab(cli: &Cli, cfg: &GrabConfig) -> Result<()> {
    let options = pipeline_options(cli, cfg);
    tracing::info!(
        url = %cli.url,
        extension = %options.image_extension,
        root = %options.output_root.display(),
        "grab started"
    );

    let mut renderer = ChromeRenderer::new().with_no_sandbox(cfg.no_sandbox);
    if let Some(path) = &cfg.chrome_executable {
        renderer = renderer.with_executable(path);
    }
    let downloader = Downloader::new(cfg.downloader_options());
    let pipeline = Pipeline::new(renderer, downloader, options);

    let mut reporter = ConsoleReporter;
    pipeline
        .run(&cli.url, &mut reporter)
        .with_context(|| format!("grab {}", cli.url))?;
    Ok(())
}

/// Config-derived options with the per-run CLI overrides applied.
pub(crate) fn pipeline_options(cli: &Cli, cfg: &GrabConfig) -> PipelineOptions {
    let mut options = cfg.pipeline_options(cli.output_dir.clone().unwrap_or_default());
    if let Some(ext) = &cli.extension {
        options.image_extension = ext.trim_start_matches('.').to_string();
    }
    options
}
