use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::downloader::DownloaderOptions;
use crate::pipeline::PipelineOptions;
use crate::render::{RenderOptions, DEFAULT_WAIT_SELECTOR};
use crate::url_model::DEFAULT_IMAGE_EXTENSION;

/// Global configuration loaded from `~/.config/webpgrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabConfig {
    /// Overall timeout for each image GET, in seconds.
    pub download_timeout_secs: u64,
    /// Overall bound for rendering the page, in seconds.
    pub render_timeout_secs: u64,
    /// Delay after the wait selector is visible, in milliseconds.
    pub settle_delay_ms: u64,
    /// Element that must be visible before the DOM is captured.
    pub wait_selector: String,
    /// Heading element whose text names the destination directory.
    pub heading_tag: String,
    pub image_tag: String,
    pub source_attribute: String,
    /// Target image extension, without the dot.
    pub image_extension: String,
    /// Optional `User-Agent` for image requests.
    pub user_agent: Option<String>,
    /// Optional Chrome/Chromium binary; auto-detected when unset.
    pub chrome_executable: Option<PathBuf>,
    /// Launch the browser with `--no-sandbox`.
    pub no_sandbox: bool,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            download_timeout_secs: 30,
            render_timeout_secs: 15,
            settle_delay_ms: 2000,
            wait_selector: DEFAULT_WAIT_SELECTOR.to_string(),
            heading_tag: "h1".to_string(),
            image_tag: "img".to_string(),
            source_attribute: "src".to_string(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            user_agent: None,
            chrome_executable: None,
            no_sandbox: false,
        }
    }
}

impl GrabConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            wait_selector: self.wait_selector.clone(),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            timeout: Duration::from_secs(self.render_timeout_secs),
        }
    }

    pub fn downloader_options(&self) -> DownloaderOptions {
        DownloaderOptions {
            timeout: Duration::from_secs(self.download_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Pipeline options writing under `output_root`.
    pub fn pipeline_options(&self, output_root: PathBuf) -> PipelineOptions {
        PipelineOptions {
            render: self.render_options(),
            heading_tag: self.heading_tag.clone(),
            image_tag: self.image_tag.clone(),
            source_attribute: self.source_attribute.clone(),
            image_extension: self.image_extension.trim_start_matches('.').to_string(),
            output_root,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("webpgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GrabConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`], but a config that cannot be read, written or
/// parsed falls back to the defaults with a warning instead of failing.
pub fn load_or_default() -> GrabConfig {
    or_default(load_or_init())
}

fn or_default(loaded: Result<GrabConfig>) -> GrabConfig {
    loaded.unwrap_or_else(|err| {
        tracing::warn!("config unavailable, using defaults: {:#}", err);
        GrabConfig::default()
    })
}

/// Reads `path`, writing the defaults there first if it does not exist.
pub fn load_or_init_at(path: &Path) -> Result<GrabConfig> {
    if !path.exists() {
        let default_cfg = GrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: GrabConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
