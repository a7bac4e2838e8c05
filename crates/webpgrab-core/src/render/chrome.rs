//! Headless Chrome backend (DevTools protocol via `chromiumoxide`).
//!
//! The rest of the program is synchronous, so each render builds a private
//! current-thread tokio runtime, drives the browser on it and tears it down.
//! The browser process is closed on every exit path, including timeouts.

use super::{RenderError, RenderOptions, Renderer};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

/// How often the wait selector is re-checked.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Renders pages in a freshly launched headless Chrome.
#[derive(Debug, Clone, Default)]
pub struct ChromeRenderer {
    executable: Option<PathBuf>,
    no_sandbox: bool,
}

impl ChromeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific Chrome/Chromium binary instead of auto-detection.
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Pass `--no-sandbox` (needed in some containers).
    pub fn with_no_sandbox(mut self, no_sandbox: bool) -> Self {
        self.no_sandbox = no_sandbox;
        self
    }

    fn browser_config(&self) -> Result<BrowserConfig, RenderError> {
        let mut builder = BrowserConfig::builder();
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        builder.build().map_err(RenderError::Launch)
    }

    async fn render_async(&self, url: &str, options: &RenderOptions) -> Result<String, RenderError> {
        let config = self.browser_config()?;
        let deadline = Instant::now() + options.timeout;
        let (mut browser, mut handler) = timeout_at(deadline, Browser::launch(config))
            .await
            .map_err(|_| RenderError::Timeout(options.timeout))?
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let captured = timeout_at(deadline, capture(&browser, url, options)).await;

        if let Err(e) = browser.close().await {
            tracing::warn!("failed to close browser: {}", e);
        }
        if let Err(e) = browser.wait().await {
            tracing::warn!("failed to reap browser process: {}", e);
        }
        handler_task.abort();

        match captured {
            Ok(result) => result,
            Err(_) => Err(RenderError::Timeout(options.timeout)),
        }
    }
}

impl Renderer for ChromeRenderer {
    fn render(&self, url: &str, options: &RenderOptions) -> Result<String, RenderError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(RenderError::Runtime)?;
        tracing::info!(url, timeout = ?options.timeout, "rendering page");
        let html = runtime.block_on(self.render_async(url, options))?;
        tracing::info!(url, bytes = html.len(), "page rendered");
        Ok(html)
    }
}

/// Navigate, wait for the selector, let scripts settle, then grab the DOM.
async fn capture(browser: &Browser, url: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let page = browser.new_page(url).await?;
    wait_until_visible(&page, &options.wait_selector).await;
    tokio::time::sleep(options.settle_delay).await;
    let html = page.content().await?;
    if let Err(e) = page.close().await {
        tracing::debug!("failed to close page: {}", e);
    }
    Ok(html)
}

/// Polls until `selector` matches a rendered, visible element. Bounded only
/// by the caller's timeout; evaluation errors (e.g. mid-navigation context
/// teardown) count as "not yet".
async fn wait_until_visible(page: &Page, selector: &str) {
    let script = visibility_script(selector);
    loop {
        match page.evaluate(script.as_str()).await {
            Ok(result) => {
                if result.into_value::<bool>().unwrap_or(false) {
                    return;
                }
            }
            Err(e) => tracing::debug!(selector, "visibility check failed: {}", e),
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// JS expression that is `true` once `selector` matches a displayed element with a box.
fn visibility_script(selector: &str) -> String {
    let quoted = serde_json::to_string(selector).unwrap_or_else(|_| "\"body\"".to_string());
    format!(
        "(() => {{ const el = document.querySelector({quoted}); \
         if (!el) return false; \
         const style = window.getComputedStyle(el); \
         if (style.display === 'none' || style.visibility === 'hidden') return false; \
         const rect = el.getBoundingClientRect(); \
         return rect.width > 0 || rect.height > 0; }})()"
    )
}
