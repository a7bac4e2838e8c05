//! Page rendering: turn a URL into post-JavaScript HTML.
//!
//! The pipeline depends only on the [`Renderer`] trait; [`ChromeRenderer`]
//! is the headless-Chrome backend used by the CLI.

mod chrome;

pub use chrome::ChromeRenderer;

use std::time::Duration;
use thiserror::Error;

/// Overall bound for one render (launch, navigate, wait, settle, capture).
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(15);
/// Pause after the wait selector becomes visible, for late scripts.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);
/// Element that must be visible before the DOM is captured.
pub const DEFAULT_WAIT_SELECTOR: &str = "body";

/// Wait policy for a render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// CSS selector that must be present and visible.
    pub wait_selector: String,
    /// Fixed delay after the selector is visible.
    pub settle_delay: Duration,
    /// Overall timeout for the whole render.
    pub timeout: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wait_selector: DEFAULT_WAIT_SELECTOR.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            timeout: DEFAULT_RENDER_TIMEOUT,
        }
    }
}

/// Rendering failed; always fatal for the run.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The browser could not be configured or started.
    #[error("browser launch failed: {0}")]
    Launch(String),
    /// DevTools protocol error while driving the page.
    #[error("browser: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
    /// The render did not finish within the overall timeout.
    #[error("render timed out after {0:?}")]
    Timeout(Duration),
    /// The async runtime backing the renderer could not be created.
    #[error("runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Produces the fully rendered HTML of a page.
pub trait Renderer {
    fn render(&self, url: &str, options: &RenderOptions) -> Result<String, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, url: &str, options: &RenderOptions) -> Result<String, RenderError> {
        (**self).render(url, options)
    }
}
