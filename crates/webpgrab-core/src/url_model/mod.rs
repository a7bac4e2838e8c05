//! URL modeling and filename derivation.
//!
//! Turns `src` attribute values into absolute URLs, decides which of them
//! point at a qualifying image (digits-only name + target extension), and
//! derives filesystem-safe directory names from page headings.

mod classify;
mod resolve;
mod sanitize;

pub use classify::qualifying_filename;
pub use resolve::resolve_reference;
pub use sanitize::sanitize_dir_name;

/// Default target image extension (without the dot).
pub const DEFAULT_IMAGE_EXTENSION: &str = "webp";

/// Returns `true` when `src` is used verbatim instead of being resolved.
///
/// Mirrors a plain prefix test: anything starting with `http` (so `http:`,
/// `https:` and, loosely, `httpfoo/...`) counts as absolute.
pub fn looks_absolute(src: &str) -> bool {
    src.starts_with("http")
}

/// Absolute URL for an image `src` found on `page_url`.
///
/// # Examples
///
/// - `absolutize("https://site.com/page", "1.webp")` → `"https://site.com/1.webp"`
/// - `absolutize("https://site.com/page", "https://cdn.site.com/2.webp")` → unchanged
pub fn absolutize(page_url: &str, src: &str) -> String {
    if looks_absolute(src) {
        src.to_string()
    } else {
        resolve_reference(page_url, src)
    }
}
