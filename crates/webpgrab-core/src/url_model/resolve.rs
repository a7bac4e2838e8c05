//! Relative reference resolution against the page URL.
//!
//! Plain string surgery on `/`-delimited segments: no network access and no
//! validation of the result. Malformed output only shows up later as a
//! failed GET.

/// Converts a possibly-relative `reference` into an absolute URL.
///
/// - `//host/x` (scheme-relative) takes `https:` when `base_url` starts with
///   `https:`, else `http:`.
/// - `/x` (site-root-relative) becomes `scheme//host/x` when `base_url` has
///   at least scheme, empty and host segments.
/// - anything else (path-relative) replaces the last segment of `base_url`.
///
/// An empty `base_url` leaves the reference unchanged.
pub fn resolve_reference(base_url: &str, reference: &str) -> String {
    if reference.starts_with("//") {
        let scheme = if base_url.starts_with("https:") {
            "https:"
        } else {
            "http:"
        };
        return format!("{scheme}{reference}");
    }

    if base_url.is_empty() {
        return reference.to_string();
    }

    if reference.starts_with('/') {
        let parts: Vec<&str> = base_url.split('/').collect();
        if parts.len() >= 3 {
            return format!("{}//{}{}", parts[0], parts[2], reference);
        }
    }

    let dir = base_url.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    format!("{dir}/{reference}")
}
