//! Qualifying-image filename check.

/// Returns the filename of `url` when it names a qualifying image.
///
/// The filename is the last `/`-delimited segment with any query string
/// (`?` onward) removed. It qualifies when its extension equals `extension`
/// (ASCII case-insensitive, leading dot optional) and the stem is one or more
/// ASCII digits and nothing else.
///
/// # Examples
///
/// - `qualifying_filename("https://x.com/a/007.webp", "webp")` → `Some("007.webp")`
/// - `qualifying_filename("https://x.com/a/7.WEBP?x=1", "webp")` → `Some("7.WEBP")`
/// - `qualifying_filename("https://x.com/a/7a.webp", "webp")` → `None`
pub fn qualifying_filename(url: &str, extension: &str) -> Option<String> {
    let segment = url.rsplit('/').next().unwrap_or(url);
    let segment = segment.split('?').next().unwrap_or(segment);

    let (stem, ext) = segment.rsplit_once('.')?;
    if !ext.eq_ignore_ascii_case(extension.trim_start_matches('.')) {
        return None;
    }
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(segment.to_string())
}
