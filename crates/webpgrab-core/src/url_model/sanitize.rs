//! Directory-name sanitization for page headings.

/// Characters that are not allowed in a directory name on common filesystems.
const RESERVED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replaces each of `< > : " / \ | ? *` with `_`.
///
/// No trimming, truncation or Unicode normalization: every other character
/// passes through untouched.
pub fn sanitize_dir_name(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}
