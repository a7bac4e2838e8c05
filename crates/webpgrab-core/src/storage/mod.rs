//! Destination files: collision-free naming and temp-file lifecycle.
//!
//! Image bodies are streamed into `<final>.part` and renamed onto the
//! allocated final path only after a complete response, so a failed download
//! never leaves a truncated file under the real name.

mod writer;

pub use writer::PartFile;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before the final rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `7.webp` → `7.webp.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Returns a path that does not exist yet, starting from `desired`.
///
/// If `desired` is free it is returned unchanged. Otherwise the counter
/// suffix scheme `dir/base_1.ext`, `dir/base_2.ext`, ... is probed in order
/// and the first free candidate wins. There is no upper bound; the loop ends
/// at the first gap.
///
/// A candidate whose existence cannot be determined (name too long,
/// permission denied on `stat`) is returned as-is, so the failure surfaces
/// as a write error on that one image. Not safe against another process
/// allocating the same name concurrently.
pub fn unique_path(desired: &Path) -> PathBuf {
    if is_free(desired) {
        return desired.to_path_buf();
    }

    let dir = desired.parent().unwrap_or_else(|| Path::new(""));
    let stem = desired.file_stem().unwrap_or_default();
    let ext = desired.extension();

    let mut counter: u64 = 1;
    loop {
        let candidate = dir.join(numbered_name(stem.to_os_string(), counter, ext));
        if is_free(&candidate) {
            tracing::debug!(
                desired = %desired.display(),
                allocated = %candidate.display(),
                "destination taken, using numbered name"
            );
            return candidate;
        }
        counter += 1;
    }
}

fn numbered_name(mut stem: OsString, counter: u64, ext: Option<&std::ffi::OsStr>) -> OsString {
    stem.push(format!("_{counter}"));
    if let Some(ext) = ext {
        stem.push(".");
        stem.push(ext);
    }
    stem
}

fn is_free(path: &Path) -> bool {
    match path.try_exists() {
        Ok(exists) => !exists,
        Err(e) => {
            tracing::debug!(path = %path.display(), "existence check failed: {}", e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("7.webp"));
        assert_eq!(p.to_string_lossy(), "7.webp.part");
        let p2 = temp_path(Path::new("/tmp/gallery/007.webp"));
        assert_eq!(p2.to_string_lossy(), "/tmp/gallery/007.webp.part");
    }

    #[test]
    fn free_path_returned_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let desired = dir.path().join("1.webp");
        assert_eq!(unique_path(&desired), desired);
    }

    #[test]
    fn occupied_path_gets_increasing_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let desired = dir.path().join("1.webp");
        fs::write(&desired, b"x").unwrap();

        let first = unique_path(&desired);
        assert_eq!(first, dir.path().join("1_1.webp"));
        fs::write(&first, b"x").unwrap();

        let second = unique_path(&desired);
        assert_eq!(second, dir.path().join("1_2.webp"));
    }

    #[test]
    fn existing_suffixes_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["5.webp", "5_1.webp", "5_2.webp", "5_4.webp"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        assert_eq!(
            unique_path(&dir.path().join("5.webp")),
            dir.path().join("5_3.webp")
        );
    }

    #[test]
    fn unstattable_name_returned_without_probing() {
        let dir = tempfile::tempdir().unwrap();
        let desired = dir.path().join(format!("{}.webp", "1".repeat(300)));
        assert!(desired.try_exists().is_err());
        assert_eq!(unique_path(&desired), desired);
    }

    #[test]
    fn name_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let desired = dir.path().join("42");
        fs::write(&desired, b"x").unwrap();
        assert_eq!(unique_path(&desired), dir.path().join("42_1"));
    }

    #[test]
    fn extension_case_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let desired = dir.path().join("7.WEBP");
        fs::write(&desired, b"x").unwrap();
        assert_eq!(unique_path(&desired), dir.path().join("7_1.WEBP"));
    }
}
