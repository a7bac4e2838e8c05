//! Sequential writer for a `.part` temp file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::temp_path;

/// Temp file that receives a response body chunk by chunk.
///
/// Call [`PartFile::finalize`] to rename it onto the final path. Dropping a
/// `PartFile` that was not finalized removes the temp file, so every early
/// return releases the handle and cleans up.
pub struct PartFile {
    writer: Option<BufWriter<File>>,
    temp_path: PathBuf,
    written: u64,
    committed: bool,
}

impl PartFile {
    /// Create (or truncate) the temp file for `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(PartFile {
            writer: Some(BufWriter::new(file)),
            temp_path,
            written: 0,
            committed: false,
        })
    }

    /// Append `data` to the temp file.
    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        let writer = self.writer.as_mut().ok_or_else(closed)?;
        writer.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Flush, close and rename the temp file to `final_path`. Returns the byte count.
    pub fn finalize(mut self, final_path: &Path) -> io::Result<u64> {
        let writer = self.writer.take().ok_or_else(closed)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&self.temp_path, final_path)?;
        self.committed = true;
        Ok(self.written)
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        drop(self.writer.take());
        if !self.committed {
            if let Err(e) = std::fs::remove_file(&self.temp_path) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %self.temp_path.display(),
                        "could not remove partial file: {}",
                        e
                    );
                }
            }
        }
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "part file already closed")
}
