//! Download error type.

use thiserror::Error;

/// Why a single image download failed. Every variant is recoverable: the
/// pipeline reports it and moves on to the next candidate.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The request could not be sent or the transfer broke off (DNS, TLS,
    /// refused connection, timeout, connection reset mid-body).
    #[error("transport: {0}")]
    Transport(#[source] curl::Error),
    /// The final response status was not 200.
    #[error("HTTP {0}")]
    HttpStatus(u32),
    /// Creating, writing or renaming the destination file failed.
    #[error("file write: {0}")]
    FileWrite(#[source] std::io::Error),
}

impl DownloadError {
    /// Status code for [`DownloadError::HttpStatus`], `None` otherwise.
    pub fn status(&self) -> Option<u32> {
        match self {
            DownloadError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<curl::Error> for DownloadError {
    fn from(e: curl::Error) -> Self {
        DownloadError::Transport(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_includes_cause() {
        assert_eq!(DownloadError::HttpStatus(404).to_string(), "HTTP 404");
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(DownloadError::FileWrite(io).to_string(), "file write: denied");
    }

    #[test]
    fn source_exposed_for_wrapped_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(DownloadError::FileWrite(io).source().is_some());
        assert!(DownloadError::HttpStatus(500).source().is_none());
    }

    #[test]
    fn status_only_for_http_errors() {
        assert_eq!(DownloadError::HttpStatus(503).status(), Some(503));
        let io = std::io::Error::new(std::io::ErrorKind::Other, "x");
        assert_eq!(DownloadError::FileWrite(io).status(), None);
    }
}
