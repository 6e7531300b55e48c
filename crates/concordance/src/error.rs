use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// Failure to contribute one corpus file (or directory) to a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid UTF-8 in {} at line {line}", .path.display())]
    Decode {
        path: PathBuf,
        line: usize,
        #[source]
        source: Utf8Error,
    },
    #[error("cannot read {}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ScanError::Decode { path, .. } | ScanError::FileSystem { path, .. } => path,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("target phrase must contain at least one token")]
    EmptyPhrase,
    #[error(
        "window size {window_size} with a {phrase_len}-token phrase leaves no room for left context"
    )]
    DegenerateWindow {
        window_size: usize,
        phrase_len: usize,
    },
    #[error("window size {window_size} exceeds the maximum of {max}")]
    WindowTooLarge { window_size: usize, max: usize },
    #[error("phrase token `{0}` is not a single word")]
    InvalidPhraseToken(String),
    #[error("frequency threshold must be positive")]
    ZeroThreshold,
}
