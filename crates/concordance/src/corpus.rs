//! Corpus access: directory enumeration and read-only file views.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use morph_dict::LoadMode;

use crate::error::ScanError;

/// Files found under a corpus root, plus directories that could not be read.
#[derive(Debug, Default)]
pub struct CorpusListing {
    pub files: Vec<PathBuf>,
    pub failures: Vec<ScanError>,
}

/// Walk `root` recursively, skipping hidden entries such as `.DS_Store`.
/// Files come back sorted by path.
///
/// Fails only when `root` itself cannot be read; unreadable subdirectories
/// are collected in [`CorpusListing::failures`].
pub fn list_files(root: &Path) -> Result<CorpusListing, ScanError> {
    let mut listing = CorpusListing::default();
    let top = read_dir_entries(root)?;
    let mut pending = vec![top];

    while let Some(entries) = pending.pop() {
        for path in entries {
            if is_hidden(&path) {
                continue;
            }
            // Symlinked directories are not followed.
            let is_dir = fs::symlink_metadata(&path).is_ok_and(|meta| meta.is_dir());
            if is_dir {
                match read_dir_entries(&path) {
                    Ok(children) => pending.push(children),
                    Err(err) => listing.failures.push(err),
                }
            } else {
                listing.files.push(path);
            }
        }
    }

    listing.files.sort();
    Ok(listing)
}

fn read_dir_entries(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let fs_error = |source| ScanError::FileSystem {
        path: dir.to_path_buf(),
        source,
    };
    fs::read_dir(dir)
        .map_err(fs_error)?
        .map(|entry| entry.map(|e| e.path()).map_err(fs_error))
        .collect()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

enum Bytes {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

/// Read-only view of a corpus file; the mapping is released on drop.
pub struct CorpusFile {
    path: PathBuf,
    bytes: Bytes,
}

impl CorpusFile {
    pub fn open(path: impl Into<PathBuf>, mode: LoadMode) -> Result<Self, ScanError> {
        let path = path.into();
        let fs_error = |source| ScanError::FileSystem {
            path: path.clone(),
            source,
        };
        let mut file = File::open(&path).map_err(fs_error)?;
        let len = file.metadata().map_err(fs_error)?.len();

        let bytes = match mode {
            // Zero-length mappings are rejected on some platforms.
            _ if len == 0 => Bytes::Owned(Vec::new()),
            LoadMode::Mmap => Bytes::Mmap(unsafe { Mmap::map(&file) }.map_err(fs_error)?),
            LoadMode::Owned => {
                let mut buf = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
                file.read_to_end(&mut buf).map_err(fs_error)?;
                Bytes::Owned(buf)
            }
        };
        Ok(Self { path, bytes })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.bytes {
            Bytes::Mmap(m) => m.as_ref(),
            Bytes::Owned(v) => v.as_slice(),
        }
    }
}
