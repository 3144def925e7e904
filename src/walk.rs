//! Source file enumeration.

use ignore::{Walk, WalkBuilder};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;
use thiserror::Error;

use crate::options::Options;

/// Failure to produce a source file. These are logged and the file is skipped.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The file could not be read.
    #[error("Error reading {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Cause.
        source: io::Error,
    },
    /// The file is not valid UTF-8.
    #[error("Error reading {path}: invalid UTF-8: {source}")]
    Decode {
        /// File being read.
        path: PathBuf,
        /// Cause.
        source: FromUtf8Error,
    },
    /// The directory walk failed, eg. an unreadable directory.
    #[error("Error walking directory: {0}")]
    Walk(#[from] ignore::Error),
}

/// A file to scan, with its full text.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// Path of the file, relative to the root if the root was relative.
    pub path: PathBuf,
    /// Content of the file.
    pub text: String,
}

/// Read `path` as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, ReadError> {
    let bytes = fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| ReadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Lazy iterator over the source files under a root. See [`source_files`].
pub struct SourceFiles {
    walker: Walk,
    options: Options,
}

impl Iterator for SourceFiles {
    type Item = SourceFile;

    fn next(&mut self) -> Option<SourceFile> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("{}", ReadError::from(e));
                    continue;
                }
            };
            let path = entry.into_path();
            if !path.is_file() || !self.accepts(&path) {
                continue;
            }
            match read_source(&path) {
                Ok(text) => {
                    debug!("Scanning {}", path.display());
                    return Some(SourceFile { path, text });
                }
                Err(e) => warn!("{}", e),
            }
        }
    }
}

impl SourceFiles {
    fn accepts(&self, path: &Path) -> bool {
        self.options.is_source_file(path)
            && !path
                .parent()
                .is_some_and(|dir| self.options.is_excluded_dir(dir))
    }
}

/// Walk `root` and yield every file with a scanned suffix, outside excluded directories.
/// Files are yielded in file name order within each directory. Unreadable files are logged and
/// skipped.
pub fn source_files(root: &Path, options: &Options) -> SourceFiles {
    let filter_options = options.clone();
    let walker = WalkBuilder::new(root)
        .standard_filters(options.respect_gitignore)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir && filter_options.is_excluded_dir(entry.path()))
        })
        .build();
    SourceFiles {
        walker,
        options: options.clone(),
    }
}
