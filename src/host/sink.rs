//! Capability-oriented export sink.

use std::io;
use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::debug;

use super::ExportSink;
use crate::error::FilesystemError;

/// Writes exported files below a single root directory.
///
/// The root is opened with ambient authority once per write; paths given to
/// [`ExportSink::write_file`] are resolved inside it and cannot escape it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirSink {
    root: Utf8PathBuf,
}

impl DirSink {
    /// Creates a sink rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory files are written below.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl ExportSink for DirSink {
    fn write_file(&self, path: &Utf8Path, content: &str) -> Result<(), FilesystemError> {
        let full_path = self.root.join(path);
        let dir = Dir::open_ambient_dir(&self.root, ambient_authority())
            .map_err(|error| map_io_error(&self.root, &error))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            dir.create_dir_all(parent)
                .map_err(|error| map_io_error(&self.root.join(parent), &error))?;
        }

        dir.write(path, content)
            .map_err(|error| map_io_error(&full_path, &error))?;
        debug!(path = %full_path, bytes = content.len(), "file exported");
        Ok(())
    }
}

fn map_io_error(path: &Utf8Path, error: &io::Error) -> FilesystemError {
    let std_path = PathBuf::from(path.as_std_path());
    match error.kind() {
        io::ErrorKind::NotFound => FilesystemError::NotFound { path: std_path },
        io::ErrorKind::PermissionDenied => FilesystemError::PermissionDenied { path: std_path },
        _ => FilesystemError::IoError {
            path: std_path,
            message: error.to_string(),
        },
    }
}
