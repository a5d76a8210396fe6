//! File IO helpers: load a path into a `Document`, write one back.
//!
//! Synchronous and whole-file. Line-ending style and the trailing newline
//! are remembered by the document on load and reproduced on save.

use core_text::Document;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no file name")]
    NoFilename,

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Open `path` into a new document. A missing file yields an empty document
/// that will be created on first save.
pub fn open_file(path: &Path, tab_width: usize) -> Result<Document, LoadError> {
    let mut doc = match std::fs::read(path) {
        Ok(bytes) => {
            let doc = Document::from_bytes(&bytes, tab_width);
            tracing::info!(target: "io", path = %path.display(), bytes = bytes.len(), rows = doc.row_count(), "file_open");
            doc
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(target: "io", path = %path.display(), "file_new");
            Document::new(tab_width)
        }
        Err(source) => {
            tracing::error!(target: "io", path = %path.display(), error = %source, "file_open_error");
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    doc.set_filename(path.to_path_buf());
    Ok(doc)
}

/// Serialize `doc` to its file name. Returns the number of bytes written and
/// marks the document clean; on error the dirty flag is left alone.
pub fn save_document(doc: &mut Document) -> Result<usize, SaveError> {
    let path = doc.filename().ok_or(SaveError::NoFilename)?.to_path_buf();
    let bytes = doc.rows_to_string();
    if let Err(source) = std::fs::write(&path, &bytes) {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_write_error");
        return Err(SaveError::Io { path, source });
    }
    doc.mark_clean();
    tracing::info!(target: "io", path = %path.display(), bytes = bytes.len(), "file_write");
    Ok(bytes.len())
}
