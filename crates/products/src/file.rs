//! Handles to user-selected files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a selected file's bytes live.
///
/// Disk-backed handles are read lazily at submission time, the same way a
/// browser `File` is only a reference until the form is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Memory(Arc<[u8]>),
    Disk(PathBuf),
}

/// A file picked by the user. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    size: u64,
    content_type: &'static str,
    source: FileSource,
}

impl FileHandle {
    pub fn in_memory(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        Self {
            content_type: content_type_for(&name),
            size: bytes.len() as u64,
            name,
            source: FileSource::Memory(bytes),
        }
    }

    /// Reference a file on disk. `size` is the size reported when it was picked.
    pub fn on_disk(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            content_type: content_type_for(&name),
            name,
            size,
            source: FileSource::Disk(path),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Disk(path) => Some(path),
            FileSource::Memory(_) => None,
        }
    }
}

/// MIME type guessed from the file extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
