//! The ordered set of images attached to a product draft.

use crate::error::ValidationError;
use crate::file::FileHandle;
use crate::policy::UploadPolicy;
use crate::preview::{PreviewUrl, PreviewUrls};

/// One selected image and the preview derived from it.
#[derive(Debug)]
pub struct SelectedImage {
    file: FileHandle,
    preview: PreviewUrl,
}

impl SelectedImage {
    pub fn file(&self) -> &FileHandle {
        &self.file
    }

    pub fn preview(&self) -> &PreviewUrl {
        &self.preview
    }
}

/// Ordered (file, preview) pairs.
///
/// # Invariants
/// - At most `policy.max_files` entries.
/// - No entry larger than `policy.max_file_size_bytes`.
/// - Every entry's preview is live; removing or replacing an entry releases it.
#[derive(Debug)]
pub struct ImageSelection {
    entries: Vec<SelectedImage>,
    policy: UploadPolicy,
    previews: PreviewUrls,
}

impl ImageSelection {
    pub fn new(policy: UploadPolicy, previews: PreviewUrls) -> Self {
        Self {
            entries: Vec::new(),
            policy,
            previews,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn files(&self) -> impl ExactSizeIterator<Item = &FileHandle> {
        self.entries.iter().map(SelectedImage::file)
    }

    pub fn previews(&self) -> impl ExactSizeIterator<Item = &PreviewUrl> {
        self.entries.iter().map(SelectedImage::preview)
    }

    /// Append `new_files` after the current selection.
    ///
    /// The combined set is checked as a whole: a too-large file (old or new)
    /// fails with `FileTooLarge`, more than `max_files` with `TooManyFiles`.
    /// On failure nothing changes. On success every entry gets a freshly
    /// derived preview and the previous previews are released.
    pub fn add_files(&mut self, new_files: Vec<FileHandle>) -> Result<(), ValidationError> {
        let combined: Vec<FileHandle> = self.files().cloned().chain(new_files).collect();

        if let Some(file) = combined
            .iter()
            .find(|f| f.size() > self.policy.max_file_size_bytes)
        {
            return Err(ValidationError::FileTooLarge {
                name: file.name().to_string(),
                size: file.size(),
                limit: self.policy.max_file_size_bytes,
            });
        }

        if combined.len() > self.policy.max_files {
            return Err(ValidationError::TooManyFiles {
                attempted: combined.len(),
                limit: self.policy.max_files,
            });
        }

        let previews = &self.previews;
        // Assigning drops the old entries, which releases their previews.
        self.entries = combined
            .into_iter()
            .map(|file| {
                let preview = previews.create(&file);
                SelectedImage { file, preview }
            })
            .collect();

        Ok(())
    }

    /// Remove the entry at `index`, shifting later entries down.
    ///
    /// Out of bounds is a logged no-op.
    pub fn remove(&mut self, index: usize) -> Option<FileHandle> {
        if index >= self.entries.len() {
            tracing::warn!(
                index,
                len = self.entries.len(),
                "remove_file index out of bounds; ignoring"
            );
            return None;
        }
        let SelectedImage { file, preview } = self.entries.remove(index);
        drop(preview);
        Some(file)
    }

    /// Remove every entry, releasing all previews.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
