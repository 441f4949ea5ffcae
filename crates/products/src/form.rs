//! Product form controller: fields, image selection, file input and the
//! submission state machine.
//!
//! ```text
//! Empty -> Editing -> Submitting -> Empty    (success)
//!                               \-> Editing  (failure)
//! ```

use serde::{Deserialize, Serialize};

use crate::draft::{ProductDraft, ProductPayload};
use crate::error::{SubmitBlocked, ValidationError};
use crate::file::FileHandle;
use crate::policy::UploadPolicy;
use crate::preview::PreviewUrls;
use crate::selection::ImageSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    Empty,
    Editing,
    Submitting,
}

/// What happens to the file input when a selection is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputResetPolicy {
    /// The input keeps mirroring the committed selection.
    #[default]
    KeepCommitted,
    /// The input is emptied while the committed selection stays as it was.
    /// Reproduces the legacy web form; input and selection then disagree
    /// until the next successful change.
    ClearOnReject,
}

pub struct ProductForm {
    draft: ProductDraft,
    images: ImageSelection,
    // Files the file input currently shows. Owned here, never read back.
    input_files: Vec<FileHandle>,
    reset_policy: InputResetPolicy,
    state: FormState,
}

impl core::fmt::Debug for ProductForm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductForm")
            .field("draft", &self.draft)
            .field("images", &self.images.len())
            .field("input_files", &self.input_files.len())
            .field("state", &self.state)
            .finish()
    }
}

impl ProductForm {
    pub fn new(policy: UploadPolicy, previews: PreviewUrls) -> Self {
        Self {
            draft: ProductDraft::default(),
            images: ImageSelection::new(policy, previews),
            input_files: Vec::new(),
            reset_policy: InputResetPolicy::default(),
            state: FormState::Empty,
        }
    }

    pub fn with_reset_policy(mut self, reset_policy: InputResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn images(&self) -> &ImageSelection {
        &self.images
    }

    /// Files currently shown by the file input.
    pub fn input_files(&self) -> &[FileHandle] {
        &self.input_files
    }

    /// No field typed and no image selected.
    pub fn is_pristine(&self) -> bool {
        self.draft.is_blank() && self.images.is_empty()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.touch();
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.draft.price = price.into();
        self.touch();
    }

    pub fn set_quantity(&mut self, quantity: impl Into<String>) {
        self.draft.quantity = quantity.into();
        self.touch();
    }

    /// Files delivered by the file picker.
    pub fn add_files(&mut self, new_files: Vec<FileHandle>) -> Result<(), ValidationError> {
        let count = new_files.len();
        match self.images.add_files(new_files) {
            Ok(()) => {
                tracing::debug!(added = count, total = self.images.len(), "images selected");
                self.sync_input();
                self.touch();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "image selection rejected");
                match self.reset_policy {
                    InputResetPolicy::KeepCommitted => self.sync_input(),
                    InputResetPolicy::ClearOnReject => self.input_files.clear(),
                }
                Err(e)
            }
        }
    }

    /// Remove the image at `index`. Out of bounds is a logged no-op.
    pub fn remove_file(&mut self, index: usize) {
        if self.images.remove(index).is_some() {
            self.sync_input();
            self.touch();
        }
    }

    /// Reset every field and release every preview.
    ///
    /// A submission in flight keeps the form in `Submitting`; its outcome is
    /// still applied when it arrives.
    pub fn clear(&mut self) {
        self.reset();
        self.touch();
    }

    /// Check the fields and, if valid, enter `Submitting`.
    ///
    /// Returns the snapshot to send. Nothing changes when blocked.
    pub fn begin_submission(&mut self) -> Result<ProductPayload, SubmitBlocked> {
        if self.state == FormState::Submitting {
            return Err(SubmitBlocked::InFlight);
        }

        let payload = self
            .draft
            .validate(&self.images)
            .map_err(SubmitBlocked::Invalid)?;

        self.state = FormState::Submitting;
        Ok(payload)
    }

    /// The request was accepted: back to an empty form.
    pub fn submission_succeeded(&mut self) {
        self.reset();
        self.state = FormState::Empty;
    }

    /// The request failed: keep everything for a retry.
    pub fn submission_failed(&mut self) {
        self.state = if self.is_pristine() {
            FormState::Empty
        } else {
            FormState::Editing
        };
    }

    fn reset(&mut self) {
        self.draft = ProductDraft::default();
        self.images.clear();
        self.input_files.clear();
    }

    fn sync_input(&mut self) {
        self.input_files = self.images.files().cloned().collect();
    }

    fn touch(&mut self) {
        if self.state == FormState::Submitting {
            return;
        }
        self.state = if self.is_pristine() {
            FormState::Empty
        } else {
            FormState::Editing
        };
    }
}
