//! Product submission form (client side).
//!
//! Pure form logic: field validation, the image selection with its limits and
//! previews, and the submission state machine. No IO, no HTTP.

pub mod draft;
pub mod error;
pub mod file;
pub mod form;
pub mod policy;
pub mod preview;
pub mod selection;

pub use draft::{ProductDraft, ProductPayload};
pub use error::{Field, FieldErrors, SubmitBlocked, ValidationError};
pub use file::{FileHandle, FileSource, content_type_for};
pub use form::{FormState, InputResetPolicy, ProductForm};
pub use policy::UploadPolicy;
pub use preview::{PreviewUrl, PreviewUrls};
pub use selection::{ImageSelection, SelectedImage};
