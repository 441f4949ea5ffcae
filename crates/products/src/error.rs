//! Validation errors of the product form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Price,
    Quantity,
    Pictures,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Quantity => "quantity",
            Field::Pictures => "pictures",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Each image must be smaller than {} MB ({name} is {size} bytes)",
        .limit / (1024 * 1024)
    )]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("You can only upload up to {limit} images ({attempted} selected)")]
    TooManyFiles { attempted: usize, limit: usize },

    #[error("{message}")]
    RequiredFieldMissing { field: Field, message: &'static str },
}

impl ValidationError {
    pub(crate) fn missing(field: Field) -> Self {
        let message = match field {
            Field::Name => "Name is required and should be at least 3 characters",
            Field::Price => "Price is required and should be a positive number",
            Field::Quantity => "Quantity is required and should be a positive number",
            Field::Pictures => "At least one picture is required",
        };
        Self::RequiredFieldMissing { field, message }
    }

    /// The field this error is reported next to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::RequiredFieldMissing { field, .. } => *field,
            ValidationError::FileTooLarge { .. } | ValidationError::TooManyFiles { .. } => {
                Field::Pictures
            }
        }
    }
}

/// All field-level errors of one validation pass (at most one per field).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    pub(crate) fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().map(ValidationError::field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field(), error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Why a submission could not start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    #[error("invalid form: {0}")]
    Invalid(FieldErrors),

    #[error("a submission is already in flight")]
    InFlight,
}
