//! Text fields of the product form and their validation.

use crate::error::{Field, FieldErrors, ValidationError};
use crate::file::FileHandle;
use crate::selection::ImageSelection;

const MIN_NAME_CHARS: usize = 3;

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl ProductDraft {
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.price.is_empty() && self.quantity.is_empty()
    }

    /// Check every field; report all failures at once, one per field.
    pub fn validate(&self, images: &ImageSelection) -> Result<ProductPayload, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.chars().count() < MIN_NAME_CHARS {
            errors.push(ValidationError::missing(Field::Name));
        }

        let price = parse_price(&self.price);
        if price.is_none() {
            errors.push(ValidationError::missing(Field::Price));
        }

        let quantity = parse_quantity(&self.quantity);
        if quantity.is_none() {
            errors.push(ValidationError::missing(Field::Quantity));
        }

        if images.is_empty() {
            errors.push(ValidationError::missing(Field::Pictures));
        }

        match (price, quantity) {
            (Some(price), Some(quantity)) if errors.is_empty() => Ok(ProductPayload {
                name: name.to_string(),
                price,
                quantity,
                pictures: images.files().cloned().collect(),
            }),
            _ => Err(errors),
        }
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn parse_quantity(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// A validated snapshot of the form, ready to be sent.
///
/// The submitting user's id is not part of the form; the sender adds it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
    pub quantity: u64,
    /// In selection order.
    pub pictures: Vec<FileHandle>,
}

impl ProductPayload {
    /// Decimal form of the price, as sent in the `price` part.
    pub fn price_field(&self) -> String {
        self.price.to_string()
    }

    pub fn quantity_field(&self) -> String {
        self.quantity.to_string()
    }
}
