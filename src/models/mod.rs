pub mod appointment;
pub mod common;
pub mod customer;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FormError;

/// A flat record edited field-by-field through a form.
///
/// Edits never mutate in place: `with_field` consumes the current value and
/// returns the updated one, so whoever owns the record always holds the
/// latest edit.
pub trait FormRecord: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Names of every editable field, in display order
    fn field_names() -> &'static [&'static str];

    /// Current value of a field rendered as text, `None` for unknown fields
    fn field(&self, name: &str) -> Option<String>;

    /// Returns a copy of the record with one field replaced
    fn with_field(self, name: &str, value: &str) -> Result<Self, FormError>;

    /// All fields as `(name, value)` pairs
    fn fields(&self) -> Vec<(&'static str, String)> {
        Self::field_names()
            .iter()
            .map(|name| (*name, self.field(name).unwrap_or_default()))
            .collect()
    }
}
