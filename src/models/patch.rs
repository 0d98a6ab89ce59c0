//! Helpers for partial-update payloads.
//!
//! Update payloads model every field as `Option<Option<T>>`:
//! `None` means the field was omitted, `Some(None)` means it was sent as `null`,
//! and `Some(Some(v))` carries a new value.

use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

/// Deserializes a present field, including an explicit `null`, into `Some(_)`.
///
/// Must be paired with `#[serde(default)]` so that an omitted field stays `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Records an error if a non-nullable field was sent as `null`.
pub fn reject_null<T>(errors: &mut ValidationErrors, field: &'static str, value: &Option<Option<T>>) {
    if matches!(value, Some(None)) {
        let mut error = ValidationError::new("null");
        error.message = Some(Cow::from(format!("{} may not be null", field)));
        errors.add(field, error);
    }
}

/// Collapses collected errors into the `Validate` result shape.
pub fn finish(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
