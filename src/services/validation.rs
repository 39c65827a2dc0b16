//! Field validators.
//!
//! A validator maps a field value to an optional failure message. Validators
//! compose left-to-right and the first failure wins.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::models::FormRecord;

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const PHONE_NUMBER_REQUIRED: &str = "Phone number is required";
pub const PHONE_NUMBER_CHARACTERS: &str =
    "Only numbers, spaces and these symbols are allowed: ( ) + -";

const PHONE_NUMBER_PATTERN: &str = r"^[0-9+()\- ]*$";

#[derive(Debug, Clone)]
pub enum Validator {
    /// Fails on an empty or whitespace-only value
    Required { description: String },
    /// Fails when the value does not match the pattern
    Matches { pattern: Regex, description: String },
    /// Runs each validator in order, returning the first failure
    List(Vec<Validator>),
}

impl Validator {
    pub fn required(description: impl Into<String>) -> Self {
        Validator::Required {
            description: description.into(),
        }
    }

    pub fn matches(pattern: &str, description: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Validator::Matches {
            pattern: Regex::new(pattern)?,
            description: description.into(),
        })
    }

    pub fn list(validators: impl IntoIterator<Item = Validator>) -> Self {
        Validator::List(validators.into_iter().collect())
    }

    pub fn validate(&self, value: &str) -> Option<String> {
        match self {
            Validator::Required { description } => {
                value.trim().is_empty().then(|| description.clone())
            }
            Validator::Matches {
                pattern,
                description,
            } => (!pattern.is_match(value)).then(|| description.clone()),
            Validator::List(validators) => validators
                .iter()
                .fold(None, |result, validator| {
                    result.or_else(|| validator.validate(value))
                }),
        }
    }
}

/// Field name to failure message. A field with no entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of validating one field; `None` clears it
    pub fn set(&mut self, field: &str, result: Option<String>) {
        match result {
            Some(message) => {
                self.0.insert(field.to_string(), message);
            }
            None => {
                self.0.remove(field);
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Overlays `other` on top of these errors; entries in `other` win
    pub fn merge(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Validators for the fields of one form
#[derive(Debug, Clone, Default)]
pub struct FieldValidators {
    validators: HashMap<&'static str, Validator>,
}

impl FieldValidators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &'static str, validator: Validator) -> Self {
        self.validators.insert(field, validator);
        self
    }

    /// Validates one field. Fields without a validator always pass.
    pub fn validate_field(&self, field: &str, value: &str) -> Option<String> {
        let result = self
            .validators
            .get(field)
            .and_then(|validator| validator.validate(value));
        debug!("Validated field {}: {:?}", field, result);
        result
    }

    /// Validates every field of the record, touched or not
    pub fn validate_many<R: FormRecord>(&self, record: &R) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (name, value) in record.fields() {
            errors.set(name, self.validate_field(name, &value));
        }
        errors
    }

    /// Validators used by the customer form
    pub fn customer() -> Result<Self, regex::Error> {
        Ok(Self::new()
            .with("firstName", Validator::required(FIRST_NAME_REQUIRED))
            .with("lastName", Validator::required(LAST_NAME_REQUIRED))
            .with(
                "phoneNumber",
                Validator::list([
                    Validator::required(PHONE_NUMBER_REQUIRED),
                    Validator::matches(PHONE_NUMBER_PATTERN, PHONE_NUMBER_CHARACTERS)?,
                ]),
            ))
    }

    /// The appointment form has no client-side checks; the server reports
    /// its own field errors
    pub fn appointment() -> Self {
        Self::new()
    }
}

pub fn any_errors(errors: &ValidationErrors) -> bool {
    !errors.is_empty()
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;
