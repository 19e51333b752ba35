//! Field-level validation reporting.
//!
//! Input DTOs derive [`validator::Validate`]; failures are collected into a
//! [`FieldErrors`] map so that several forms validated together (e.g. the
//! content wrapper plus its payload) surface in one response.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Ordered map of field name to human-readable messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one message against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Fold every message from `other` into `self`.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of every failing field, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields().collect();
        write!(f, "{}", names.join(", "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                out.add(field.to_string(), describe(err));
            }
        }
        out
    }
}

fn describe(err: &ValidationError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => format!("failed '{}' check", err.code),
    }
}

/// Run `validator` checks on one input, converting failures to [`FieldErrors`].
pub fn check<T: Validate>(input: &T) -> Result<(), FieldErrors> {
    input.validate().map_err(FieldErrors::from)
}

/// Combine several independent validation results.
///
/// Every result is inspected, so all failing fields are reported rather than
/// only those of the first failing form.
pub fn check_all(
    results: impl IntoIterator<Item = Result<(), FieldErrors>>,
) -> Result<(), CoreError> {
    let mut combined = FieldErrors::new();
    for result in results {
        if let Err(errors) = result {
            combined.merge(errors);
        }
    }
    if combined.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidFields(combined))
    }
}
