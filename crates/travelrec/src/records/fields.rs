//! String-keyed field values.
//!
//! Records are typed structs everywhere inside the crate. `FieldValues` is
//! the loose `name -> text` form they take at the edges: values typed on
//! the command line, rows printed by `view`, and the join-enriched booking
//! rows returned by searches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A map of field name to raw text value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, String>);

/// Whether a field holds an integer reference (`ID`, `Client_ID`, ...).
#[must_use]
pub fn is_id_field(name: &str) -> bool {
    name.contains("ID")
}

impl FieldValues {
    /// Create an empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Get a value if the field is present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Get a value, treating a missing field as empty text.
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    /// Get a value that must be present and not blank.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the field is missing or only whitespace.
    pub fn required(&self, name: &str) -> Result<String> {
        match self.get(name) {
            Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
            _ => Err(Error::validation(name, "is required")),
        }
    }

    /// Parse an optional integer reference. Blank means `None`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value is present but not an integer.
    pub fn id(&self, name: &str) -> Result<Option<u64>> {
        match self.get(name).map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| Error::validation(name, format!("'{value}' is not an integer"))),
        }
    }

    /// Parse an integer reference that must be present.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value is blank or not an integer.
    pub fn required_id(&self, name: &str) -> Result<u64> {
        self.id(name)?
            .ok_or_else(|| Error::validation(name, "is required"))
    }

    /// Overlay `other` on top of these values.
    pub fn merge(&mut self, other: &FieldValues) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over the field names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse a `KEY=VALUE` assignment as typed on the command line.
///
/// Only the first `=` splits; the value may itself contain `=`.
///
/// # Errors
///
/// Returns a message suitable for clap if there is no `=` or the key is empty.
pub fn parse_assignment(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
