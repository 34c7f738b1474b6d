//! Success/failure envelope returned by every resolution path.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Envelope wrapping either a resolved entity or a keyed list of errors.
///
/// Success is always computed from the error mapping, never cached: the
/// envelope is a success exactly when no error has been recorded, and the
/// entity is populated only on success. Error keys keep their insertion order
/// for presentation.
#[derive(Debug)]
pub struct OperationResult<T> {
    errors: Vec<(String, Vec<String>)>,
    entity: Option<T>,
}

impl<T> OperationResult<T> {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            entity: None,
        }
    }

    /// A successful envelope carrying `entity`.
    pub fn from_entity(entity: T) -> Self {
        Self {
            errors: Vec::new(),
            entity: Some(entity),
        }
    }

    /// A failed envelope with a single error entry.
    pub fn failure(key: impl Into<String>, message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.add_error(key, message);
        result
    }

    /// Record an error message. Appends under `key` when it already has
    /// entries, otherwise starts a new single-element list.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        let key = key.into();
        let message = message.into();
        match self.errors.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, messages)) => messages.push(message),
            None => self.errors.push((key, vec![message])),
        }
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    pub fn into_entity(self) -> Option<T> {
        self.entity
    }

    /// Error entries in insertion order.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(key, messages)| (key.as_str(), messages.as_slice()))
    }

    pub fn messages_for(&self, key: &str) -> Option<&[String]> {
        self.errors
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, messages)| messages.as_slice())
    }
}

impl<T> Default for OperationResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Serialize for OperationResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OperationResult", 3)?;
        state.serialize_field("success", &self.success())?;
        state.serialize_field("result", &self.entity)?;
        state.serialize_field("errors", &ErrorMap(&self.errors))?;
        state.end()
    }
}

struct ErrorMap<'a>(&'a [(String, Vec<String>)]);

impl Serialize for ErrorMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, messages) in self.0 {
            map.serialize_entry(key, messages)?;
        }
        map.end()
    }
}
