//! Message definitions
//!
//! The structured request sent to the server: an operation name plus
//! string-valued fields.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key holding the operation name in every request
pub const OPERATION_KEY: &str = "operation";

/// A request message
///
/// Fields keep insertion order so the encoded JSON reads the same way the
/// command was typed. The server looks values up by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    operation: String,
    fields: Vec<(String, String)>,
}

impl Message {
    /// Create a message with no fields
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style [`Message::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field, replacing any existing value for `key`
    ///
    /// Setting `operation` renames the operation.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if key == OPERATION_KEY {
            self.operation = value;
            return;
        }

        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Look up a field (or the operation) by key
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == OPERATION_KEY {
            return Some(&self.operation);
        }
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Command-specific fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(OPERATION_KEY, &self.operation)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
