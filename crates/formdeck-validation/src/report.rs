//! Field-keyed validation reports

use formdeck_core::Field;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// How many messages a field may report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Stop at the first failing rule of each field (immediate variant)
    #[default]
    FirstPerField,
    /// Report every failing rule (schema variant)
    CollectAll,
}

/// Field → messages mapping; empty means ready to submit
///
/// Fields iterate in presentation order. A field never maps to an empty
/// message list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    entries: BTreeMap<Field, Vec<String>>,
}

impl ValidationErrors {
    /// Empty report
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field failed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failing fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of messages across all fields
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether the field has at least one message
    #[inline]
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    /// First message of a field, the one shown under the input
    #[must_use]
    pub fn first(&self, field: Field) -> Option<&str> {
        self.entries
            .get(&field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// All messages of a field
    #[must_use]
    pub fn messages(&self, field: Field) -> &[String] {
        self.entries.get(&field).map_or(&[], Vec::as_slice)
    }

    /// Whether any field reports exactly this message
    #[must_use]
    pub fn has_message(&self, message: &str) -> bool {
        self.entries
            .values()
            .flatten()
            .any(|m| m == message)
    }

    /// Append a message to a field
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.entries.entry(field).or_default().push(message.into());
    }

    /// Replace a field's messages; an empty list clears the field
    pub fn set_field(&mut self, field: Field, messages: Vec<String>) {
        if messages.is_empty() {
            self.entries.remove(&field);
        } else {
            self.entries.insert(field, messages);
        }
    }

    /// Clear a field
    pub fn remove(&mut self, field: Field) -> Option<Vec<String>> {
        self.entries.remove(&field)
    }

    /// Failing fields in presentation order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.entries.keys().copied()
    }

    /// Field/messages pairs in presentation order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> + '_ {
        self.entries.iter().map(|(f, m)| (*f, m.as_slice()))
    }

    /// Keep only the given fields
    #[must_use]
    pub fn retain_fields(mut self, keep: impl Fn(Field) -> bool) -> Self {
        self.entries.retain(|field, _| keep(*field));
        self
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.entries {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
