//! Record model and category normalization
//!
//! A `Record` is an opaque unit of persisted data: a category key that
//! selects the output file, and a payload that is either pre-formatted
//! text or a structured value encoded to one-line JSON at write time.
//! The payload shape is a tagged union so serialization happens through a
//! single typed dispatch instead of runtime type inspection.

use std::borrow::Cow;

use serde_json::Value;

/// Replace every character outside `[a-zA-Z0-9]` with `_`
///
/// The result is a filesystem-safe token; two raw indices that normalize
/// identically share one writer. Idempotent: normalizing an already
/// normalized key is a no-op.
pub fn normalize_category(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Record payload: pre-formatted text, or a structured value that is
/// serialized when the record is written
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Written as-is
    Text(String),
    /// Encoded to one-line JSON at write time
    Structured(Value),
}

impl Payload {
    /// Encode the payload to the line that lands on disk
    ///
    /// Text payloads borrow; structured payloads serialize to compact
    /// one-line JSON.
    pub fn to_line(&self) -> serde_json::Result<Cow<'_, str>> {
        match self {
            Payload::Text(text) => Ok(Cow::Borrowed(text)),
            Payload::Structured(value) => serde_json::to_string(value).map(Cow::Owned),
        }
    }
}

/// One unit of data to persist, immutable once dequeued
#[derive(Debug, Clone)]
pub struct Record {
    category: String,
    payload: Payload,
}

impl Record {
    /// Create a record with a pre-formatted text payload
    pub fn text(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            payload: Payload::Text(text.into()),
        }
    }

    /// Create a record with a structured payload
    pub fn structured(category: impl Into<String>, value: Value) -> Self {
        Self {
            category: category.into(),
            payload: Payload::Structured(value),
        }
    }

    /// Raw category key (not yet normalized)
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The record's payload
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}
