//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Zi Record Module
//!
//! This module provides the row type consumed by the CSV exporter. A
//! [`ZiRecord`] is an ordered mapping from field name to a JSON scalar.
//!
//! ## Design Principles
//!
//! - **Ordered**: Fields keep their insertion order. When no explicit header
//!   list is configured, the first record's field order becomes the column
//!   order of the whole export
//! - **Explicit**: Records are built from JSON objects or from any
//!   `Serialize` struct; there is no reflection over arbitrary shapes
//! - **Scalar cells**: Values are JSON scalars (string, number, boolean,
//!   null). Arrays and objects can be stored but are rejected when the record
//!   is serialized, so callers must flatten them beforehand
//!
//! ## Usage Example
//!
//! ```rust
//! use zicsv::record::ZiRecord;
//! use serde_json::json;
//!
//! let record = ZiRecord::new()
//!     .with_field("name", "Test 1")
//!     .with_field("age", 13);
//!
//! let same = ZiRecord::from_value(json!({"name": "Test 1", "age": 13})).unwrap();
//! assert_eq!(record, same);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, ZiError};

/// Ordered field map backing a record.
pub type ZiFields = Map<String, Value>;

/// One logical row of data: field name to scalar value, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZiRecord {
    fields: ZiFields,
}

impl ZiRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field and returns the record, for builder-style construction.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builds a record from a JSON object.
    ///
    /// Any other JSON value is rejected with `InvalidRecordShape`, reported
    /// against the `<root>` field.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ZiError::invalid_shape("<root>", value_kind(&other))),
        }
    }

    /// Builds a record from any serializable struct or map.
    ///
    /// Struct fields keep their declaration order.
    pub fn from_serialize<T: Serialize>(item: &T) -> Result<Self> {
        Self::from_value(serde_json::to_value(item)?)
    }

    /// Inserts or replaces a field. A replaced field keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates field names in record order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates `(name, value)` pairs in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrows the underlying ordered map.
    pub fn fields(&self) -> &ZiFields {
        &self.fields
    }
}

impl From<ZiFields> for ZiRecord {
    fn from(fields: ZiFields) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for ZiRecord {
    type Error = ZiError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ZiRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = ZiRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Convenience alias for working on batches of records.
pub type ZiRecordBatch = Vec<ZiRecord>;

/// Converts a slice of serializable items into a record batch.
pub fn records_from_serialize<T: Serialize>(items: &[T]) -> Result<ZiRecordBatch> {
    items.iter().map(ZiRecord::from_serialize).collect()
}

/// Short name of a JSON value's type, used in error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
