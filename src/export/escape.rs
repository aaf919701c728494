//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd project team.
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

//! # Cell Escaping
//!
//! RFC-4180 style quoting for single cells, plus the conversion of JSON
//! scalars to cell text.

use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::record::value_kind;

const QUOTE: char = '"';

/// Returns true when `text` must be quoted to survive as one cell.
pub fn needs_quoting(text: &str, separator: &str) -> bool {
    text.contains(separator) || text.contains(|c: char| c == QUOTE || c == '\r' || c == '\n')
}

/// Wraps `text` in quotes, doubling internal quotes.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(QUOTE);
    for ch in text.chars() {
        if ch == QUOTE {
            out.push(QUOTE);
        }
        out.push(ch);
    }
    out.push(QUOTE);
    out
}

/// Escapes one cell: quoted only when it contains the separator, a quote,
/// CR or LF.
pub fn escape_cell(text: &str, separator: &str) -> String {
    if needs_quoting(text, separator) {
        quote(text)
    } else {
        text.to_string()
    }
}

/// Textual form of a scalar. Null becomes the empty string.
///
/// `decimal_separator` replaces the `.` of non-integer numbers.
pub fn scalar_text(field: &str, value: &Value, decimal_separator: &str) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => {
            let text = match n.as_f64() {
                Some(f) if n.is_f64() => float_text(f),
                _ => n.to_string(),
            };
            if n.is_f64() && decimal_separator != "." {
                Ok(text.replacen('.', decimal_separator, 1))
            } else {
                Ok(text)
            }
        }
        Value::Array(_) | Value::Object(_) => {
            Err(ZiError::invalid_shape(field, value_kind(value)))
        }
    }
}

/// Whole floats below 1e21 print without a fraction (`8.0` -> `8`); the
/// rest keep serde_json's shortest form.
fn float_text(f: f64) -> String {
    if f == 0.0 {
        "0".to_string()
    } else if f.fract() == 0.0 && f.abs() < WHOLE_FLOAT_LIMIT {
        format!("{:.0}", f)
    } else {
        serde_json::Number::from_f64(f)
            .map(|n| n.to_string())
            .unwrap_or_else(|| f.to_string())
    }
}

const WHOLE_FLOAT_LIMIT: f64 = 1e21;
