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

//! # Export Configuration Module
//!
//! Options for one CSV export. The JSON form uses the camelCase option names
//! (`useKeysAsHeaders`, `fieldSeparator`, `additionalHeaders`, ...), so a
//! config can be loaded from the same option objects front-end code passes
//! around.
//!
//! ```rust
//! use zicsv::config::ZiCsvConfig;
//!
//! let config = ZiCsvConfig::from_json_str(
//!     r#"{"title": "Test Csv", "useKeysAsHeaders": true, "useBom": true}"#,
//! )?;
//! assert_eq!(config.output_filename(), "Test_Csv.csv");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZiError};

/// UTF-8 byte-order-mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const DEFAULT_FIELD_SEPARATOR: &str = ",";
pub const DEFAULT_DECIMAL_SEPARATOR: &str = ".";
pub const DEFAULT_FILENAME: &str = "generated";

pub const CSV_MIME_TYPE: &str = "text/csv";
pub const TEXT_MIME_TYPE: &str = "text/plain";

/// One extra row of labels rendered above the header row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiAdditionalHeader {
    pub columns: Vec<String>,
}

impl ZiAdditionalHeader {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configuration for a CSV export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ZiCsvConfig {
    /// Artifact base name when `filename` is absent; text of the title row.
    pub title: Option<String>,
    /// Artifact base name, without extension.
    pub filename: Option<String>,
    /// Delimiter placed between cells.
    pub field_separator: String,
    /// Emit the header row.
    pub use_keys_as_headers: bool,
    /// Prepend the UTF-8 BOM to the bytes handed to the file sink.
    pub use_bom: bool,
    /// Save as `.txt` / `text/plain` instead of `.csv` / `text/csv`.
    pub use_text_file: bool,
    /// Explicit field order. Overrides the first record's key order.
    pub headers: Option<Vec<String>>,
    /// Rows rendered above the header row, one row per block.
    pub additional_headers: Vec<ZiAdditionalHeader>,
    /// Emit `title` as a single-cell first row.
    pub show_title: bool,
    /// Replaces `.` in the textual form of non-integer numbers.
    pub decimal_separator: String,
    /// Quote every string-typed data cell, not only the ones that need it.
    pub quote_strings: bool,
}

impl Default for ZiCsvConfig {
    fn default() -> Self {
        Self {
            title: None,
            filename: None,
            field_separator: DEFAULT_FIELD_SEPARATOR.to_string(),
            use_keys_as_headers: false,
            use_bom: false,
            use_text_file: false,
            headers: None,
            additional_headers: Vec::new(),
            show_title: false,
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR.to_string(),
            quote_strings: false,
        }
    }
}

impl ZiCsvConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Checks option combinations that would produce unreadable output.
    pub fn validate(&self) -> Result<()> {
        if self.field_separator.is_empty() {
            return Err(ZiError::validation("field separator must not be empty"));
        }
        if self
            .field_separator
            .contains(|c: char| c == '"' || c == '\r' || c == '\n')
        {
            return Err(ZiError::validation(format!(
                "field separator {:?} must not contain quotes or line breaks",
                self.field_separator
            )));
        }
        if self.decimal_separator.is_empty() {
            return Err(ZiError::validation("decimal separator must not be empty"));
        }
        if self.show_title && self.title.is_none() {
            return Err(ZiError::validation("showTitle requires a title"));
        }
        Ok(())
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        if self.use_text_file {
            "txt"
        } else {
            "csv"
        }
    }

    pub fn mime_type(&self) -> &'static str {
        if self.use_text_file {
            TEXT_MIME_TYPE
        } else {
            CSV_MIME_TYPE
        }
    }

    /// Name of the saved artifact: `filename`, else `title`, else
    /// `generated`, normalized and suffixed with the extension.
    pub fn output_filename(&self) -> String {
        let base = self
            .filename
            .as_deref()
            .or(self.title.as_deref())
            .map(normalize_filename)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        format!("{}.{}", base, self.extension())
    }
}

/// Trims the name and turns whitespace runs and path separators into `_`.
fn normalize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_gap = false;
    for ch in name.trim().chars() {
        if ch.is_whitespace() || ch == '/' || ch == '\\' {
            pending_gap = true;
            continue;
        }
        if pending_gap {
            out.push('_');
            pending_gap = false;
        }
        out.push(ch);
    }
    out
}
