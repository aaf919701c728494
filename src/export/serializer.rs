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

//! # CSV Exporter
//!
//! Turns a batch of records into CSV text and optionally hands the encoded
//! file to a [`ZiFileSink`].
//!
//! ## Output Layout
//!
//! 1. Title row (`showTitle`)
//! 2. One row per additional header block, in configuration order
//! 3. Header row (`useKeysAsHeaders`)
//! 4. Data rows in input order
//!
//! Cells are joined with the field separator and rows with `\n`. The returned
//! string never carries the byte-order-mark; [`ZiCsvExporter::encode`] adds it
//! to the bytes that go to the sink.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::{ZiCsvConfig, UTF8_BOM};
use crate::errors::{Result, ZiError};
use crate::export::escape::{escape_cell, quote, scalar_text};
use crate::export::sink::ZiFileSink;
use crate::record::ZiRecord;

const ROW_SEPARATOR: &str = "\n";

/// Stateless CSV exporter bound to one configuration.
#[derive(Clone)]
pub struct ZiCsvExporter {
    config: ZiCsvConfig,
    sink: Option<Arc<dyn ZiFileSink>>,
}

impl fmt::Debug for ZiCsvExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZiCsvExporter")
            .field("config", &self.config)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl ZiCsvExporter {
    /// Creates an exporter after validating the configuration.
    pub fn new(config: ZiCsvConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, sink: None })
    }

    /// Attaches the sink used when `generate` is asked to save the file.
    pub fn with_sink(mut self, sink: Arc<dyn ZiFileSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &ZiCsvConfig {
        &self.config
    }

    /// Generates the CSV text for `records`.
    ///
    /// When `return_as_string_only` is false the encoded file is also saved
    /// through the attached sink, after the text is fully built. Without a
    /// sink that fails with `EnvironmentUnsupported`.
    pub fn generate(&self, records: &[ZiRecord], return_as_string_only: bool) -> Result<String> {
        let csv = self.render(records)?;
        if !return_as_string_only {
            self.save(&csv)?;
        }
        Ok(csv)
    }

    /// UTF-8 bytes of `csv`, prefixed with the BOM when `useBom` is set.
    pub fn encode(&self, csv: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(csv.len() + UTF8_BOM.len());
        if self.config.use_bom {
            bytes.extend_from_slice(UTF8_BOM);
        }
        bytes.extend_from_slice(csv.as_bytes());
        bytes
    }

    /// Column order for `records`: the configured `headers`, or the first
    /// record's field order.
    pub fn field_order(&self, records: &[ZiRecord]) -> Vec<String> {
        match &self.config.headers {
            Some(headers) => headers.clone(),
            None => records
                .first()
                .map(|record| record.keys().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }

    fn render(&self, records: &[ZiRecord]) -> Result<String> {
        let separator = self.config.field_separator.as_str();
        let fields = self.field_order(records);
        log::debug!(
            "exporting {} records over {} fields: {:?}",
            records.len(),
            fields.len(),
            fields
        );

        let mut rows: Vec<String> =
            Vec::with_capacity(records.len() + self.config.additional_headers.len() + 2);

        if self.config.show_title {
            if let Some(title) = &self.config.title {
                rows.push(escape_cell(title, separator));
            }
        }

        for block in &self.config.additional_headers {
            rows.push(self.join_labels(&block.columns));
        }

        if self.config.use_keys_as_headers {
            rows.push(self.join_labels(&fields));
        }

        for (index, record) in records.iter().enumerate() {
            self.warn_on_extra_fields(index, record, &fields);
            rows.push(self.render_record(record, &fields)?);
        }

        Ok(rows.join(ROW_SEPARATOR))
    }

    fn join_labels(&self, labels: &[String]) -> String {
        let separator = self.config.field_separator.as_str();
        labels
            .iter()
            .map(|label| escape_cell(label, separator))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn render_record(&self, record: &ZiRecord, fields: &[String]) -> Result<String> {
        let separator = self.config.field_separator.as_str();
        let mut cells = Vec::with_capacity(fields.len());
        for field in fields {
            let cell = match record.get(field) {
                None => String::new(),
                Some(value) => self.render_value(field, value)?,
            };
            cells.push(cell);
        }
        Ok(cells.join(separator))
    }

    fn render_value(&self, field: &str, value: &Value) -> Result<String> {
        let text = scalar_text(field, value, &self.config.decimal_separator)?;
        if self.config.quote_strings && value.is_string() {
            Ok(quote(&text))
        } else {
            Ok(escape_cell(&text, &self.config.field_separator))
        }
    }

    fn warn_on_extra_fields(&self, index: usize, record: &ZiRecord, fields: &[String]) {
        let extra: Vec<&str> = record
            .keys()
            .filter(|key| !fields.iter().any(|field| field == key))
            .collect();
        if !extra.is_empty() {
            log::warn!(
                "record {} has fields outside the column order, ignoring: {:?}",
                index,
                extra
            );
        }
    }

    fn save(&self, csv: &str) -> Result<()> {
        let sink = self.sink.as_ref().ok_or_else(|| {
            ZiError::unsupported("file download requested but no file sink is attached")
        })?;
        let filename = self.config.output_filename();
        let mime_type = self.config.mime_type();
        let bytes = self.encode(csv);
        log::info!(
            "handing '{}' ({}, {} bytes) to file sink",
            filename,
            mime_type,
            bytes.len()
        );
        sink.save(&bytes, &filename, mime_type)
    }
}
