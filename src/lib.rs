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

//! # Zi CSV Export Library
//!
//! Converts batches of flat records into CSV text, optionally prefixed with
//! a title row and additional header rows, and optionally saves the result
//! through a pluggable file sink.
//!
//! ## Module Overview
//!
//! - **record**: ZiRecord, the ordered field-to-scalar row type
//! - **config**: ZiCsvConfig export options and filename/MIME rules
//! - **export**: the CSV exporter, cell escaping, and file sinks
//! - **errors**: ZiError and the crate Result alias
//!
//! ## Quick Start
//!
//! ```rust
//! use zicsv::{ZiCsvConfig, ZiCsvExporter, ZiRecord};
//!
//! let records = vec![
//!     ZiRecord::new().with_field("name", "Test 1").with_field("age", 13),
//!     ZiRecord::new().with_field("name", "Test 2").with_field("age", 11),
//! ];
//!
//! let exporter = ZiCsvExporter::new(ZiCsvConfig {
//!     use_keys_as_headers: true,
//!     ..Default::default()
//! })?;
//!
//! assert_eq!(exporter.generate(&records, true)?, "name,age\nTest 1,13\nTest 2,11");
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, ZiError>`. Records holding arrays
//! or objects fail with `InvalidRecordShape`; a save request without a usable
//! sink fails with `EnvironmentUnsupported`.

pub mod config;
pub mod errors;
pub mod export;
pub mod record;

pub use config::{ZiAdditionalHeader, ZiCsvConfig};
pub use errors::{Result, ZiError};
pub use export::{
    ZiCsvExporter, ZiDirectorySink, ZiFileSink, ZiMemorySink, ZiNoopSink, ZiSavedFile,
};
pub use record::{records_from_serialize, ZiRecord, ZiRecordBatch};
