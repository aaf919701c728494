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

//! # CSV Export Module
//!
//! ## Module Components
//!
//! - **Escape** ([escape.rs](escape/index.html)): Cell quoting and scalar text
//! - **Serializer** ([serializer.rs](serializer/index.html)): Record batch to CSV text
//! - **Sink** ([sink.rs](sink/index.html)): Download side effect capability
//!
//! ## Usage Patterns
//!
//! ### Returning the text only
//!
//! ```rust
//! use zicsv::config::ZiCsvConfig;
//! use zicsv::export::ZiCsvExporter;
//! use zicsv::record::ZiRecord;
//!
//! let records = vec![ZiRecord::new().with_field("name", "Test 1").with_field("age", 13)];
//! let exporter = ZiCsvExporter::new(ZiCsvConfig {
//!     use_keys_as_headers: true,
//!     ..Default::default()
//! })?;
//! let csv = exporter.generate(&records, true)?;
//! assert_eq!(csv, "name,age\nTest 1,13");
//! ```
//!
//! ### Saving through a sink
//!
//! ```rust
//! use std::sync::Arc;
//! use zicsv::config::ZiCsvConfig;
//! use zicsv::export::{ZiCsvExporter, ZiDirectorySink};
//! use zicsv::record::ZiRecord;
//!
//! let records = vec![ZiRecord::new().with_field("name", "Test 1").with_field("age", 13)];
//! let config = ZiCsvConfig {
//!     title: Some("Test Csv".into()),
//!     use_keys_as_headers: true,
//!     ..Default::default()
//! };
//! let exporter = ZiCsvExporter::new(config)?
//!     .with_sink(Arc::new(ZiDirectorySink::new("downloads")));
//! exporter.generate(&records, false)?;
//! ```

pub mod escape;
pub mod serializer;
pub mod sink;

pub use escape::{escape_cell, needs_quoting};
pub use serializer::ZiCsvExporter;
pub use sink::{ZiDirectorySink, ZiFileSink, ZiMemorySink, ZiNoopSink, ZiSavedFile};
