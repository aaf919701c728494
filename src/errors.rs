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

//! # Zi CSV Error Module
//!
//! This module defines the error types used throughout the CSV export library.
//!
//! ## Error Categories
//!
//! - **InvalidRecordShape**: A record field holds a value that cannot be
//!   reduced to a single cell (arrays, nested objects)
//! - **EnvironmentUnsupported**: A file download was requested but no host
//!   mechanism is available
//! - **Validation**: Invalid configuration or sink arguments
//! - **Io**: Filesystem errors raised by file sinks
//! - **Serde**: Configuration or record (de)serialization errors
//!
//! Formatting errors (`InvalidRecordShape`) and environment errors
//! (`EnvironmentUnsupported`) are separate variants so callers can tell a
//! data problem from a host problem.
//!
//! ## Usage
//!
//! ```rust
//! use zicsv::errors::{Result, ZiError};
//!
//! fn check_separator(separator: &str) -> Result<()> {
//!     if separator.is_empty() {
//!         return Err(ZiError::validation("field separator must not be empty"));
//!     }
//!     Ok(())
//! }
//! ```

use std::io;

use thiserror::Error;

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration for CSV export.
#[derive(Debug, Error)]
pub enum ZiError {
    /// A record value cannot be rendered as a single cell.
    #[error("invalid record shape: field '{field}' holds a {kind} value")]
    InvalidRecordShape { field: String, kind: String },

    /// The host offers no way to save the generated file.
    #[error("environment unsupported: {0}")]
    EnvironmentUnsupported(String),

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<io::Error> for ZiError {
    fn from(err: io::Error) -> Self {
        ZiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl ZiError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct record shape errors.
    pub fn invalid_shape(field: impl Into<String>, kind: impl Into<String>) -> Self {
        ZiError::InvalidRecordShape {
            field: field.into(),
            kind: kind.into(),
        }
    }

    /// Helper to construct environment errors.
    pub fn unsupported<T: Into<String>>(message: T) -> Self {
        ZiError::EnvironmentUnsupported(message.into())
    }
}
