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

//! # File Sink Module
//!
//! The download side effect of an export goes through [`ZiFileSink`], a
//! capability with one operation: save these bytes under this filename with
//! this MIME type.
//!
//! ## Implementations
//!
//! - [`ZiNoopSink`]: headless hosts; accepts and drops the file
//! - [`ZiMemorySink`]: keeps every saved file in memory for inspection
//! - [`ZiDirectorySink`]: saves into a download directory on the host

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::errors::{Result, ZiError};

/// Environment variable naming the download directory for [`ZiDirectorySink::from_env`].
pub const DOWNLOAD_DIR_ENV: &str = "ZICSV_DOWNLOAD_DIR";

/// Host capability for persisting a generated file.
pub trait ZiFileSink: Send + Sync {
    fn save(&self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<()>;
}

/// Sink for headless contexts. Every save succeeds and nothing is kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZiNoopSink;

impl ZiFileSink for ZiNoopSink {
    fn save(&self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<()> {
        log::debug!(
            "discarding {} bytes for '{}' ({}): no-op sink",
            bytes.len(),
            filename,
            mime_type
        );
        Ok(())
    }
}

/// A file handed to a [`ZiMemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZiSavedFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Sink that records every save, in call order.
#[derive(Debug, Default)]
pub struct ZiMemorySink {
    files: Mutex<Vec<ZiSavedFile>>,
}

impl ZiMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all saved files.
    pub fn files(&self) -> Vec<ZiSavedFile> {
        self.lock().clone()
    }

    /// Most recently saved file.
    pub fn last(&self) -> Option<ZiSavedFile> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the Vec half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<ZiSavedFile>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ZiFileSink for ZiMemorySink {
    fn save(&self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<()> {
        self.lock().push(ZiSavedFile {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

/// Saves files into a download directory.
///
/// Each save writes its own hidden temporary file and renames it into place,
/// so a reader never observes a partially written export and concurrent
/// saves of one filename do not collide. The last rename wins.
#[derive(Clone, Debug)]
pub struct ZiDirectorySink {
    dir: PathBuf,
}

impl ZiDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the directory named by `ZICSV_DOWNLOAD_DIR`.
    pub fn from_env() -> Result<Self> {
        match env::var_os(DOWNLOAD_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Ok(Self::new(dir)),
            _ => Err(ZiError::unsupported(format!(
                "no download directory configured; set {}",
                DOWNLOAD_DIR_ENV
            ))),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final location of `filename` inside the download directory.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf> {
        if filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains(|c: char| c == '/' || c == '\\')
        {
            return Err(ZiError::validation(format!(
                "invalid download filename {:?}",
                filename
            )));
        }
        Ok(self.dir.join(filename))
    }

}

impl ZiFileSink for ZiDirectorySink {
    fn save(&self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<()> {
        let path = self.path_for(filename)?;
        fs::create_dir_all(&self.dir)?;

        // Unique per save; removed on drop if any step before persist fails.
        let mut temp = tempfile::Builder::new()
            .prefix(&format!(".{}.", filename))
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|err| err.error)?;

        log::info!(
            "saved {} bytes to {} ({})",
            bytes.len(),
            path.display(),
            mime_type
        );
        Ok(())
    }
}
