// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Domain Entities
//!
//! The "Nouns" of the exporter: the rows we pulled from the database, the CSV
//! file we wrote, the object we uploaded, and the report of a finished run.

use crate::domain::errors::{ExportError, Result};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// `ResultSet` is the in-memory table returned by the query step.
///
/// Every record holds exactly one value per column, in column order.
/// `None` stands for SQL NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    /// Creates an empty result set with a fixed column layout.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a record. Its width must match the header.
    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ExportError::DatabaseError(format!(
                "row {} has {} values for {} columns",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Views a single record as `(column name, value)` pairs in column order.
    pub fn record(&self, index: usize) -> Option<impl Iterator<Item = (&str, Option<&str>)>> {
        self.rows.get(index).map(|row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(Option::as_deref))
        })
    }
}

/// A CSV file written to local disk, waiting to be uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvArtifact {
    /// Full local path of the file.
    pub path: PathBuf,
    /// Bare file name, e.g. `monitoring-20240202101500.csv`.
    pub file_name: String,
    /// Number of data rows (header excluded).
    pub rows: u64,
    /// Size of the file on disk.
    pub bytes: u64,
}

/// The destination of an upload: a bucket plus an object path inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    pub bucket: String,
    pub path: String,
}

impl RemoteObject {
    pub fn new(bucket: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for RemoteObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gs://{}/{}", self.bucket, self.path)
    }
}

/// `RunReport` is the "Report Card" for one export run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub file_name: String,
    pub bucket: String,
    pub object_path: String,
    /// How many rows were exported.
    pub rows: u64,
    /// How many bytes were uploaded.
    pub bytes: u64,
    /// Whether the remote size was checked before the local file was removed.
    pub verified: bool,
    /// How long the whole run took (in seconds).
    pub duration: f64,
}
