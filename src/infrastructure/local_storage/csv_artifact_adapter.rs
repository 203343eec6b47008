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

//! Infrastructure adapter for writing result sets as CSV files on local disk.

use crate::domain::entities::{CsvArtifact, ResultSet};
use crate::domain::errors::{ExportError, Result};
use crate::ports::artifact_writer::ArtifactWriter;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::debug;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Concrete implementation of `ArtifactWriter` producing plain CSV.
///
/// Layout: one header row of column names, then one line per record, no
/// index column, `\n` line endings, fields quoted only when they contain a
/// delimiter, quote, or newline. NULL is written as an empty field.
pub struct CsvArtifactAdapter {
    delimiter: u8,
}

impl CsvArtifactAdapter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }
}

impl Default for CsvArtifactAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactWriter for CsvArtifactAdapter {
    fn write_result_set(
        &self,
        result_set: &ResultSet,
        output_dir: &Path,
        file_name: &str,
    ) -> Result<CsvArtifact> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(file_name);

        let file = File::create(&path)?;
        let buf_writer = BufWriter::with_capacity(128 * 1024, file);
        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(buf_writer);

        wtr.write_record(result_set.columns())?;
        for row in result_set.rows() {
            wtr.write_record(row.iter().map(|v| v.as_deref().unwrap_or("")))?;
        }

        // Flush and surface any buffered write error before reading the size.
        wtr.into_inner()
            .map_err(|e| ExportError::ArtifactError(e.to_string()))?
            .into_inner()
            .map_err(|e| ExportError::IoError(e.into_error()))?
            .sync_all()?;

        let bytes = fs::metadata(&path)?.len();
        debug!("Wrote {} ({} bytes)", path.display(), bytes);

        Ok(CsvArtifact {
            path,
            file_name: file_name.to_string(),
            rows: result_set.len() as u64,
            bytes,
        })
    }
}
