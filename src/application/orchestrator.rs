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

//! The core application logic that drives one export run.
//!
//! Query, serialize, upload, clean up. Each step runs only after the previous
//! one returned `Ok`; the first error ends the run.

use crate::config::AppConfig as Config;
use crate::domain::entities::{CsvArtifact, RemoteObject, RunReport};
use crate::domain::errors::{ExportError, Result};
use crate::domain::naming::{artifact_file_name, destination_path};
use crate::ports::artifact_writer::ArtifactWriter;
use crate::ports::object_uploader::ObjectUploader;
use crate::ports::row_source::RowSource;
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates the export of one table window to one remote object.
pub struct Orchestrator {
    row_source: Arc<dyn RowSource>,
    artifact_writer: Arc<dyn ArtifactWriter>,
    uploader: Arc<dyn ObjectUploader>,
    config: Config,
}

impl Orchestrator {
    pub fn new(
        row_source: Arc<dyn RowSource>,
        artifact_writer: Arc<dyn ArtifactWriter>,
        uploader: Arc<dyn ObjectUploader>,
        config: Config,
    ) -> Self {
        Self {
            row_source,
            artifact_writer,
            uploader,
            config,
        }
    }

    /// Runs the export, naming the artifact after the current local time.
    pub fn run(&self) -> Result<RunReport> {
        self.run_at(chrono::Local::now().naive_local())
    }

    /// Runs the export with an explicit artifact timestamp.
    pub fn run_at(&self, now: NaiveDateTime) -> Result<RunReport> {
        let start_time = Instant::now();
        let export = &self.config.export;
        let gcs = &self.config.gcs;

        // 1. Query
        info!(
            "Fetching {} rows from the last {} minutes",
            export.table, export.window_minutes
        );
        let result_set = self.row_source.fetch_window(
            &export.table,
            &export.timestamp_column,
            export.window_minutes,
        )?;
        if result_set.is_empty() {
            info!("No rows in window, the CSV will contain only the header");
        } else if let Some(first) = result_set.record(0) {
            debug!("First row: {:?}", first.collect::<Vec<_>>());
        }

        // 2. Serialize
        let file_name = artifact_file_name(&export.file_prefix, &now);
        let artifact = self.artifact_writer.write_result_set(
            &result_set,
            Path::new(&export.local_dir),
            &file_name,
        )?;
        info!(
            "Wrote {} rows ({} bytes) to {}",
            artifact.rows,
            artifact.bytes,
            artifact.path.display()
        );

        // 3. Upload & clean up
        let destination = RemoteObject::new(
            gcs.bucket.as_str(),
            destination_path(&gcs.folder, &file_name),
        );
        let verified = self.upload_and_remove(&artifact, &destination)?;

        Ok(RunReport {
            file_name,
            bucket: destination.bucket,
            object_path: destination.path,
            rows: artifact.rows,
            bytes: artifact.bytes,
            verified,
            duration: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Uploads the artifact and deletes it locally once the store accepted it.
    ///
    /// The local file survives any error. Returns whether the remote size was
    /// checked.
    fn upload_and_remove(
        &self,
        artifact: &CsvArtifact,
        destination: &RemoteObject,
    ) -> Result<bool> {
        let local = artifact.path.display();

        if let Err(e) = self.uploader.upload(&artifact.path, destination) {
            warn!("Upload failed, keeping local file {}", local);
            return Err(e);
        }
        info!(
            "File {} uploaded to {} in bucket {}.",
            local, destination.path, destination.bucket
        );

        let verified = if self.config.export.verify_upload {
            let remote = self.uploader.object_size(destination).map_err(|e| {
                warn!("Could not verify {}, keeping local file {}", destination, local);
                e
            })?;
            if remote != artifact.bytes {
                warn!("Size mismatch for {}, keeping local file {}", destination, local);
                return Err(ExportError::VerificationError {
                    object: destination.to_string(),
                    local: artifact.bytes,
                    remote,
                });
            }
            true
        } else {
            false
        };

        std::fs::remove_file(&artifact.path)?;
        info!("Local file {} has been deleted.", local);

        Ok(verified)
    }
}
