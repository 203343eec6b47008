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

//! # Monitoring Exporter for Google Cloud Storage
//!
//! A one-shot batch job: pulls the last few hours of a MySQL monitoring table,
//! writes them to a timestamped CSV, uploads the CSV to a GCS bucket and
//! removes the local copy.
//!
//! This application follows the **Hexagonal Architecture** (Ports and Adapters)
//! to keep the run sequence independent of MySQL, the filesystem, and GCS.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ports;

use crate::application::orchestrator::Orchestrator;
use crate::application::runtime::RuntimeContext;
use crate::config::{AppConfig, CliArgs};
use crate::infrastructure::gcs::gcs_upload_adapter::GcsUploadAdapter;
use crate::infrastructure::local_storage::csv_artifact_adapter::CsvArtifactAdapter;
use crate::infrastructure::mysql::mysql_source_adapter::MySqlSourceAdapter;
use clap::Parser;
use log::{debug, error, info};
use std::process;
use std::sync::Arc;

fn main() {
    // 1. Initialize Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Parse Arguments
    let args = CliArgs::parse();

    // 3. Load Config
    let config = match AppConfig::load(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    // 4. Runtime (credentials + async driver)
    let ctx = match RuntimeContext::init(&config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to initialize runtime: {}", e);
            process::exit(1);
        }
    };

    // 5. Initialize Hexagonal Components
    let row_source = Arc::new(MySqlSourceAdapter::new(
        &config.database,
        ctx.runtime.clone(),
    ));
    let artifact_writer = Arc::new(CsvArtifactAdapter::new());
    let uploader = match GcsUploadAdapter::for_bucket(&config.gcs.bucket, ctx.runtime.clone()) {
        Ok(u) => Arc::new(u),
        Err(e) => {
            error!("Failed to create storage client: {}", e);
            process::exit(1);
        }
    };

    // 6. Run Orchestrator
    let orchestrator = Orchestrator::new(row_source, artifact_writer, uploader, config);

    info!("Starting export...");
    match orchestrator.run() {
        Ok(report) => {
            info!(
                "Export finished: {} rows, {} bytes -> gs://{}/{} in {:.2}s",
                report.rows, report.bytes, report.bucket, report.object_path, report.duration
            );
            if let Ok(json) = serde_json::to_string(&report) {
                debug!("Run report: {}", json);
            }
        }
        Err(e) => {
            error!("Export failed: {}", e);
            process::exit(1);
        }
    }
}
