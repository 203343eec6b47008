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

//! # Configuration
//!
//! Settings come from three places, in increasing priority:
//! 1. Built-in defaults (the production monitoring job).
//! 2. An optional YAML or JSON file passed with `--config`.
//! 3. Command-line overrides.

use crate::domain::errors::{ExportError, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;

/// Service account key the monitoring job authenticates to GCS with.
pub const DEFAULT_CREDENTIALS_PATH: &str = "/home/devdb/poised-runner-396506-ad1cdb4cec46.json";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub export: ExportConfig,
    pub gcs: GcsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    /// Falls back to `MYSQL_PASSWORD` when absent.
    pub password: Option<String>,
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            username: "root".to_string(),
            password: None,
            database: "drums".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Resolves the password from config, then from the environment.
    pub fn resolve_password(&self) -> Option<String> {
        self.password
            .clone()
            .or_else(|| std::env::var("MYSQL_PASSWORD").ok())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    pub table: String,
    pub timestamp_column: String,
    /// Size of the trailing time window, in minutes.
    pub window_minutes: u32,
    /// Directory that temporarily holds the CSV before upload.
    pub local_dir: String,
    pub file_prefix: String,
    /// Compare remote and local sizes before deleting the local file.
    pub verify_upload: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            table: "monitoring".to_string(),
            timestamp_column: "TimeStamp".to_string(),
            window_minutes: 480,
            local_dir: "/tmp".to_string(),
            file_prefix: "monitoring".to_string(),
            verify_upload: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GcsConfig {
    pub bucket: String,
    /// Folder inside the bucket; objects land at `<folder>/<file>`.
    pub folder: String,
    /// Service account key exported as `GOOGLE_APPLICATION_CREDENTIALS`.
    pub credentials_path: Option<String>,
}

impl Default for GcsConfig {
    fn default() -> Self {
        Self {
            bucket: "rockset".to_string(),
            folder: "drums".to_string(),
            credentials_path: Some(DEFAULT_CREDENTIALS_PATH.to_string()),
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    // Overrides for ad-hoc runs
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub database: Option<String>,
    #[arg(long)]
    pub table: Option<String>,
    #[arg(long)]
    pub timestamp_column: Option<String>,
    #[arg(long)]
    pub window_minutes: Option<u32>,
    #[arg(long)]
    pub local_dir: Option<String>,
    #[arg(long)]
    pub file_prefix: Option<String>,
    #[arg(long)]
    pub bucket: Option<String>,
    #[arg(long)]
    pub folder: Option<String>,
    /// Path to a GCP credentials JSON file
    #[arg(long)]
    pub credentials: Option<String>,
    /// Check the uploaded object's size before removing the local file
    #[arg(long)]
    pub verify_upload: bool,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: AppConfig = if path.ends_with(".json") {
            serde_json::from_str(&contents).map_err(|e| ExportError::ConfigError(e.to_string()))?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ExportError::ConfigError(e.to_string()))?
        };

        Ok(config)
    }

    /// Builds the effective configuration for a run.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_cli(args);
        config.validate()?;
        Ok(config)
    }

    pub fn merge_cli(&mut self, args: &CliArgs) {
        if let Some(h) = &args.host { self.database.host = h.clone(); }
        if let Some(p) = args.port { self.database.port = p; }
        if let Some(u) = &args.username { self.database.username = u.clone(); }
        if let Some(p) = &args.password { self.database.password = Some(p.clone()); }
        if let Some(d) = &args.database { self.database.database = d.clone(); }
        if let Some(t) = &args.table { self.export.table = t.clone(); }
        if let Some(c) = &args.timestamp_column { self.export.timestamp_column = c.clone(); }
        if let Some(w) = args.window_minutes { self.export.window_minutes = w; }
        if let Some(d) = &args.local_dir { self.export.local_dir = d.clone(); }
        if let Some(p) = &args.file_prefix { self.export.file_prefix = p.clone(); }
        if let Some(b) = &args.bucket { self.gcs.bucket = b.clone(); }
        if let Some(f) = &args.folder { self.gcs.folder = f.clone(); }
        if let Some(c) = &args.credentials { self.gcs.credentials_path = Some(c.clone()); }
        if args.verify_upload { self.export.verify_upload = true; }
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("database.host", &self.database.host),
            ("database.database", &self.database.database),
            ("export.table", &self.export.table),
            ("export.timestamp_column", &self.export.timestamp_column),
            ("export.local_dir", &self.export.local_dir),
            ("export.file_prefix", &self.export.file_prefix),
            ("gcs.bucket", &self.gcs.bucket),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ExportError::ConfigError(format!("{} must not be empty", name)));
            }
        }
        if self.export.window_minutes == 0 {
            return Err(ExportError::ConfigError(
                "export.window_minutes must be greater than zero".to_string(),
            ));
        }
        if self.export.file_prefix.contains('/') {
            return Err(ExportError::ConfigError(
                "export.file_prefix must not contain '/'".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_target_monitoring_job() {
        let config = AppConfig::default();
        assert_eq!(config.database.host, "127.0.0.1");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.database, "drums");
        assert_eq!(config.export.table, "monitoring");
        assert_eq!(config.export.window_minutes, 480);
        assert_eq!(config.export.local_dir, "/tmp");
        assert_eq!(config.gcs.bucket, "rockset");
        assert_eq!(config.gcs.folder, "drums");
        assert_eq!(
            config.gcs.credentials_path.as_deref(),
            Some(DEFAULT_CREDENTIALS_PATH)
        );
        assert!(!config.export.verify_upload);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_yaml_config() {
        let yaml = r#"
database:
  username: "exporter"
  host: "db.internal"
export:
  table: "heartbeat"
  window_minutes: 60
gcs:
  bucket: "metrics-archive"
  credentials_path: "/etc/gcp/key.json"
"#;
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{}", yaml).unwrap();
        let path = file.path().to_str().unwrap();

        let config = AppConfig::from_file(path).expect("Failed to parse config");

        assert_eq!(config.database.username, "exporter");
        assert_eq!(config.database.host, "db.internal");
        // untouched keys keep their defaults
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.export.table, "heartbeat");
        assert_eq!(config.export.window_minutes, 60);
        assert_eq!(config.export.timestamp_column, "TimeStamp");
        assert_eq!(config.gcs.bucket, "metrics-archive");
        assert_eq!(config.gcs.folder, "drums");
        assert_eq!(config.gcs.credentials_path.as_deref(), Some("/etc/gcp/key.json"));
    }

    #[test]
    fn test_load_json_config() {
        let json = r#"{ "export": { "local_dir": "/var/spool/export", "verify_upload": true } }"#;
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", json).unwrap();

        let config = AppConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.export.local_dir, "/var/spool/export");
        assert!(config.export.verify_upload);
        assert_eq!(config.gcs.bucket, "rockset");
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "export: [not, a, map]").unwrap();
        let err = AppConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ExportError::ConfigError(_)));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let args = CliArgs::parse_from([
            "monitoring-gcs-exporter",
            "--table",
            "alarms",
            "--window-minutes",
            "15",
            "--folder",
            "drums/alarms",
            "--credentials",
            "/tmp/key.json",
            "--verify-upload",
        ]);
        let config = AppConfig::load(&args).unwrap();
        assert_eq!(config.export.table, "alarms");
        assert_eq!(config.export.window_minutes, 15);
        assert_eq!(config.gcs.folder, "drums/alarms");
        assert_eq!(config.gcs.credentials_path.as_deref(), Some("/tmp/key.json"));
        assert!(config.export.verify_upload);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.export.window_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.gcs.bucket = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.export.file_prefix = "nested/monitoring".to_string();
        assert!(config.validate().is_err());
    }
}
