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

//! # Runtime Context
//!
//! Sets up the process-wide resources the adapters share:
//! 1. **Credentials**: points the GCS client at a key file via the environment.
//! 2. **Async Runtime**: one current-thread tokio runtime. The database driver
//!    and the object store are async, but the job itself is strictly
//!    sequential, so every adapter drives its futures with `block_on`.

use crate::config::AppConfig;
use crate::domain::errors::{ExportError, Result};
use log::info;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Environment variable read by the GCS client for application default credentials.
pub const CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// `RuntimeContext` holds shared resources that exist for the entire life of the app.
pub struct RuntimeContext {
    pub runtime: Arc<Runtime>,
}

impl RuntimeContext {
    pub fn init(config: &AppConfig) -> Result<Self> {
        if let Some(path) = &config.gcs.credentials_path {
            info!("Using GCP credentials from {}", path);
            std::env::set_var(CREDENTIALS_ENV_VAR, path);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ExportError::RuntimeError(format!("Failed to create runtime: {}", e)))?;

        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases live in one test: the variable is process-wide.
    #[test]
    fn test_init_exports_credentials_path() {
        let ctx = RuntimeContext::init(&AppConfig::default()).unwrap();
        assert_eq!(
            std::env::var(CREDENTIALS_ENV_VAR).unwrap(),
            crate::config::DEFAULT_CREDENTIALS_PATH
        );
        assert_eq!(ctx.runtime.block_on(async { 40 + 2 }), 42);

        let mut config = AppConfig::default();
        config.gcs.credentials_path = Some("/etc/gcp/exporter-key.json".to_string());
        RuntimeContext::init(&config).unwrap();
        assert_eq!(
            std::env::var(CREDENTIALS_ENV_VAR).unwrap(),
            "/etc/gcp/exporter-key.json"
        );
    }
}
