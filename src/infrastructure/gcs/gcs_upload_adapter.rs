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

//! Infrastructure adapter for uploading files to Google Cloud Storage.

use crate::domain::entities::RemoteObject;
use crate::domain::errors::{ExportError, Result};
use crate::ports::object_uploader::ObjectUploader;
use log::{debug, info};
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Concrete implementation of `ObjectUploader` backed by `object_store`.
///
/// In production the store is GCS, authenticated through the application
/// default credentials found in the environment. Any other `ObjectStore`
/// can be injected with `with_store`.
pub struct GcsUploadAdapter {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    runtime: Arc<Runtime>,
}

impl GcsUploadAdapter {
    /// Builds a GCS client for `bucket`, reading credentials from the
    /// `GOOGLE_*` environment variables (`GOOGLE_APPLICATION_CREDENTIALS`).
    pub fn for_bucket(bucket: &str, runtime: Arc<Runtime>) -> Result<Self> {
        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| ExportError::StorageError(format!("GCS: {}", e)))?;
        Ok(Self::with_store(Arc::new(store), bucket, runtime))
    }

    pub fn with_store(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        runtime: Arc<Runtime>,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            runtime,
        }
    }

    fn object_path(&self, destination: &RemoteObject) -> Result<ObjectPath> {
        if destination.bucket != self.bucket {
            return Err(ExportError::StorageError(format!(
                "client is bound to bucket {}, refusing {}",
                self.bucket, destination
            )));
        }
        ObjectPath::parse(&destination.path)
            .map_err(|e| ExportError::StorageError(format!("invalid object path: {}", e)))
    }
}

impl ObjectUploader for GcsUploadAdapter {
    fn upload(&self, local_path: &Path, destination: &RemoteObject) -> Result<()> {
        let location = self.object_path(destination)?;
        let data = std::fs::read(local_path)?;
        let size = data.len();

        info!("Uploading {} ({} bytes) to {}", local_path.display(), size, destination);
        let result = self
            .runtime
            .block_on(self.store.put(&location, PutPayload::from(data)))?;
        debug!("Upload of {} acknowledged (etag {:?})", destination, result.e_tag);

        Ok(())
    }

    fn object_size(&self, destination: &RemoteObject) -> Result<u64> {
        let location = self.object_path(destination)?;
        let meta = self.runtime.block_on(self.store.head(&location))?;
        Ok(meta.size as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn runtime() -> Arc<Runtime> {
        Arc::new(
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap(),
        )
    }

    fn adapter() -> (GcsUploadAdapter, Arc<InMemory>, Arc<Runtime>) {
        let store = Arc::new(InMemory::new());
        let rt = runtime();
        let adapter = GcsUploadAdapter::with_store(store.clone(), "rockset", rt.clone());
        (adapter, store, rt)
    }

    #[test]
    fn test_upload_stores_file_bytes() {
        let (adapter, store, rt) = adapter();
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("monitoring-20240202101500.csv");
        std::fs::write(&local, "id,TimeStamp\n1,2024-02-02 10:00:00\n").unwrap();

        let dest = RemoteObject::new("rockset", "drums/monitoring-20240202101500.csv");
        adapter.upload(&local, &dest).unwrap();

        let stored = rt
            .block_on(async {
                store
                    .get(&ObjectPath::from("drums/monitoring-20240202101500.csv"))
                    .await
                    .unwrap()
                    .bytes()
                    .await
            })
            .unwrap();
        assert_eq!(&stored[..], b"id,TimeStamp\n1,2024-02-02 10:00:00\n");
        assert_eq!(adapter.object_size(&dest).unwrap(), stored.len() as u64);
        // the uploader never touches the local file
        assert!(local.exists());
    }

    #[test]
    fn test_missing_local_file_is_io_error() {
        let (adapter, _, _) = adapter();
        let dest = RemoteObject::new("rockset", "drums/missing.csv");
        let res = adapter.upload(Path::new("/nonexistent/missing.csv"), &dest);
        assert!(matches!(res, Err(ExportError::IoError(_))));
    }

    #[test]
    fn test_wrong_bucket_is_rejected() {
        let (adapter, _, _) = adapter();
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("a.csv");
        std::fs::write(&local, "id\n").unwrap();

        let res = adapter.upload(&local, &RemoteObject::new("other", "drums/a.csv"));
        assert!(matches!(res, Err(ExportError::StorageError(_))));
    }

    #[test]
    fn test_object_size_of_missing_object_is_storage_error() {
        let (adapter, _, _) = adapter();
        let res = adapter.object_size(&RemoteObject::new("rockset", "drums/nope.csv"));
        assert!(matches!(res, Err(ExportError::StorageError(_))));
    }
}
