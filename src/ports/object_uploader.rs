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

//! # Object Uploader Port
//!
//! The contract for shipping a finished file to cloud object storage.
//! The GCS adapter implements it for production; tests plug in fakes.

use crate::domain::entities::RemoteObject;
use crate::domain::errors::Result;
use std::path::Path;

/// `ObjectUploader` moves local files into a bucket.
pub trait ObjectUploader: Send + Sync {
    /// Uploads the bytes of `local_path` to `destination`.
    ///
    /// Returning `Ok` means the store accepted the whole object.
    fn upload(&self, local_path: &Path, destination: &RemoteObject) -> Result<()>;

    /// Size in bytes of an object already in the store.
    fn object_size(&self, destination: &RemoteObject) -> Result<u64>;
}
