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

use crate::domain::entities::{CsvArtifact, ResultSet};
use crate::domain::errors::Result;
use std::path::Path;

/// Port for serializing a result set into a local file.
pub trait ArtifactWriter: Send + Sync {
    /// Writes `result_set` as `<output_dir>/<file_name>`, creating the
    /// directory if needed.
    fn write_result_set(
        &self,
        result_set: &ResultSet,
        output_dir: &Path,
        file_name: &str,
    ) -> Result<CsvArtifact>;
}
