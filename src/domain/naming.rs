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

//! Naming rules for the CSV artifact and its remote object.

use chrono::NaiveDateTime;

/// Second-granularity timestamp layout used in artifact names (14 digits).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Builds `<prefix>-YYYYMMDDHHMMSS.csv` for the given wall-clock time.
pub fn artifact_file_name(prefix: &str, timestamp: &NaiveDateTime) -> String {
    format!("{}-{}.csv", prefix, timestamp.format(TIMESTAMP_FORMAT))
}

/// Joins the bucket folder and the file name into an object path.
pub fn destination_path(folder: &str, file_name: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", folder, file_name)
    }
}
