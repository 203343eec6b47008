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

//! # Row Source Port
//!
//! This Port defines what it means to "read the recent rows" of a table.
//! It doesn't care IF the database is MySQL or a Mock for testing.

use crate::domain::entities::ResultSet;
use crate::domain::errors::Result;

/// `RowSource` produces the complete result set for one run.
pub trait RowSource: Send + Sync {
    /// Fetches every row of `table` whose `timestamp_column` falls inside the
    /// last `window_minutes` minutes of the database clock.
    fn fetch_window(
        &self,
        table: &str,
        timestamp_column: &str,
        window_minutes: u32,
    ) -> Result<ResultSet>;
}
