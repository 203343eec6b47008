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

//! Infrastructure adapter for reading the recent rows of a MySQL table.

use crate::config::DatabaseConfig;
use crate::domain::entities::ResultSet;
use crate::domain::errors::Result;
use crate::infrastructure::mysql::sql_utils::{build_window_query, is_opaque_binary_type};
use crate::ports::row_source::RowSource;
use base64::{engine::general_purpose, Engine as _};
use log::{debug, info};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, Connection, Executor, Row, Statement, TypeInfo};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Runtime;

/// Concrete implementation of `RowSource` for MySQL.
///
/// Opens one connection per fetch, prepares the statement to learn the
/// column layout (so an empty window still has a header), then pulls every
/// row into memory. The statement has no bind parameters and runs over the
/// text protocol, so each value arrives in the server's textual form.
pub struct MySqlSourceAdapter {
    options: MySqlConnectOptions,
    runtime: Arc<Runtime>,
}

impl MySqlSourceAdapter {
    /// Creates the adapter. No connection is made until `fetch_window`.
    pub fn new(config: &DatabaseConfig, runtime: Arc<Runtime>) -> Self {
        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .database(&config.database);
        if let Some(password) = config.resolve_password() {
            options = options.password(&password);
        }
        Self { options, runtime }
    }

    async fn fetch(&self, sql: &str) -> Result<ResultSet> {
        let mut conn = MySqlConnection::connect_with(&self.options).await?;

        // 1. Column layout, taken from the prepared statement because an
        // empty window returns no rows to read names from.
        let statement = (&mut conn).prepare(sql).await?;
        let mut names = Vec::with_capacity(statement.columns().len());
        let mut opaque = Vec::with_capacity(statement.columns().len());
        for col in statement.columns() {
            debug!("Column {} ({})", col.name(), col.type_info().name());
            names.push(col.name().to_string());
            opaque.push(is_opaque_binary_type(col.type_info().name()));
        }

        // 2. Rows
        let rows: Vec<MySqlRow> = (&mut conn).fetch_all(sql).await?;
        let mut result_set = ResultSet::new(names);
        for row in &rows {
            let mut record = Vec::with_capacity(opaque.len());
            for (i, is_opaque) in opaque.iter().enumerate() {
                let raw: Option<Vec<u8>> = row.try_get_unchecked(i)?;
                record.push(render_cell(raw.as_deref(), *is_opaque));
            }
            result_set.push_row(record)?;
        }

        conn.close().await?;
        Ok(result_set)
    }
}

impl RowSource for MySqlSourceAdapter {
    fn fetch_window(
        &self,
        table: &str,
        timestamp_column: &str,
        window_minutes: u32,
    ) -> Result<ResultSet> {
        let start_time = Instant::now();
        let sql = build_window_query(table, timestamp_column, window_minutes);
        info!("Executing: {}", sql);

        let result_set = self.runtime.block_on(self.fetch(&sql))?;

        info!(
            "Fetched {} rows x {} columns from {} in {:.2}s",
            result_set.len(),
            result_set.columns().len(),
            table,
            start_time.elapsed().as_secs_f64()
        );
        Ok(result_set)
    }
}

/// Renders one cell from its raw bytes.
///
/// NULL stays `None`. Values of opaque types, and any value that is not valid
/// UTF-8, become standard base64. Everything else is the server's text.
fn render_cell(raw: Option<&[u8]>, is_opaque: bool) -> Option<String> {
    let bytes = raw?;
    if !is_opaque {
        if let Ok(text) = std::str::from_utf8(bytes) {
            return Some(text.to_string());
        }
    }
    Some(general_purpose::STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ExportError;

    fn runtime() -> Arc<Runtime> {
        Arc::new(
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_render_cell_null_is_none() {
        assert_eq!(render_cell(None, false), None);
        assert_eq!(render_cell(None, true), None);
    }

    #[test]
    fn test_render_cell_text_values() {
        assert_eq!(
            render_cell(Some(b"2024-02-02 10:00:00"), false).as_deref(),
            Some("2024-02-02 10:00:00")
        );
        assert_eq!(render_cell(Some(b"-12.50"), false).as_deref(), Some("-12.50"));
        assert_eq!(render_cell(Some(b""), false).as_deref(), Some(""));
        // VARCHAR ... COLLATE utf8mb4_bin reports as VARBINARY but holds text
        assert_eq!(
            render_cell(Some("snare \u{2013} left".as_bytes()), false).as_deref(),
            Some("snare \u{2013} left")
        );
    }

    #[test]
    fn test_render_cell_binary_values() {
        // not valid UTF-8
        assert_eq!(
            render_cell(Some(&[0xff, 0x00, 0xfe]), false).as_deref(),
            Some("/wD+")
        );
        // BIT(8) b'01000001' is readable but still encoded
        assert_eq!(render_cell(Some(b"A"), true).as_deref(), Some("QQ=="));
    }

    #[test]
    fn test_unreachable_database_is_database_error() {
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            // nothing listens on port 1
            port: 1,
            username: "root".to_string(),
            password: Some("secret".to_string()),
            database: "drums".to_string(),
        };
        let adapter = MySqlSourceAdapter::new(&config, runtime());

        let err = adapter
            .fetch_window("monitoring", "TimeStamp", 480)
            .unwrap_err();
        assert!(matches!(err, ExportError::DatabaseError(_)), "{:?}", err);
    }
}
