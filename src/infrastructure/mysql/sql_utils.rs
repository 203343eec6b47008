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

//! Utility functions for generating MySQL statements.
//!
//! Identifiers come from configuration, never from row data, but they are
//! still quoted so names like `TimeStamp` or `order` parse unambiguously.

/// Quotes a MySQL identifier with backticks, doubling embedded backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Builds the trailing-window SELECT used by the query step.
///
/// `window_minutes` is an integer, so it is inlined as a literal.
pub fn build_window_query(table: &str, timestamp_column: &str, window_minutes: u32) -> String {
    format!(
        "SELECT * FROM {} WHERE {} >= NOW() - INTERVAL {} MINUTE",
        quote_identifier(table),
        quote_identifier(timestamp_column),
        window_minutes
    )
}

/// Checks if a MySQL column type never carries text.
///
/// `BINARY`/`BLOB` names are not enough: the server flags character columns
/// with a `_bin` collation the same way, so those are decided per value.
pub fn is_opaque_binary_type(type_name: &str) -> bool {
    let upper = type_name.to_uppercase();
    let base = upper.split('(').next().unwrap_or("").trim();
    matches!(base, "BIT" | "GEOMETRY")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("monitoring"), "`monitoring`");
        assert_eq!(quote_identifier("odd`name"), "`odd``name`");
    }

    #[test]
    fn test_build_window_query() {
        assert_eq!(
            build_window_query("monitoring", "TimeStamp", 480),
            "SELECT * FROM `monitoring` WHERE `TimeStamp` >= NOW() - INTERVAL 480 MINUTE"
        );
    }

    #[test]
    fn test_is_opaque_binary_type() {
        assert!(is_opaque_binary_type("BIT"));
        assert!(is_opaque_binary_type("geometry"));
        assert!(!is_opaque_binary_type("BLOB"));
        assert!(!is_opaque_binary_type("VARBINARY"));
        assert!(!is_opaque_binary_type("TEXT"));
        assert!(!is_opaque_binary_type("DATETIME"));
    }
}
