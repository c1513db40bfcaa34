// Dweve Cypher REST - Transactional Cypher-over-HTTP client
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reshape the REST column/row result format into row objects.
//!
//! | REST shape | Mapped shape |
//! |------------|--------------|
//! | `results[i]` | `mapped[i]` (one entry per submitted statement) |
//! | `results[i].data[j].row` | `mapped[i][j]` |
//! | `columns[k]` / `row[k]` | `mapped[i][j][columns[k]] = row[k]` |
//!
//! Mapping is fail-soft: any structural anomaly yields an empty result
//! instead of an error. When a row has a different number of cells than
//! there are columns, the row is truncated to the shorter of the two.
//!
//! Row keys keep the server's column order.

use serde_json::{Map, Value};
use tracing::debug;

/// One result row keyed by column name, in column order.
pub type Row = Map<String, Value>;

/// Mapped results: outer by statement, inner by row.
pub type MappedResults = Vec<Vec<Row>>;

/// Map the `results` array of a response body.
///
/// Cell values are moved, not copied or altered. Input that is not an array
/// of `{columns, data: [{row}]}` objects maps to an empty vector.
///
/// # Examples
///
/// ```
/// # use cypher_rest::map_results;
/// # use serde_json::json;
/// let mapped = map_results(json!([
///     {"columns": ["name", "age"], "data": [{"row": ["Alice", 30]}]}
/// ]));
/// assert_eq!(mapped[0][0]["name"], "Alice");
/// assert_eq!(mapped[0][0]["age"], 30);
///
/// assert!(map_results(json!("not an array")).is_empty());
/// ```
pub fn map_results(raw: Value) -> MappedResults {
    match try_map_results(raw) {
        Some(mapped) => mapped,
        None => {
            debug!("malformed results payload, mapping to empty results");
            Vec::new()
        }
    }
}

fn try_map_results(raw: Value) -> Option<MappedResults> {
    let Value::Array(results) = raw else {
        return None;
    };
    results.into_iter().map(map_statement_result).collect()
}

fn map_statement_result(result: Value) -> Option<Vec<Row>> {
    let Value::Object(mut result) = result else {
        return None;
    };
    let Value::Array(columns) = result.remove("columns")? else {
        return None;
    };
    let columns = columns
        .into_iter()
        .map(|column| match column {
            Value::String(name) => Some(name),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    let Value::Array(data) = result.remove("data")? else {
        return None;
    };
    data.into_iter().map(|entry| map_row(&columns, entry)).collect()
}

fn map_row(columns: &[String], entry: Value) -> Option<Row> {
    let Value::Object(mut entry) = entry else {
        return None;
    };
    let Value::Array(cells) = entry.remove("row")? else {
        return None;
    };
    if cells.len() != columns.len() {
        debug!(
            columns = columns.len(),
            cells = cells.len(),
            "row width differs from column count, truncating"
        );
    }
    Some(columns.iter().cloned().zip(cells).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps_each_statement() {
        let mapped = map_results(json!([
            {"columns": ["n"], "data": [{"row": [1]}, {"row": [2]}]},
            {"columns": ["a", "b"], "data": [{"row": ["x", {"k": [1, 2]}]}]},
        ]));
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].len(), 2);
        assert_eq!(mapped[0][1]["n"], json!(2));
        assert_eq!(mapped[1][0]["b"], json!({"k": [1, 2]}));
        assert_eq!(mapped[1][0].len(), 2);
    }

    #[test]
    fn test_empty_data_gives_empty_rows() {
        let mapped = map_results(json!([{"columns": ["n"], "data": []}]));
        assert_eq!(mapped, vec![Vec::<Row>::new()]);
    }

    #[test]
    fn test_empty_results() {
        assert!(map_results(json!([])).is_empty());
    }

    #[test]
    fn test_column_order_preserved_in_values() {
        let mapped = map_results(json!([
            {"columns": ["z", "a"], "data": [{"row": ["last", "first"]}]}
        ]));
        assert_eq!(mapped[0][0]["z"], "last");
        assert_eq!(mapped[0][0]["a"], "first");
    }

    #[test]
    fn test_row_keys_follow_column_order() {
        let mapped = map_results(json!([
            {"columns": ["name", "age", "city"], "data": [{"row": ["Alice", 30, "Oslo"]}]}
        ]));
        let keys: Vec<&str> = mapped[0][0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "age", "city"]);
        assert_eq!(
            serde_json::to_string(&mapped[0][0]).unwrap(),
            r#"{"name":"Alice","age":30,"city":"Oslo"}"#
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let mapped = map_results(json!([{
            "columns": ["n"],
            "data": [{"row": [1], "meta": [null], "graph": {}}],
            "stats": {"nodes_created": 0}
        }]));
        assert_eq!(mapped[0][0], json!({"n": 1}).as_object().cloned().unwrap());
    }

    #[test]
    fn test_short_row_truncates_columns() {
        let mapped = map_results(json!([{"columns": ["a", "b"], "data": [{"row": [1]}]}]));
        assert_eq!(mapped[0][0].len(), 1);
        assert_eq!(mapped[0][0]["a"], 1);
    }

    #[test]
    fn test_long_row_truncates_cells() {
        let mapped = map_results(json!([{"columns": ["a"], "data": [{"row": [1, 2, 3]}]}]));
        assert_eq!(mapped[0][0].len(), 1);
        assert_eq!(mapped[0][0]["a"], 1);
    }

    #[test]
    fn test_not_an_array() {
        assert!(map_results(json!("not an array")).is_empty());
        assert!(map_results(Value::Null).is_empty());
        assert!(map_results(json!({"columns": []})).is_empty());
    }

    #[test]
    fn test_any_malformed_result_empties_everything() {
        let cases = [
            json!([{"columns": ["n"], "data": [{"row": [1]}]}, 5]),
            json!([{"data": [{"row": [1]}]}]),
            json!([{"columns": "n", "data": [{"row": [1]}]}]),
            json!([{"columns": [1], "data": [{"row": [1]}]}]),
            json!([{"columns": ["n"]}]),
            json!([{"columns": ["n"], "data": {"row": [1]}}]),
            json!([{"columns": ["n"], "data": [{"graph": {}}]}]),
            json!([{"columns": ["n"], "data": [{"row": 1}]}]),
            json!([{"columns": ["n"], "data": [[1]]}]),
        ];
        for case in cases {
            assert!(map_results(case.clone()).is_empty(), "expected empty for {case}");
        }
    }
}
