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

//! Error payloads and malformed bodies.

use serde_json::{json, Value};

/// Neo4j status code for a Cypher syntax error.
pub const SYNTAX_ERROR: &str = "Neo.ClientError.Statement.SyntaxError";

/// A response reporting `count` syntax errors.
pub fn server_errors(count: usize) -> Value {
    let errors: Vec<Value> = (1..=count)
        .map(|i| json!({"code": SYNTAX_ERROR, "message": format!("Invalid input {}", i)}))
        .collect();
    json!({"results": [], "errors": errors})
}

/// A response whose commit URI carries no numeric transaction ID.
pub fn bad_commit_location() -> Value {
    json!({
        "commit": "http://localhost:7474/db/data/transaction/not-a-number/commit",
        "results": [],
        "errors": []
    })
}

/// Bodies that are valid JSON but not objects.
///
/// Each tuple contains (name, body).
pub fn non_object_bodies() -> Vec<(&'static str, Value)> {
    vec![
        ("html_text", Value::String("<html><body>Bad Gateway</body></html>".into())),
        ("array", json!([1, 2, 3])),
        ("number", json!(42)),
        ("null", Value::Null),
    ]
}

/// `results` payloads that the mapper must reduce to an empty result.
///
/// Each tuple contains (name, results).
pub fn malformed_results() -> Vec<(&'static str, Value)> {
    vec![
        ("not_an_array", json!("not an array")),
        ("result_not_object", json!([1])),
        ("missing_columns", json!([{"data": [{"row": [1]}]}])),
        ("columns_not_array", json!([{"columns": "n", "data": []}])),
        ("column_not_string", json!([{"columns": [1], "data": []}])),
        ("missing_data", json!([{"columns": ["n"]}])),
        ("data_not_array", json!([{"columns": ["n"], "data": {}}])),
        ("row_missing", json!([{"columns": ["n"], "data": [{"meta": []}]}])),
        ("row_not_array", json!([{"columns": ["n"], "data": [{"row": "x"}]}])),
    ]
}
