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

//! Well-formed response bodies.

use crate::TEST_TRANSACTION_URI;
use serde_json::{json, Value};

/// Expiry string used by the open-transaction fixtures.
pub const EXPIRES: &str = "Fri, 17 Oct 2025 10:00:00 +0000";

/// The commit URI the server reports for transaction `id`.
pub fn commit_uri(id: u64) -> String {
    format!("{}{}/commit", TEST_TRANSACTION_URI, id)
}

/// A response with no results and no errors.
pub fn empty_response() -> Value {
    json!({"results": [], "errors": []})
}

/// Response to opening transaction `id` without statements.
pub fn begin_response(id: u64) -> Value {
    open_response(id, json!([]))
}

/// Response from open transaction `id` carrying `results`.
pub fn open_response(id: u64, results: Value) -> Value {
    json!({
        "commit": commit_uri(id),
        "transaction": {"expires": EXPIRES},
        "results": results,
        "errors": []
    })
}

/// One statement result with the given columns and rows.
pub fn statement_result(columns: &[&str], rows: Vec<Value>) -> Value {
    let data: Vec<Value> = rows.into_iter().map(|row| json!({"row": row})).collect();
    json!({"columns": columns, "data": data})
}

/// A committed response carrying `results`.
pub fn results_response(results: Vec<Value>) -> Value {
    json!({"results": results, "errors": []})
}

/// Two users with `name` and `age` columns.
pub fn users_result() -> Value {
    statement_result(
        &["name", "age"],
        vec![json!(["Alice", 30]), json!(["Bob", 25])],
    )
}

/// A single node cell as the server returns it in row format.
pub fn node_result() -> Value {
    statement_result(
        &["n"],
        vec![json!([{"name": "Alice", "tags": ["admin", "ops"], "active": true}])],
    )
}
