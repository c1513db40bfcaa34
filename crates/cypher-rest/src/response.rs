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

//! Interpret transactional endpoint responses.
//!
//! A response body looks like:
//!
//! ```json
//! {
//!   "commit": "http://localhost:7474/db/data/transaction/7/commit",
//!   "transaction": {"expires": "Fri, 17 Oct 2025 10:00:00 +0000"},
//!   "results": [{"columns": ["n"], "data": [{"row": [1]}]}],
//!   "errors": []
//! }
//! ```
//!
//! [`parse_results`] pulls transaction metadata into [`TransactionInfo`],
//! surfaces server-reported errors and hands `results` to the
//! [`mapping`](crate::mapping) module.

use crate::cypher::Statement;
use crate::error::{RestError, TransportError};
use crate::mapping::{map_results, MappedResults};
use crate::transport::HttpResponse;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

static COMMIT_LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/transaction/(\d+)/commit").expect("commit location pattern is valid")
});

/// An error reported by the server in the `errors` array.
///
/// The entry is kept exactly as the server sent it, extra fields such as
/// `stackTrace` included, and serializes back to that value. `code` and
/// `message` are read from it for convenience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct ServerError {
    /// Neo4j status code, e.g. `Neo.ClientError.Statement.SyntaxError`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    raw: Value,
}

impl ServerError {
    /// Create a server error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let message = message.into();
        let raw = serde_json::json!({"code": code, "message": message});
        Self { code, message, raw }
    }

    /// Read a server error leniently: missing or non-string fields become
    /// empty, and a non-object entry becomes the message.
    pub fn from_value(value: &Value) -> Self {
        let (code, message) = match value {
            Value::Object(obj) => {
                let field = |key: &str| match obj.get(key) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                };
                (field("code"), field("message"))
            }
            Value::String(s) => (String::new(), s.clone()),
            other => (String::new(), other.to_string()),
        };
        Self {
            code,
            message,
            raw: value.clone(),
        }
    }

    /// The entry as the server sent it.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl From<Value> for ServerError {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<ServerError> for Value {
    fn from(error: ServerError) -> Self {
        error.raw
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Metadata about one call, delivered to every callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionInfo {
    /// The statements that were submitted.
    pub statements: Vec<Statement>,
    /// Server-reported errors; always present, possibly empty.
    pub errors: Vec<ServerError>,
    /// Transaction ID parsed from the `commit` URI.
    #[serde(rename = "transactionId", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<u64>,
    /// Server transaction expiry (`transaction.expires`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

impl TransactionInfo {
    /// Info for a call submitting `statements`.
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            ..Self::default()
        }
    }
}

/// Extract the transaction ID from a commit URI.
///
/// ```
/// # use cypher_rest::transaction_id_from_commit;
/// assert_eq!(
///     transaction_id_from_commit("http://h:7474/db/data/transaction/42/commit"),
///     Some(42)
/// );
/// assert_eq!(transaction_id_from_commit("http://h:7474/db/data/transaction/commit"), None);
/// ```
pub fn transaction_id_from_commit(location: &str) -> Option<u64> {
    COMMIT_LOCATION
        .captures(location)
        .and_then(|caps| caps.get(1))
        .and_then(|id| id.as_str().parse().ok())
}

/// Interpret a transport outcome and invoke `callback` exactly once.
///
/// On any failure the callback receives the error and empty results; `info`
/// is always passed through, with whatever metadata was read before the
/// failure was detected.
pub fn parse_results<F, R>(
    outcome: Result<HttpResponse, TransportError>,
    mut info: TransactionInfo,
    callback: F,
) -> R
where
    F: FnOnce(Option<RestError>, MappedResults, TransactionInfo) -> R,
{
    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, timeout = err.timeout, "transport failure");
            info.errors.clear();
            return callback(Some(err.into()), Vec::new(), info);
        }
    };

    let status = response.status;
    let success = response.is_success();
    let mut body = match response.body {
        None => return callback(Some(RestError::MissingBody), Vec::new(), info),
        Some(Value::Object(body)) => body,
        Some(other) => {
            return callback(
                Some(RestError::InvalidBody(describe_body(status, &other))),
                Vec::new(),
                info,
            )
        }
    };

    if let Some(expires) = body
        .get("transaction")
        .and_then(|tx| tx.get("expires"))
        .and_then(Value::as_str)
    {
        info.timeout = Some(expires.to_string());
    }

    if let Some(location) = body.get("commit").and_then(Value::as_str) {
        match transaction_id_from_commit(location) {
            Some(id) => info.transaction_id = Some(id),
            None => {
                return callback(
                    Some(RestError::invalid_commit_location(location)),
                    Vec::new(),
                    info,
                )
            }
        }
    }

    let errors = server_errors(&body);
    if !errors.is_empty() {
        warn!(status, count = errors.len(), first = %errors[0], "server reported query errors");
        info.errors = errors.clone();
        return callback(Some(RestError::ServerQuery { errors }), Vec::new(), info);
    }

    if !success {
        return callback(
            Some(RestError::InvalidBody(format!(
                "HTTP status {} without server errors",
                status
            ))),
            Vec::new(),
            info,
        );
    }

    let results = body.remove("results").unwrap_or(Value::Null);
    let mapped = map_results(results);
    debug!(statements = mapped.len(), "mapped results");
    callback(None, mapped, info)
}

fn server_errors(body: &Map<String, Value>) -> Vec<ServerError> {
    match body.get("errors") {
        Some(Value::Array(errors)) => errors.iter().map(ServerError::from_value).collect(),
        _ => Vec::new(),
    }
}

fn describe_body(status: u16, body: &Value) -> String {
    const LIMIT: usize = 120;
    let text = match body {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let snippet: String = text.chars().take(LIMIT).collect();
    format!("expected a JSON object (HTTP status {}): {}", status, snippet)
}
