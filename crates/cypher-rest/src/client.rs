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

//! The transactional endpoint client.
//!
//! | Operation | Method | URL |
//! |-----------|--------|-----|
//! | [`Client::query`] without ID | POST | `<base>/commit` |
//! | [`Client::query`] with ID | POST | `<base>/<id>` |
//! | [`Client::begin`] | POST | `<base>` |
//! | [`Client::commit`] | POST | `<base>/<id>/commit` |
//! | [`Client::rollback`] | DELETE | `<base>/<id>` |
//! | [`Client::reset_timeout`] | POST | `<base>/<id>` (no statements) |
//!
//! `<base>` is the normalized `.../db/data/transaction/` URI.

use crate::args::{parse_arguments, Argument, CallShape, ParsedArguments, Payload};
use crate::config::{normalize_base_uri, ClientConfig};
use crate::cypher::{self, Statement};
use crate::error::{RestError, Result};
use crate::mapping::MappedResults;
use crate::response::{parse_results, TransactionInfo};
use crate::transport::{HttpTransport, Transport};
use serde_json::{json, Value};
use tracing::debug;

/// Values delivered to a query callback, collected into one struct.
#[derive(Debug)]
pub struct ResponseParts {
    /// The failure, if any.
    pub error: Option<RestError>,
    /// Mapped results; empty on failure.
    pub results: MappedResults,
    /// Call metadata.
    pub info: TransactionInfo,
}

impl ResponseParts {
    /// Convert into a `Result`, dropping `info` on failure.
    pub fn into_result(self) -> Result<(MappedResults, TransactionInfo)> {
        match self.error {
            Some(error) => Err(error),
            None => Ok((self.results, self.info)),
        }
    }
}

/// A callback that gathers its arguments into [`ResponseParts`].
///
/// ```no_run
/// # use cypher_rest::{args, collect, Client};
/// let client = Client::new("http://localhost:7474");
/// let (results, _info) = client.query(args!["RETURN 1 AS n"], collect).into_result()?;
/// assert_eq!(results[0][0]["n"], 1);
/// # Ok::<(), cypher_rest::RestError>(())
/// ```
pub fn collect(
    error: Option<RestError>,
    results: MappedResults,
    info: TransactionInfo,
) -> ResponseParts {
    ResponseParts {
        error,
        results,
        info,
    }
}

/// Client for Neo4j's transactional Cypher HTTP endpoint.
///
/// Every operation delivers its outcome to a callback exactly once, on the
/// calling thread, and returns whatever the callback returns. Each call builds
/// its own [`TransactionInfo`], so a client can be shared across threads when
/// its transport is `Sync`.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    base_uri: String,
    transport: T,
}

impl Client<HttpTransport> {
    /// Create a client for the server at `base_uri` with default settings.
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self::from_config(&ClientConfig::new().with_base_uri(base_uri))
    }

    /// Create a client from configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(&config.base_uri, HttpTransport::new(config))
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Self {
        Self::from_config(&ClientConfig::from_env())
    }
}

impl<T: Transport> Client<T> {
    /// Create a client that sends requests through `transport`.
    pub fn with_transport(base_uri: &str, transport: T) -> Self {
        Self {
            base_uri: normalize_base_uri(base_uri),
            transport,
        }
    }

    /// The normalized transactional endpoint, ending in `/db/data/transaction/`.
    pub fn base_transaction_uri(&self) -> &str {
        &self.base_uri
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run statements, in an open transaction when a leading ID is given or
    /// as a single-shot committed transaction otherwise.
    ///
    /// Accepts `[transaction_id,] template | lines | statements, [substitutions,] [parameters]`.
    pub fn query<F, R>(&self, args: Vec<Argument>, callback: F) -> R
    where
        F: FnOnce(Option<RestError>, MappedResults, TransactionInfo) -> R,
    {
        let parsed = parse_arguments(args, callback);
        let url = match parsed.transaction_id {
            Some(id) => self.transaction_uri(id),
            None => format!("{}commit", self.base_uri),
        };
        self.submit(url, parsed)
    }

    /// Open a transaction, optionally running statements in it.
    ///
    /// The new transaction ID is reported in [`TransactionInfo::transaction_id`].
    /// A leading transaction ID is a usage error.
    pub fn begin<F, R>(&self, args: Vec<Argument>, callback: F) -> R
    where
        F: FnOnce(Option<RestError>, MappedResults, TransactionInfo) -> R,
    {
        let parsed = parse_arguments(args, callback);
        if let Some(id) = parsed.transaction_id {
            return reject(
                parsed,
                RestError::usage(format!(
                    "begin opens a new transaction and does not accept a transaction ID (got {})",
                    id
                )),
            );
        }
        let url = self.base_uri.clone();
        self.submit(url, parsed)
    }

    /// Commit an open transaction, optionally running final statements.
    ///
    /// A missing transaction ID is a usage error and sends nothing.
    pub fn commit<F, R>(&self, args: Vec<Argument>, callback: F) -> R
    where
        F: FnOnce(Option<RestError>, MappedResults, TransactionInfo) -> R,
    {
        let parsed = parse_arguments(args, callback);
        let Some(id) = parsed.transaction_id else {
            return reject(parsed, RestError::usage("commit requires a transaction ID"));
        };
        let url = format!("{}/commit", self.transaction_uri(id));
        self.submit(url, parsed)
    }

    /// Roll back an open transaction.
    pub fn rollback<F, R>(&self, transaction_id: Option<u64>, callback: F) -> R
    where
        F: FnOnce(Option<RestError>, MappedResults, TransactionInfo) -> R,
    {
        let Some(id) = transaction_id else {
            return callback(
                Some(RestError::usage("rollback requires a transaction ID")),
                Vec::new(),
                TransactionInfo::default(),
            );
        };
        let url = self.transaction_uri(id);
        debug!(url = %url, "rolling back transaction");
        let outcome = self.transport.delete(&url);
        parse_results(outcome, TransactionInfo::default(), callback)
    }

    /// Keep an open transaction alive by submitting no statements to it.
    ///
    /// Goes through [`Client::query`], so the refreshed expiry arrives in
    /// [`TransactionInfo::timeout`].
    pub fn reset_timeout<F, R>(&self, transaction_id: Option<u64>, callback: F) -> R
    where
        F: FnOnce(Option<RestError>, MappedResults, TransactionInfo) -> R,
    {
        match transaction_id {
            Some(id) => self.query(vec![Argument::TransactionId(id)], callback),
            None => callback(
                Some(RestError::usage("resetTimeout requires a transaction ID")),
                Vec::new(),
                TransactionInfo::default(),
            ),
        }
    }

    /// Compose a statement without sending it.
    ///
    /// Accepts `template | lines, [substitutions,] [parameters]`.
    pub fn compose<F, R>(&self, args: Vec<Argument>, callback: F) -> R
    where
        F: FnOnce(Option<RestError>, Option<Statement>) -> R,
    {
        match compose_shape(&args) {
            Ok(()) => {}
            Err(error) => return callback(Some(error), None),
        }
        let parsed = parse_arguments(args, ());
        match parsed.error {
            Some(error) => callback(Some(error), None),
            None => callback(None, parsed.statements.into_iter().next()),
        }
    }

    /// Quote an identifier for safe interpolation. See [`cypher::escape()`].
    pub fn escape(&self, raw: &str) -> String {
        cypher::escape(raw)
    }

    fn transaction_uri(&self, id: u64) -> String {
        format!("{}{}", self.base_uri, id)
    }

    fn submit<F, R>(&self, url: String, parsed: ParsedArguments<F>) -> R
    where
        F: FnOnce(Option<RestError>, MappedResults, TransactionInfo) -> R,
    {
        let ParsedArguments {
            statements,
            callback,
            error,
            ..
        } = parsed;
        let info = TransactionInfo::new(statements);
        if let Some(error) = error {
            return callback(Some(error), Vec::new(), info);
        }
        let body = match request_body(&info.statements) {
            Ok(body) => body,
            Err(error) => return callback(Some(error), Vec::new(), info),
        };
        debug!(url = %url, statements = info.statements.len(), "submitting statements");
        let outcome = self.transport.post(&url, &body);
        parse_results(outcome, info, callback)
    }
}

fn compose_shape(args: &[Argument]) -> Result<()> {
    let shape = CallShape::classify(args)?;
    if shape.transaction_id {
        return Err(RestError::usage("compose does not accept a transaction ID"));
    }
    match shape.payload {
        Payload::Text | Payload::Lines => Ok(()),
        Payload::None => Err(RestError::usage("compose requires a template")),
        Payload::Statements => Err(RestError::usage(
            "compose requires a template, not pre-built statements",
        )),
    }
}

/// Fail a call before sending; an argument parse error takes precedence.
fn reject<F, R>(parsed: ParsedArguments<F>, error: RestError) -> R
where
    F: FnOnce(Option<RestError>, MappedResults, TransactionInfo) -> R,
{
    let error = parsed.error.unwrap_or(error);
    let info = TransactionInfo::new(parsed.statements);
    (parsed.callback)(Some(error), Vec::new(), info)
}

fn request_body(statements: &[Statement]) -> Result<Value> {
    Ok(json!({ "statements": serde_json::to_value(statements)? }))
}
