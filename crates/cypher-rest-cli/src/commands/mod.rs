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

//! Command implementations shared by the CLI subcommands.

use crate::cli::{ConnectionArgs, StatementArgs};
use crate::error::CliError;
use cypher_rest::{Argument, Client, MappedResults, RestError, Statement, TransactionInfo};
use serde_json::{json, Map, Value};
use tracing::debug;

/// A rendered output document and the error it reports, if any.
#[derive(Debug)]
pub struct Report {
    /// The JSON document printed to stdout.
    pub document: Value,
    /// The operation's error, which makes the command fail.
    pub error: Option<RestError>,
}

/// Build a client from connection options.
pub fn connect(connection: &ConnectionArgs) -> Client {
    debug!(url = %connection.url, timeout = ?connection.timeout, "building client");
    Client::from_config(&connection.config())
}

/// Turn command options into the positional argument list.
///
/// `--sub` values make the call a two-mapping call (substitutions, then
/// parameters, empty if `--params` is absent); `--params` alone binds as
/// parameters.
///
/// # Errors
///
/// Returns `Err` for malformed `--sub`, `--params` or `--statements` values.
pub fn arguments(tx: Option<u64>, options: &StatementArgs) -> Result<Vec<Argument>, CliError> {
    let mut args = Vec::new();
    if let Some(id) = tx {
        args.push(Argument::TransactionId(id));
    }

    if let Some(raw) = &options.statements {
        args.push(parse_statements(raw)?);
    } else {
        match options.template.as_slice() {
            [] => {}
            [text] => args.push(Argument::from(text.clone())),
            lines => args.push(Argument::from(lines.to_vec())),
        }
    }

    let substitutions = parse_substitutions(&options.substitutions)?;
    let parameters = options.params.as_deref().map(parse_params).transpose()?;
    match (substitutions, parameters) {
        (Some(substitutions), parameters) => {
            args.push(Argument::Mapping(substitutions));
            args.push(Argument::Mapping(parameters.unwrap_or_default()));
        }
        (None, Some(parameters)) => args.push(Argument::Mapping(parameters)),
        (None, None) => {}
    }
    Ok(args)
}

/// Parse repeated `KEY=VALUE` options into a substitution map.
///
/// Returns `None` when no substitutions were given. Only the first `=`
/// separates key from value.
pub fn parse_substitutions(raw: &[String]) -> Result<Option<Map<String, Value>>, CliError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                Ok((key.to_string(), Value::String(value.to_string())))
            }
            _ => Err(CliError::InvalidSubstitution(entry.clone())),
        })
        .collect::<Result<Map<_, _>, _>>()
        .map(Some)
}

/// Parse a `--params` JSON object.
pub fn parse_params(raw: &str) -> Result<Map<String, Value>, CliError> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CliError::invalid_json("--params", "expected a JSON object")),
        Err(e) => Err(CliError::invalid_json("--params", e.to_string())),
    }
}

fn parse_statements(raw: &str) -> Result<Argument, CliError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::invalid_json("--statements", e.to_string()))?;
    match Argument::from(value) {
        statements @ Argument::Statements(_) => Ok(statements),
        _ => Err(CliError::invalid_json(
            "--statements",
            "expected a JSON array of {statement, parameters} objects",
        )),
    }
}

/// Query callback rendering `{error, results, info}`.
pub fn report(error: Option<RestError>, results: MappedResults, info: TransactionInfo) -> Report {
    Report {
        document: json!({
            "error": error_document(error.as_ref()),
            "results": results,
            "info": info,
        }),
        error,
    }
}

/// Compose callback rendering `{error, statement}`.
pub fn compose_report(error: Option<RestError>, statement: Option<Statement>) -> Report {
    Report {
        document: json!({
            "error": error_document(error.as_ref()),
            "statement": statement,
        }),
        error,
    }
}

/// Print a report to stdout, failing when it carries an error.
///
/// # Errors
///
/// Returns [`CliError::Operation`] when the report holds an error.
pub fn print(report: Report) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(&report.document)?);
    match report.error {
        Some(error) => Err(CliError::Operation(error)),
        None => Ok(()),
    }
}

fn error_document(error: Option<&RestError>) -> Value {
    match error {
        None => Value::Null,
        Some(error) => json!({
            "kind": format!("{:?}", error.kind()),
            "message": error.to_string(),
            "errors": error.server_errors(),
        }),
    }
}
