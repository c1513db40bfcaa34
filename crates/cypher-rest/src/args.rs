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

//! Argument parsing for the query-shaped client operations.
//!
//! Every query-shaped operation accepts the same positional shape:
//!
//! ```text
//! [transaction_id,] template | lines | statements, [substitutions,] [parameters]
//! ```
//!
//! followed by a callback. Arguments are an [`Argument`] list, usually built
//! with the [`args!`](crate::args!) macro, and are resolved in order:
//!
//! 1. A leading integer is the transaction ID.
//! 2. The next argument is the payload. A list of pre-built statements passes
//!    through untouched; a template is composed.
//! 3. Zero, one or two mappings follow. One mapping binds as parameters, two
//!    are substitutions then parameters.
//!
//! # Call shapes
//!
//! | Transaction ID | Payload | Mappings |
//! |----------------|---------|----------|
//! | optional | template text | 0, 1 (parameters) or 2 (substitutions, parameters) |
//! | optional | template lines | 0, 1 or 2 |
//! | optional | pre-built statements | 0, 1 or 2 (mappings are ignored) |
//! | optional | none | 0 |
//!
//! [`CallShape::DOCUMENTED`] enumerates every accepted shape.

use crate::cypher::{compose, Parameters, Statement, Substitutions, Template};
use crate::error::{RestError, Result};
use serde_json::{Map, Value};
use tracing::warn;

/// A single positional argument to a query-shaped operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Server-assigned transaction ID.
    TransactionId(u64),
    /// A statement template to compose.
    Template(Template),
    /// Pre-built statements, passed through without composition.
    Statements(Vec<Statement>),
    /// A substitution or parameter mapping.
    Mapping(Map<String, Value>),
    /// A value that fits no supported shape.
    Other(Value),
}

impl Argument {
    fn describe(&self) -> &'static str {
        match self {
            Argument::TransactionId(_) => "a transaction ID",
            Argument::Template(_) => "a template",
            Argument::Statements(_) => "a statement list",
            Argument::Mapping(_) => "a mapping",
            Argument::Other(_) => "an unsupported value",
        }
    }

    fn from_array(items: Vec<Value>) -> Self {
        if items.iter().all(Statement::is_statement_shaped) {
            let value = Value::Array(items);
            return match serde_json::from_value::<Vec<Statement>>(value.clone()) {
                Ok(statements) => Argument::Statements(statements),
                Err(_) => Argument::Other(value),
            };
        }
        let value = Value::Array(items);
        match Template::from_value(&value) {
            Some(template) => Argument::Template(template),
            None => Argument::Other(value),
        }
    }
}

impl From<u64> for Argument {
    fn from(id: u64) -> Self {
        Argument::TransactionId(id)
    }
}

impl From<u32> for Argument {
    fn from(id: u32) -> Self {
        Argument::TransactionId(u64::from(id))
    }
}

impl From<&str> for Argument {
    fn from(s: &str) -> Self {
        Argument::Template(s.into())
    }
}

impl From<String> for Argument {
    fn from(s: String) -> Self {
        Argument::Template(s.into())
    }
}

impl From<Vec<&str>> for Argument {
    fn from(lines: Vec<&str>) -> Self {
        Argument::Template(lines.into())
    }
}

impl From<Vec<String>> for Argument {
    fn from(lines: Vec<String>) -> Self {
        Argument::Template(lines.into())
    }
}

impl From<Template> for Argument {
    fn from(template: Template) -> Self {
        Argument::Template(template)
    }
}

impl From<Vec<Statement>> for Argument {
    fn from(statements: Vec<Statement>) -> Self {
        Argument::Statements(statements)
    }
}

impl From<Map<String, Value>> for Argument {
    fn from(map: Map<String, Value>) -> Self {
        Argument::Mapping(map)
    }
}

impl From<Value> for Argument {
    /// Classify a JSON value by shape.
    ///
    /// Non-negative integers are transaction IDs, strings and string arrays
    /// are templates, arrays of `{statement, parameters}` objects are
    /// pre-built statements (an empty array is an empty statement list) and
    /// objects are mappings.
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => match n.as_u64() {
                Some(id) => Argument::TransactionId(id),
                None => Argument::Other(Value::Number(n)),
            },
            Value::String(s) => Argument::Template(Template::Text(s)),
            Value::Object(map) => Argument::Mapping(map),
            Value::Array(items) => Argument::from_array(items),
            other => Argument::Other(other),
        }
    }
}

/// Build a `Vec<Argument>` from heterogeneous values.
///
/// ```
/// use cypher_rest::{args, Argument};
/// use serde_json::json;
///
/// let args = args![7u64, "MATCH (n:${label}) RETURN n", json!({"label": "User"}), json!({})];
/// assert_eq!(args.len(), 4);
/// assert_eq!(args[0], Argument::TransactionId(7));
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Argument>::new() };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Argument::from($arg)),+]
    };
}

/// The kind of payload in a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// No payload; the call carries no statements.
    None,
    /// A single template string.
    Text,
    /// A list of template lines.
    Lines,
    /// Pre-built statements.
    Statements,
}

/// A call shape: which positional arguments a call supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallShape {
    /// Whether a leading transaction ID is present.
    pub transaction_id: bool,
    /// The payload kind.
    pub payload: Payload,
    /// Number of trailing mappings.
    pub mappings: usize,
}

const fn shape(transaction_id: bool, payload: Payload, mappings: usize) -> CallShape {
    CallShape {
        transaction_id,
        payload,
        mappings,
    }
}

impl CallShape {
    /// Every call shape the query-shaped operations accept.
    pub const DOCUMENTED: &'static [CallShape] = &[
        shape(false, Payload::None, 0),
        shape(false, Payload::Text, 0),
        shape(false, Payload::Text, 1),
        shape(false, Payload::Text, 2),
        shape(false, Payload::Lines, 0),
        shape(false, Payload::Lines, 1),
        shape(false, Payload::Lines, 2),
        shape(false, Payload::Statements, 0),
        shape(false, Payload::Statements, 1),
        shape(false, Payload::Statements, 2),
        shape(true, Payload::None, 0),
        shape(true, Payload::Text, 0),
        shape(true, Payload::Text, 1),
        shape(true, Payload::Text, 2),
        shape(true, Payload::Lines, 0),
        shape(true, Payload::Lines, 1),
        shape(true, Payload::Lines, 2),
        shape(true, Payload::Statements, 0),
        shape(true, Payload::Statements, 1),
        shape(true, Payload::Statements, 2),
    ];

    /// Classify an argument list by the ordered dispatch predicates.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Usage`] when the arguments match no documented
    /// shape.
    pub fn classify(args: &[Argument]) -> Result<CallShape> {
        let transaction_id = matches!(args.first(), Some(Argument::TransactionId(_)));
        let rest = if transaction_id { &args[1..] } else { args };

        let payload = match rest.first() {
            None => Payload::None,
            Some(Argument::Template(Template::Text(_))) => Payload::Text,
            Some(Argument::Template(Template::Lines(_))) => Payload::Lines,
            Some(Argument::Statements(_)) => Payload::Statements,
            Some(other) => {
                return Err(RestError::usage(format!(
                    "expected a template or statement list, got {}",
                    other.describe()
                )))
            }
        };

        let trailing = rest.get(1..).unwrap_or_default();
        if let Some(bad) = trailing.iter().find(|a| !matches!(a, Argument::Mapping(_))) {
            return Err(RestError::usage(format!(
                "expected a substitution or parameter mapping, got {}",
                bad.describe()
            )));
        }
        if trailing.len() > 2 {
            return Err(RestError::usage(format!(
                "at most two mappings (substitutions, parameters) are accepted, got {}",
                trailing.len()
            )));
        }

        Ok(shape(transaction_id, payload, trailing.len()))
    }

    /// Whether this shape appears in [`CallShape::DOCUMENTED`].
    pub fn is_documented(&self) -> bool {
        Self::DOCUMENTED.contains(self)
    }
}

/// Normalized arguments for one call.
#[derive(Debug)]
pub struct ParsedArguments<C> {
    /// Leading transaction ID, if any.
    pub transaction_id: Option<u64>,
    /// Statements to submit; empty when `error` is set.
    pub statements: Vec<Statement>,
    /// The caller's callback.
    pub callback: C,
    /// Parse or composition failure to deliver through the callback.
    pub error: Option<RestError>,
}

/// Parse a positional argument list into statements.
///
/// Failures never escape: they are carried in [`ParsedArguments::error`] with
/// an empty statement list so the caller can still invoke the callback.
pub fn parse_arguments<C>(args: Vec<Argument>, callback: C) -> ParsedArguments<C> {
    let shape = match CallShape::classify(&args) {
        Ok(shape) => shape,
        Err(error) => {
            return ParsedArguments {
                transaction_id: None,
                statements: Vec::new(),
                callback,
                error: Some(error),
            }
        }
    };

    let mut args = args.into_iter();
    let transaction_id = if shape.transaction_id {
        match args.next() {
            Some(Argument::TransactionId(id)) => Some(id),
            _ => None,
        }
    } else {
        None
    };

    match resolve_statements(shape, args) {
        Ok(statements) => ParsedArguments {
            transaction_id,
            statements,
            callback,
            error: None,
        },
        Err(error) => ParsedArguments {
            transaction_id,
            statements: Vec::new(),
            callback,
            error: Some(error),
        },
    }
}

fn resolve_statements(
    shape: CallShape,
    mut args: impl Iterator<Item = Argument>,
) -> Result<Vec<Statement>> {
    let payload = args.next();
    let mut mappings = args.filter_map(|a| match a {
        Argument::Mapping(map) => Some(map),
        _ => None,
    });

    let (substitutions, parameters): (Option<Substitutions>, Option<Parameters>) =
        match shape.mappings {
            0 => (None, None),
            1 => (None, mappings.next()),
            _ => (mappings.next(), mappings.next()),
        };

    match payload {
        None => Ok(Vec::new()),
        Some(Argument::Statements(statements)) => {
            if shape.mappings > 0 {
                warn!(
                    mappings = shape.mappings,
                    "ignoring mappings passed with pre-built statements"
                );
            }
            Ok(statements)
        }
        Some(Argument::Template(template)) => {
            compose(template, substitutions.as_ref(), parameters).map(|stmt| vec![stmt])
        }
        Some(other) => Err(RestError::usage(format!(
            "expected a template or statement list, got {}",
            other.describe()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_value_shapes() {
        assert_eq!(Argument::from(json!(12)), Argument::TransactionId(12));
        assert_eq!(Argument::from(json!(-1)), Argument::Other(json!(-1)));
        assert_eq!(Argument::from(json!(1.5)), Argument::Other(json!(1.5)));
        assert_eq!(
            Argument::from(json!("RETURN 1")),
            Argument::Template(Template::Text("RETURN 1".into()))
        );
        assert_eq!(
            Argument::from(json!(["MATCH (n)", "RETURN n"])),
            Argument::Template(Template::Lines(vec!["MATCH (n)".into(), "RETURN n".into()]))
        );
        assert_eq!(
            Argument::from(json!([{"statement": "RETURN 1"}])),
            Argument::Statements(vec![Statement::new("RETURN 1")])
        );
        assert_eq!(Argument::from(json!([])), Argument::Statements(vec![]));
        assert_eq!(Argument::from(json!({"a": 1})), Argument::Mapping(map(json!({"a": 1}))));
        assert_eq!(Argument::from(json!(null)), Argument::Other(json!(null)));
        assert_eq!(
            Argument::from(json!(["RETURN 1", {"statement": "x"}])),
            Argument::Other(json!(["RETURN 1", {"statement": "x"}]))
        );
    }

    #[test]
    fn test_args_macro() {
        let args = args![3u64, "RETURN $x", json!({"x": 1})];
        assert_eq!(args[0], Argument::TransactionId(3));
        assert!(matches!(args[1], Argument::Template(_)));
        assert!(matches!(args[2], Argument::Mapping(_)));
        assert!(args![].is_empty());
    }

    #[test]
    fn test_documented_shapes_unique() {
        for (i, a) in CallShape::DOCUMENTED.iter().enumerate() {
            for b in &CallShape::DOCUMENTED[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(CallShape::DOCUMENTED.len(), 20);
    }

    #[test]
    fn test_classify_transaction_and_template() {
        let shape = CallShape::classify(&args![5u64, "RETURN 1"]).unwrap();
        assert_eq!(shape, shape_of(true, Payload::Text, 0));
        assert!(shape.is_documented());
    }

    fn shape_of(transaction_id: bool, payload: Payload, mappings: usize) -> CallShape {
        CallShape {
            transaction_id,
            payload,
            mappings,
        }
    }

    #[test]
    fn test_classify_rejects_three_mappings() {
        let err = CallShape::classify(&args!["RETURN 1", json!({}), json!({}), json!({})]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_classify_rejects_mapping_as_payload() {
        let err = CallShape::classify(&args![json!({"a": 1})]).unwrap_err();
        assert!(err.to_string().contains("got a mapping"));
    }

    #[test]
    fn test_classify_rejects_second_transaction_id() {
        let err = CallShape::classify(&args![1u64, 2u64]).unwrap_err();
        assert!(err.to_string().contains("got a transaction ID"));
    }

    #[test]
    fn test_classify_rejects_non_mapping_trailer() {
        let err = CallShape::classify(&args!["RETURN 1", "RETURN 2"]).unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn test_parse_single_mapping_is_parameters() {
        let parsed = parse_arguments(args!["RETURN $label", json!({"label": "x"})], ());
        assert!(parsed.error.is_none());
        assert_eq!(parsed.statements[0].statement, "RETURN $label");
        assert_eq!(parsed.statements[0].parameters, map(json!({"label": "x"})));
    }

    #[test]
    fn test_parse_two_mappings_are_substitutions_then_parameters() {
        let parsed = parse_arguments(
            args!["MATCH (n:${label}) RETURN n", json!({"label": "User"}), json!({"id": 1})],
            (),
        );
        assert!(parsed.error.is_none());
        assert_eq!(parsed.statements[0].statement, "MATCH (n:User) RETURN n");
        assert_eq!(parsed.statements[0].parameters, map(json!({"id": 1})));
    }

    #[test]
    fn test_parse_statements_pass_through() {
        let statements = vec![
            Statement::new("RETURN ${untouched}"),
            Statement::new("RETURN $a").with_param("a", 1),
        ];
        let parsed = parse_arguments(args![9u64, statements.clone()], ());
        assert_eq!(parsed.transaction_id, Some(9));
        assert_eq!(parsed.statements, statements);
    }

    #[test]
    fn test_parse_no_payload() {
        let parsed = parse_arguments(args![4u64], ());
        assert_eq!(parsed.transaction_id, Some(4));
        assert!(parsed.statements.is_empty());
        assert!(parsed.error.is_none());
    }

    #[test]
    fn test_parse_composition_failure_keeps_callback() {
        let parsed = parse_arguments(args![2u64, "RETURN ${missing}"], "callback");
        assert_eq!(parsed.callback, "callback");
        assert!(parsed.statements.is_empty());
        assert_eq!(parsed.error.map(|e| e.kind()), Some(ErrorKind::Substitution));
    }

    #[test]
    fn test_parse_usage_failure() {
        let parsed = parse_arguments(args![json!(null)], ());
        assert!(parsed.statements.is_empty());
        assert_eq!(parsed.error.map(|e| e.kind()), Some(ErrorKind::Usage));
    }
}
