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

//! Statement composition: template substitution and parameter binding.
//!
//! Substitution is a client-side text replacement of `${name}` placeholders,
//! typically used for labels and relationship types that Cypher cannot bind
//! as parameters. Pair it with [`escape`](super::escape()) for untrusted input:
//!
//! ```
//! # use cypher_rest::cypher::{compose, escape};
//! # use serde_json::{json, Map, Value};
//! let mut subs = Map::new();
//! subs.insert("label".into(), Value::String(escape("Person")));
//! let mut params = Map::new();
//! params.insert("name".into(), json!("Alice"));
//!
//! let stmt = compose("MATCH (n:${label} {name: $name}) RETURN n", Some(&subs), Some(params))?;
//! assert_eq!(stmt.statement, "MATCH (n:`Person` {name: $name}) RETURN n");
//! # Ok::<(), cypher_rest::RestError>(())
//! ```

use super::statement::{Parameters, Statement, Substitutions, Template};
use crate::error::{RestError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Compose a statement from a template, substitutions and parameters.
///
/// Every `${name}` placeholder must have an entry in `substitutions`; the
/// first missing one fails the whole composition. Unused substitution keys
/// are ignored. `parameters` is attached unchanged.
///
/// # Errors
///
/// - [`RestError::Substitution`] if a placeholder has no substitution.
/// - [`RestError::Usage`] if the resulting statement text is empty.
pub fn compose(
    template: impl Into<Template>,
    substitutions: Option<&Substitutions>,
    parameters: Option<Parameters>,
) -> Result<Statement> {
    let text = template.into().text();
    let statement = substitute(&text, substitutions)?;
    if statement.is_empty() {
        return Err(RestError::usage("statement text must not be empty"));
    }
    Ok(Statement {
        statement,
        parameters: parameters.unwrap_or_default(),
    })
}

/// Compose with a single mapping, which binds as parameters.
///
/// This is the two-argument form: callers that need no templating pass only
/// parameters.
pub fn compose_with_params(template: impl Into<Template>, parameters: Parameters) -> Result<Statement> {
    compose(template, None, Some(parameters))
}

/// Names of every placeholder in `text`, in order of appearance.
pub fn placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

fn substitute(text: &str, substitutions: Option<&Substitutions>) -> Result<String> {
    if let Some(missing) = placeholders(text)
        .into_iter()
        .find(|name| substitutions.map_or(true, |subs| !subs.contains_key(*name)))
    {
        return Err(RestError::substitution(missing));
    }

    let Some(subs) = substitutions else {
        return Ok(text.to_string());
    };

    let replaced = PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        subs.get(&caps[1]).map(substitution_text).unwrap_or_default()
    });
    Ok(replaced.into_owned())
}

/// Literal text for a substitution value: strings as-is, anything else as JSON.
fn substitution_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::{json, Map};

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_no_placeholders_no_substitutions() {
        let stmt = compose("MATCH (n) RETURN n", None, None).unwrap();
        assert_eq!(stmt.statement, "MATCH (n) RETURN n");
        assert!(stmt.parameters.is_empty());
    }

    #[test]
    fn test_lines_join_with_newline() {
        let stmt = compose(vec!["MATCH (n)", "RETURN n"], None, None).unwrap();
        assert_eq!(stmt.statement, "MATCH (n)\nRETURN n");
    }

    #[test]
    fn test_substitution_replaces_every_occurrence() {
        let subs = map(json!({"label": "`User`"}));
        let stmt = compose("MATCH (a:${label})-->(b:${label}) RETURN a", Some(&subs), None).unwrap();
        assert_eq!(stmt.statement, "MATCH (a:`User`)-->(b:`User`) RETURN a");
    }

    #[test]
    fn test_substitution_across_lines() {
        let subs = map(json!({"rel": "KNOWS"}));
        let stmt = compose(vec!["MATCH (a)-[:${rel}]->(b)", "RETURN b"], Some(&subs), None).unwrap();
        assert_eq!(stmt.statement, "MATCH (a)-[:KNOWS]->(b)\nRETURN b");
    }

    #[test]
    fn test_missing_substitution_fails() {
        let err = compose("MATCH (n:${label}) RETURN n", Some(&Map::new()), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Substitution);
        assert!(matches!(err, RestError::Substitution { ref placeholder } if placeholder == "label"));
    }

    #[test]
    fn test_unrelated_key_does_not_satisfy_placeholder() {
        let subs = map(json!({"y": "Y"}));
        let err = compose("RETURN ${x}", Some(&subs), None).unwrap_err();
        assert!(matches!(err, RestError::Substitution { ref placeholder } if placeholder == "x"));
    }

    #[test]
    fn test_omitted_substitutions_fail_like_empty() {
        let omitted = compose("RETURN ${x}", None, None).unwrap_err();
        let empty = compose("RETURN ${x}", Some(&Map::new()), None).unwrap_err();
        assert_eq!(omitted.to_string(), empty.to_string());
    }

    #[test]
    fn test_first_missing_placeholder_reported() {
        let subs = map(json!({"b": "B"}));
        let err = compose("${b} ${a} ${c}", Some(&subs), None).unwrap_err();
        assert!(matches!(err, RestError::Substitution { ref placeholder } if placeholder == "a"));
    }

    #[test]
    fn test_unused_keys_ignored() {
        let subs = map(json!({"label": "User", "unused": "x"}));
        let stmt = compose("MATCH (n:${label}) RETURN n", Some(&subs), None).unwrap();
        assert_eq!(stmt.statement, "MATCH (n:User) RETURN n");
    }

    #[test]
    fn test_non_string_substitution_uses_json_text() {
        let subs = map(json!({"limit": 10}));
        let stmt = compose("MATCH (n) RETURN n LIMIT ${limit}", Some(&subs), None).unwrap();
        assert_eq!(stmt.statement, "MATCH (n) RETURN n LIMIT 10");
    }

    #[test]
    fn test_parameters_attached_not_substituted() {
        let params = map(json!({"name": "Alice"}));
        let stmt = compose("MATCH (n {name: $name}) RETURN n", None, Some(params.clone())).unwrap();
        assert_eq!(stmt.statement, "MATCH (n {name: $name}) RETURN n");
        assert_eq!(stmt.parameters, params);
    }

    #[test]
    fn test_two_argument_form_binds_parameters() {
        let params = map(json!({"label": "not substituted"}));
        let stmt = compose_with_params("RETURN $label", params.clone()).unwrap();
        assert_eq!(stmt.parameters, params);

        let err = compose_with_params("RETURN ${label}", params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Substitution);
    }

    #[test]
    fn test_substituted_value_is_not_rescanned() {
        let subs = map(json!({"a": "${b}"}));
        let stmt = compose("RETURN ${a}", Some(&subs), None).unwrap();
        assert_eq!(stmt.statement, "RETURN ${b}");
    }

    #[test]
    fn test_empty_braces_are_not_a_placeholder() {
        let stmt = compose("RETURN '${}'", None, None).unwrap();
        assert_eq!(stmt.statement, "RETURN '${}'");
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = compose("", None, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_placeholders_in_order() {
        assert_eq!(placeholders("${a} $b ${c d} ${a}"), vec!["a", "c d", "a"]);
    }
}
