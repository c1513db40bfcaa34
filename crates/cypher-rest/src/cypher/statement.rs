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

//! Statement and template types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bound parameters sent alongside a statement.
pub type Parameters = Map<String, Value>;

/// Client-side `${name}` replacements applied to a template.
pub type Substitutions = Map<String, Value>;

/// A Cypher statement ready to submit, serialized as
/// `{"statement": ..., "parameters": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// The Cypher query text.
    pub statement: String,
    /// Bound parameters, possibly empty.
    #[serde(default)]
    pub parameters: Parameters,
}

impl Statement {
    /// Create a statement with no parameters.
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            parameters: Parameters::new(),
        }
    }

    /// Add a parameter to this statement.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add multiple parameters to this statement.
    pub fn with_params(mut self, params: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.parameters.extend(params);
        self
    }

    /// Check if this statement has parameters.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Whether `value` looks like a pre-built statement object.
    ///
    /// Only the `statement` key is required; `parameters` defaults to empty.
    pub fn is_statement_shaped(value: &Value) -> bool {
        value
            .as_object()
            .and_then(|obj| obj.get("statement"))
            .is_some_and(Value::is_string)
            && value
                .get("parameters")
                .map_or(true, Value::is_object)
    }
}

/// A statement template: either a single text or lines joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// A single template string.
    Text(String),
    /// Template lines, joined with a newline before substitution.
    Lines(Vec<String>),
}

impl Template {
    /// The template text with lines joined.
    pub fn text(&self) -> String {
        match self {
            Template::Text(text) => text.clone(),
            Template::Lines(lines) => lines.join("\n"),
        }
    }

    /// Convert a JSON value into a template if it is string-shaped.
    ///
    /// Strings become [`Template::Text`]; arrays whose every element is a
    /// string, number or boolean become [`Template::Lines`].
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Template::Text(s.clone())),
            Value::Array(items) if !items.is_empty() => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(Template::Lines),
            _ => None,
        }
    }
}

impl From<&str> for Template {
    fn from(s: &str) -> Self {
        Template::Text(s.to_string())
    }
}

impl From<String> for Template {
    fn from(s: String) -> Self {
        Template::Text(s)
    }
}

impl From<Vec<String>> for Template {
    fn from(lines: Vec<String>) -> Self {
        Template::Lines(lines)
    }
}

impl From<Vec<&str>> for Template {
    fn from(lines: Vec<&str>) -> Self {
        Template::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Template {
    fn from(lines: &[&str]) -> Self {
        Template::Lines(lines.iter().map(|s| s.to_string()).collect())
    }
}
