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

//! Structured error types for the Cypher REST CLI.

use cypher_rest::RestError;
use thiserror::Error;

/// The main error type for CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// A `--sub` value was not of the form `KEY=VALUE`.
    #[error("invalid substitution '{0}': expected KEY=VALUE")]
    InvalidSubstitution(String),

    /// A JSON option did not hold the expected shape.
    #[error("invalid {option}: {message}")]
    InvalidJson {
        /// The option name, e.g. `--params`.
        option: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The operation delivered an error; its JSON report was already printed.
    #[error("{0}")]
    Operation(RestError),

    /// Writing the output document failed.
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Create an invalid JSON error for `option`.
    pub fn invalid_json(option: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidJson {
            option,
            message: message.into(),
        }
    }
}
