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

//! CLI command definitions and argument parsing.
//!
//! - [`transaction`]: Network commands (query, begin, commit, rollback, reset-timeout)
//! - [`offline`]: Commands that never contact the server (compose, escape)

mod offline;
mod transaction;

use crate::error::CliError;
use clap::{Args, Subcommand};
use cypher_rest::config::{DEFAULT_BASE_URI, URL_ENV};
use cypher_rest::ClientConfig;
use std::time::Duration;

pub use offline::OfflineCommands;
pub use transaction::TransactionCommands;

/// Server connection options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Server root URL
    #[arg(long, global = true, env = URL_ENV, default_value = DEFAULT_BASE_URI)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ConnectionArgs {
    /// Client configuration for these options.
    pub fn config(&self) -> ClientConfig {
        let config = ClientConfig::new().with_base_uri(&self.url);
        match self.timeout {
            Some(secs) => config.with_request_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

/// Statement payload options shared by statement-carrying commands.
#[derive(Args, Debug, Clone, Default)]
pub struct StatementArgs {
    /// Statement template; several values are joined as lines
    #[arg(value_name = "TEMPLATE", conflicts_with = "statements")]
    pub template: Vec<String>,

    /// Substitution for a ${KEY} placeholder (repeatable)
    #[arg(long = "sub", value_name = "KEY=VALUE")]
    pub substitutions: Vec<String>,

    /// Bound parameters as a JSON object
    #[arg(long, value_name = "JSON")]
    pub params: Option<String>,

    /// Pre-built statements as a JSON array of {statement, parameters}
    #[arg(long, value_name = "JSON")]
    pub statements: Option<String>,
}

/// Top-level CLI commands enum.
#[derive(Subcommand)]
pub enum Commands {
    // Transaction commands - flattened to appear at top level
    #[command(flatten)]
    Transaction(TransactionCommands),

    // Offline commands - flattened to appear at top level
    #[command(flatten)]
    Offline(OfflineCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if arguments are malformed, the client cannot be built,
    /// or the operation reports an error.
    pub fn execute(self, connection: &ConnectionArgs) -> Result<(), CliError> {
        match self {
            Commands::Transaction(cmd) => cmd.execute(connection),
            Commands::Offline(cmd) => cmd.execute(connection),
        }
    }
}
