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

//! Transaction commands.

use super::{ConnectionArgs, StatementArgs};
use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Commands that talk to the transactional endpoint.
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Run statements
    ///
    /// Without --tx the statements run in their own committed transaction.
    Query {
        /// Open transaction to run in
        #[arg(long, value_name = "ID")]
        tx: Option<u64>,

        #[command(flatten)]
        statement: StatementArgs,
    },

    /// Open a transaction, optionally running statements in it
    Begin {
        #[command(flatten)]
        statement: StatementArgs,
    },

    /// Commit an open transaction, optionally running final statements
    Commit {
        /// Transaction to commit
        #[arg(long, value_name = "ID")]
        tx: Option<u64>,

        #[command(flatten)]
        statement: StatementArgs,
    },

    /// Roll back an open transaction
    Rollback {
        /// Transaction to roll back
        #[arg(long, value_name = "ID")]
        tx: Option<u64>,
    },

    /// Keep an open transaction alive
    ResetTimeout {
        /// Transaction to keep alive
        #[arg(long, value_name = "ID")]
        tx: Option<u64>,
    },
}

impl TransactionCommands {
    /// Execute the transaction command.
    ///
    /// # Errors
    ///
    /// Returns `Err` for malformed options or when the operation reports an
    /// error.
    pub fn execute(self, connection: &ConnectionArgs) -> Result<(), CliError> {
        let client = commands::connect(connection);
        let report = match self {
            TransactionCommands::Query { tx, statement } => {
                client.query(commands::arguments(tx, &statement)?, commands::report)
            }
            TransactionCommands::Begin { statement } => {
                client.begin(commands::arguments(None, &statement)?, commands::report)
            }
            TransactionCommands::Commit { tx, statement } => {
                client.commit(commands::arguments(tx, &statement)?, commands::report)
            }
            TransactionCommands::Rollback { tx } => client.rollback(tx, commands::report),
            TransactionCommands::ResetTimeout { tx } => client.reset_timeout(tx, commands::report),
        };
        commands::print(report)
    }
}
