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

//! Offline commands.

use super::{ConnectionArgs, StatementArgs};
use crate::commands;
use crate::error::CliError;
use clap::Subcommand;
use cypher_rest::escape;

/// Commands that never contact the server.
#[derive(Subcommand)]
pub enum OfflineCommands {
    /// Print the statement a template composes to, as JSON
    Compose {
        #[command(flatten)]
        statement: StatementArgs,
    },

    /// Quote an identifier with backticks
    Escape {
        /// Raw identifier
        #[arg(value_name = "IDENTIFIER")]
        identifier: String,
    },
}

impl OfflineCommands {
    /// Execute the offline command.
    ///
    /// # Errors
    ///
    /// Returns `Err` for malformed options or a failed composition.
    pub fn execute(self, connection: &ConnectionArgs) -> Result<(), CliError> {
        match self {
            OfflineCommands::Compose { statement } => {
                let args = commands::arguments(None, &statement)?;
                let client = commands::connect(connection);
                commands::print(client.compose(args, commands::compose_report))
            }
            OfflineCommands::Escape { identifier } => {
                println!("{}", escape(&identifier));
                Ok(())
            }
        }
    }
}
