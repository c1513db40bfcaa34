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

//! Cypher REST Command Line Interface

use clap::Parser;
use cypher_rest_cli::cli::{Commands, ConnectionArgs};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// cypher-rest - run Cypher over Neo4j's transactional HTTP endpoint
///
/// Network commands print a JSON document `{"error", "results", "info"}` to
/// stdout and exit with failure when `error` is set.
///
/// # Examples
///
/// ```bash
/// # Single-shot query with a bound parameter
/// cypher-rest query 'MATCH (n) WHERE n.age > $min RETURN n' --params '{"min": 18}'
///
/// # Label substitution
/// cypher-rest compose 'MATCH (n:${label}) RETURN n' --sub label=User
///
/// # Explicit transaction
/// cypher-rest begin
/// cypher-rest query --tx 12 'CREATE (n:User {name: $name})' --params '{"name": "Alice"}'
/// cypher-rest commit --tx 12
/// ```
#[derive(Parser)]
#[command(name = "cypher-rest")]
#[command(author, version, about = "Run Cypher over Neo4j's transactional HTTP endpoint", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("cypher_rest=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute(&cli.connection) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
