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

//! Client for Neo4j's transactional Cypher-over-HTTP endpoint.
//!
//! This crate provides functionality to:
//! - Compose statements from templates with `${name}` substitution and
//!   parameter binding
//! - Run statements in single-shot or explicit transactions
//!   (begin, query, commit, rollback, reset timeout)
//! - Reshape the REST column/row results into row objects keyed by column
//!
//! # Call Shapes
//!
//! Query-shaped operations take a positional [`Argument`] list and a callback:
//!
//! | Operation | Arguments |
//! |-----------|-----------|
//! | [`Client::query`] | `[id,] template \| lines \| statements, [substitutions,] [parameters]` |
//! | [`Client::begin`] | `template \| lines \| statements, [substitutions,] [parameters]` |
//! | [`Client::commit`] | `id, [template \| lines \| statements, [substitutions,] [parameters]]` |
//! | [`Client::rollback`] | `id` |
//! | [`Client::reset_timeout`] | `id` |
//! | [`Client::compose`] | `template \| lines, [substitutions,] [parameters]` |
//!
//! With a single mapping it binds as parameters; with two, the first is the
//! substitution map.
//!
//! # Example: Explicit Transaction
//!
//! ```no_run
//! use cypher_rest::{args, collect, Client};
//! use serde_json::json;
//!
//! fn example() -> Result<(), cypher_rest::RestError> {
//!     let client = Client::new("http://localhost:7474");
//!
//!     let (_, info) = client.begin(args![], collect).into_result()?;
//!     let id = info.transaction_id.unwrap_or_default();
//!
//!     client
//!         .query(
//!             args![id, "CREATE (n:${label} {name: $name})", json!({"label": "User"}), json!({"name": "Alice"})],
//!             collect,
//!         )
//!         .into_result()?;
//!
//!     let (results, _) = client
//!         .commit(args![id, "MATCH (n:User) RETURN n.name AS name"], collect)
//!         .into_result()?;
//!     println!("{}", results[0][0]["name"]);
//!     Ok(())
//! }
//! ```
//!
//! # Example: Callbacks
//!
//! ```no_run
//! use cypher_rest::{args, Client};
//!
//! # fn example() -> Result<(), cypher_rest::RestError> {
//! let client = Client::new("http://localhost:7474");
//! let names = client.query(args!["MATCH (n:User) RETURN n.name AS name"], |error, results, _info| {
//!     if let Some(error) = error {
//!         eprintln!("query failed: {}", error);
//!         return Vec::new();
//!     }
//!     results.into_iter().flatten().filter_map(|row| row.get("name").cloned()).collect()
//! });
//! # let _: Vec<serde_json::Value> = names;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod args;
pub mod client;
pub mod config;
pub mod cypher;
pub mod error;
pub mod mapping;
pub mod response;
pub mod transport;

// Re-export main types at crate root for convenience
pub use args::{parse_arguments, Argument, CallShape, ParsedArguments, Payload};
pub use client::{collect, Client, ResponseParts};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use cypher::{compose, compose_with_params, escape, Parameters, Statement, Substitutions, Template};
pub use error::{ErrorKind, RestError, Result, TransportError};
pub use mapping::{map_results, MappedResults, Row};
pub use response::{parse_results, transaction_id_from_commit, ServerError, TransactionInfo};
pub use transport::{HttpResponse, HttpTransport, Transport};
