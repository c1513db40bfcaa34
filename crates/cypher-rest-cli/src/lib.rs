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

//! Cypher REST CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Transactions
//!
//! - **query**: Run statements, single-shot or inside `--tx`
//! - **begin**: Open a transaction, optionally running statements
//! - **commit**: Commit `--tx`, optionally running final statements
//! - **rollback**: Roll back `--tx`
//! - **reset-timeout**: Keep `--tx` alive
//!
//! ## Offline
//!
//! - **compose**: Print the statement a template composes to
//! - **escape**: Quote an identifier

pub mod cli;
pub mod commands;
pub mod error;

pub use error::CliError;
