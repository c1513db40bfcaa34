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

//! Shared test fixtures for cypher-rest.
//!
//! This crate provides canned transactional endpoint responses and a
//! [`ScriptedTransport`] so client behavior can be tested without a server.
//!
//! # Quick Start
//!
//! ```rust
//! use cypher_rest::{args, collect, Client};
//! use cypher_rest_test::{fixtures, ScriptedTransport};
//!
//! let transport = ScriptedTransport::new();
//! transport.push_ok(fixtures::begin_response(7));
//!
//! let client = Client::with_transport("http://localhost:7474", &transport);
//! let parts = client.begin(args![], collect);
//! assert_eq!(parts.info.transaction_id, Some(7));
//!
//! let request = transport.last_request().unwrap();
//! assert_eq!(request.url, "http://localhost:7474/db/data/transaction/");
//! ```

pub mod fixtures;
mod scripted;

pub use scripted::{Method, RecordedRequest, ScriptedTransport};

/// Server root used throughout the fixtures.
pub const TEST_BASE_URI: &str = "http://localhost:7474";

/// The normalized transactional endpoint for [`TEST_BASE_URI`].
pub const TEST_TRANSACTION_URI: &str = "http://localhost:7474/db/data/transaction/";
