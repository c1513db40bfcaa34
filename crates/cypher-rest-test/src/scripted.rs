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

//! A transport that replays queued outcomes and records every request.

use cypher_rest::{HttpResponse, Transport, TransportError};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// POST with a JSON body.
    Post,
    /// DELETE without a body.
    Delete,
}

/// A request seen by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Full request URL.
    pub url: String,
    /// JSON body for POST requests.
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Statement texts in the request body, in order.
    pub fn statement_texts(&self) -> Vec<String> {
        self.body
            .as_ref()
            .and_then(|body| body.get("statements"))
            .and_then(Value::as_array)
            .map(|statements| {
                statements
                    .iter()
                    .filter_map(|s| s.get("statement").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Replays queued outcomes in order.
///
/// When the queue is empty every request answers with
/// [`fixtures::empty_response`](crate::fixtures::empty_response).
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    /// Create a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome.
    pub fn push(&self, outcome: Result<HttpResponse, TransportError>) -> &Self {
        self.outcomes.lock().push_back(outcome);
        self
    }

    /// Queue a 200 response with `body`.
    pub fn push_ok(&self, body: Value) -> &Self {
        self.push(Ok(HttpResponse::ok(body)))
    }

    /// Queue a response with an explicit status and optional body.
    pub fn push_status(&self, status: u16, body: Option<Value>) -> &Self {
        self.push(Ok(HttpResponse { status, body }))
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, message: &str) -> &Self {
        self.push(Err(TransportError::new(message)))
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn answer(&self, request: RecordedRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::ok(crate::fixtures::empty_response())))
    }
}

impl Transport for ScriptedTransport {
    fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.answer(RecordedRequest {
            method: Method::Post,
            url: url.to_string(),
            body: Some(body.clone()),
        })
    }

    fn delete(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.answer(RecordedRequest {
            method: Method::Delete,
            url: url.to_string(),
            body: None,
        })
    }
}
