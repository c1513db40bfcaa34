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

//! HTTP transport for the transactional endpoint.

use crate::config::ClientConfig;
use crate::error::TransportError;
use serde_json::Value;
use std::io::Read;
use tracing::debug;

const ACCEPT: &str = "application/json; charset=UTF-8";

/// A raw HTTP response: status code and the decoded body, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body; `None` when the body was empty.
    ///
    /// A body that is not valid JSON is kept as a [`Value::String`] holding
    /// the raw text.
    pub body: Option<Value>,
}

impl HttpResponse {
    /// A response with status 200 and the given body.
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the transactional endpoint.
///
/// Non-2xx statuses are responses, not errors: the server reports query
/// failures in the body, so implementations return them as [`HttpResponse`].
pub trait Transport {
    /// POST a JSON body to `url`.
    fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError>;

    /// DELETE `url`.
    fn delete(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body)
    }

    fn delete(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).delete(url)
    }
}

/// Blocking [`ureq`] transport.
///
/// The agent pools connections and is shared by clones.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    /// Build a transport from client configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(&config.user_agent);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
        }
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Accept", ACCEPT)
            .set("X-Stream", "true")
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        debug!(url, "POST");
        read_response(self.request("POST", url).send_json(body))
    }

    fn delete(&self, url: &str) -> Result<HttpResponse, TransportError> {
        debug!(url, "DELETE");
        read_response(self.request("DELETE", url).call())
    }
}

fn read_response(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<HttpResponse, TransportError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(err)) => return Err(err.into()),
    };
    let status = response.status();
    // `into_string` caps bodies at 10 MB; result sets can be larger.
    let mut text = String::new();
    response.into_reader().read_to_string(&mut text)?;
    debug!(status, bytes = text.len(), "received response");
    Ok(HttpResponse {
        status,
        body: decode_body(&text),
    })
}

/// Decode a response body, keeping non-JSON text as a string value.
pub(crate) fn decode_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}
