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

//! Error types for cypher-rest operations.

use crate::response::ServerError;
use std::io;
use thiserror::Error;

/// Failure of the HTTP round-trip itself.
///
/// No server response was received (or it could not be read), so a
/// transport failure never carries server-reported query errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Whether the request timed out.
    pub timeout: bool,
}

impl TransportError {
    /// Create a transport error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: false,
        }
    }

    /// Create a transport error describing a timeout.
    pub fn timed_out(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: true,
        }
    }
}

impl From<ureq::Transport> for TransportError {
    fn from(err: ureq::Transport) -> Self {
        let timeout = std::error::Error::source(&err)
            .and_then(|source| source.downcast_ref::<io::Error>())
            .is_some_and(is_timeout);
        Self {
            message: err.to_string(),
            timeout,
        }
    }
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        Self {
            timeout: is_timeout(&err),
            message: err.to_string(),
        }
    }
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

/// Broad classification of a [`RestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A template placeholder had no substitution.
    Substitution,
    /// The HTTP call failed.
    Transport,
    /// The server response could not be interpreted.
    MalformedResponse,
    /// The server executed the request but reported query errors.
    ServerQuery,
    /// The operation was called with an unsupported argument shape.
    Usage,
}

/// Error type for cypher-rest operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// A `${name}` placeholder has no entry in the substitution map.
    #[error("missing substitution for placeholder '${{{placeholder}}}'")]
    Substitution {
        /// The placeholder name without the `${}` delimiters.
        placeholder: String,
    },

    /// The underlying HTTP request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response carried no body.
    #[error("missing body in response")]
    MissingBody,

    /// The response body was not a JSON object.
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// A commit URI was present but no transaction ID could be extracted.
    #[error("invalid commit location: {location}")]
    InvalidCommitLocation {
        /// The offending URI.
        location: String,
    },

    /// The server reported one or more errors while running the statements.
    #[error("error running query ({} server error(s))", .errors.len())]
    ServerQuery {
        /// Every error reported by the server, in order.
        errors: Vec<ServerError>,
    },

    /// The operation was called incorrectly.
    #[error("usage error: {0}")]
    Usage(String),

    /// JSON conversion error from serde_json.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RestError {
    /// Create a substitution error for `placeholder`.
    pub fn substitution(placeholder: impl Into<String>) -> Self {
        Self::Substitution {
            placeholder: placeholder.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Create an invalid commit location error.
    pub fn invalid_commit_location(location: impl Into<String>) -> Self {
        Self::InvalidCommitLocation {
            location: location.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Substitution { .. } => ErrorKind::Substitution,
            Self::Transport(_) => ErrorKind::Transport,
            Self::MissingBody | Self::InvalidBody(_) | Self::InvalidCommitLocation { .. } => {
                ErrorKind::MalformedResponse
            }
            Self::ServerQuery { .. } => ErrorKind::ServerQuery,
            Self::Usage(_) | Self::Json(_) => ErrorKind::Usage,
        }
    }

    /// Server-reported errors carried by this error, empty for other kinds.
    pub fn server_errors(&self) -> &[ServerError] {
        match self {
            Self::ServerQuery { errors } => errors,
            _ => &[],
        }
    }
}

/// Result type alias for cypher-rest operations.
pub type Result<T> = std::result::Result<T, RestError>;
