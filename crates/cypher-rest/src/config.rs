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

//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default server root when none is configured.
pub const DEFAULT_BASE_URI: &str = "http://localhost:7474";

/// Path of the transactional endpoint below the server root.
pub const TRANSACTION_PATH: &str = "db/data/transaction/";

/// Environment variable holding the server root.
pub const URL_ENV: &str = "NEO4J_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "NEO4J_TIMEOUT_SECS";

/// Configuration for a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server root, e.g. `http://localhost:7474` (default: [`DEFAULT_BASE_URI`]).
    pub base_uri: String,

    /// Per-request timeout (default: None = no timeout).
    ///
    /// Applies to the whole round-trip including reading the body. The server
    /// keeps its own transaction expiry, reported back in
    /// [`TransactionInfo::timeout`](crate::TransactionInfo::timeout).
    pub request_timeout: Option<Duration>,

    /// `User-Agent` header value (default: `cypher-rest/<version>`).
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            request_timeout: None,
            user_agent: concat!("cypher-rest/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for ClientConfig.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cypher_rest::ClientConfig;
    /// # use std::time::Duration;
    /// let config = ClientConfig::builder()
    ///     .base_uri("http://db:7474")
    ///     .request_timeout(Duration::from_secs(5))
    ///     .build();
    /// assert_eq!(config.base_uri, "http://db:7474");
    /// ```
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Read configuration from `NEO4J_URL` and `NEO4J_TIMEOUT_SECS`.
    ///
    /// Unset or unparseable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.base_uri = url;
        }
        if let Some(secs) = lookup(TIMEOUT_ENV).and_then(|s| s.trim().parse::<u64>().ok()) {
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        config
    }

    /// Set the server root.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The transactional endpoint URI for [`ClientConfig::base_uri`].
    pub fn transaction_uri(&self) -> String {
        normalize_base_uri(&self.base_uri)
    }
}

/// Builder for ClientConfig.
///
/// All unset fields use their default values.
#[derive(Default)]
pub struct ClientConfigBuilder {
    base_uri: Option<String>,
    request_timeout: Option<Option<Duration>>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server root.
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Set the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(Some(timeout));
        self
    }

    /// Disable the per-request timeout.
    pub fn no_request_timeout(mut self) -> Self {
        self.request_timeout = Some(None);
        self
    }

    /// Set the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the ClientConfig instance.
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            base_uri: self.base_uri.unwrap_or(defaults.base_uri),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        }
    }
}

/// Normalize a server root to end with exactly one `/db/data/transaction/`.
///
/// Trailing slashes are collapsed, and a root that already names the
/// transactional endpoint is not extended again.
///
/// ```
/// # use cypher_rest::config::normalize_base_uri;
/// assert_eq!(normalize_base_uri("http://h:7474/"), "http://h:7474/db/data/transaction/");
/// assert_eq!(normalize_base_uri("http://h:7474"), "http://h:7474/db/data/transaction/");
/// ```
pub fn normalize_base_uri(base_uri: &str) -> String {
    let root = base_uri.trim().trim_end_matches('/');
    let suffix = TRANSACTION_PATH.trim_end_matches('/');
    let root = root.strip_suffix(suffix).map_or(root, |r| r.trim_end_matches('/'));
    format!("{}/{}", root, TRANSACTION_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_normalize_with_and_without_trailing_slash() {
        assert_eq!(
            normalize_base_uri("http://h:7474/"),
            "http://h:7474/db/data/transaction/"
        );
        assert_eq!(
            normalize_base_uri("http://h:7474"),
            "http://h:7474/db/data/transaction/"
        );
        assert_eq!(
            normalize_base_uri("http://h:7474///"),
            "http://h:7474/db/data/transaction/"
        );
    }

    #[test]
    fn test_normalize_existing_suffix_not_doubled() {
        assert_eq!(
            normalize_base_uri("http://h:7474/db/data/transaction/"),
            "http://h:7474/db/data/transaction/"
        );
        assert_eq!(
            normalize_base_uri("http://h:7474/db/data/transaction"),
            "http://h:7474/db/data/transaction/"
        );
    }

    #[test]
    fn test_normalize_keeps_path_prefix() {
        assert_eq!(
            normalize_base_uri("https://proxy/neo4j/"),
            "https://proxy/neo4j/db/data/transaction/"
        );
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_uri, DEFAULT_BASE_URI);
        assert!(config.request_timeout.is_none());
        assert!(config.user_agent.starts_with("cypher-rest/"));
    }

    #[test]
    fn test_builder_defaults_unset_fields() {
        let config = ClientConfig::builder().user_agent("probe").build();
        assert_eq!(config.base_uri, DEFAULT_BASE_URI);
        assert_eq!(config.user_agent, "probe");
    }

    #[test]
    fn test_builder_no_timeout_overrides() {
        let config = ClientConfig::builder()
            .request_timeout(Duration::from_secs(3))
            .no_request_timeout()
            .build();
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_fluent_setters() {
        let config = ClientConfig::new()
            .with_base_uri("http://db:7474")
            .with_request_timeout(Duration::from_secs(9));
        assert_eq!(config.transaction_uri(), "http://db:7474/db/data/transaction/");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(9)));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> =
            [(URL_ENV, "http://env:7474"), (TIMEOUT_ENV, "12")].into_iter().collect();
        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.base_uri, "http://env:7474");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_from_lookup_ignores_bad_values() {
        let vars: HashMap<&str, &str> = [(URL_ENV, " "), (TIMEOUT_ENV, "soon")].into_iter().collect();
        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ClientConfig::new().with_request_timeout(Duration::from_millis(1500));
        let json = serde_json::to_string(&config).unwrap();
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
