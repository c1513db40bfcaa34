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

//! Identifier quoting for Cypher.

/// Quote a raw string as a Cypher identifier.
///
/// Every backtick is doubled and the result is wrapped in a single pair of
/// backticks. The input is never validated, so any label, property key or
/// relationship type can be spliced into a statement template safely.
///
/// # Examples
///
/// ```
/// # use cypher_rest::cypher::escape;
/// assert_eq!(escape("a_:b c'd"), "`a_:b c'd`");
/// assert_eq!(escape("a`b"), "`a``b`");
/// ```
pub fn escape(raw: &str) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('`');
    for c in raw.chars() {
        if c == '`' {
            quoted.push('`');
        }
        quoted.push(c);
    }
    quoted.push('`');
    quoted
}
