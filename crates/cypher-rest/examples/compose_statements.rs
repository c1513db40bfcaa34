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

//! Example demonstrating offline statement composition and result mapping.

use cypher_rest::{args, compose, escape, map_results, parse_arguments, CallShape};
use serde_json::{json, Map, Value};

fn main() -> Result<(), cypher_rest::RestError> {
    println!("=== Statement Composition ===\n");

    // Example 1: Template with a label substitution and a bound parameter
    println!("1. Substitution and parameters:");
    let mut subs = Map::new();
    subs.insert("label".into(), Value::String(escape("Person Record")));
    let mut params = Map::new();
    params.insert("name".into(), json!("Alice"));
    let stmt = compose("MATCH (n:${label} {name: $name}) RETURN n", Some(&subs), Some(params))?;
    println!("   statement:  {}", stmt.statement);
    println!("   parameters: {}", Value::Object(stmt.parameters));
    println!();

    // Example 2: Template lines
    println!("2. Template lines:");
    let stmt = compose(vec!["MATCH (n)", "WHERE n.age > 21", "RETURN n"], None, None)?;
    println!("{}", stmt.statement);
    println!();

    // Example 3: Call shapes
    println!("3. Call shapes:");
    let calls = vec![
        args!["RETURN 1"],
        args![12u64, "RETURN $x", json!({"x": 1})],
        args!["MATCH (n:${label}) RETURN n", json!({"label": "User"}), json!({})],
        args![json!({"not": "a payload"})],
    ];
    for call in calls {
        match CallShape::classify(&call) {
            Ok(shape) => println!("   {:?}", shape),
            Err(e) => println!("   rejected: {}", e),
        }
        let parsed = parse_arguments(call, ());
        println!("     -> {} statement(s)", parsed.statements.len());
    }
    println!();

    // Example 4: Mapping a REST result
    println!("4. Result mapping:");
    let mapped = map_results(json!([{
        "columns": ["name", "age"],
        "data": [{"row": ["Alice", 30]}, {"row": ["Bob", 25]}]
    }]));
    for row in &mapped[0] {
        println!("   {}", Value::Object(row.clone()));
    }

    Ok(())
}
