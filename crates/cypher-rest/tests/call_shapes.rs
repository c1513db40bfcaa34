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

//! Acceptance matrix over every documented call shape.
//!
//! Each shape in [`CallShape::DOCUMENTED`] is turned into a concrete argument
//! list, classified, and sent through [`Client::query`].

use cypher_rest::{
    collect, parse_arguments, Argument, CallShape, Client, ErrorKind, Payload, Statement,
};
use cypher_rest_test::{ScriptedTransport, TEST_BASE_URI, TEST_TRANSACTION_URI};
use serde_json::{json, Map, Value};

const TX: u64 = 5;

fn mapping(value: Value) -> Argument {
    Argument::Mapping(value.as_object().cloned().unwrap_or_default())
}

fn build(shape: &CallShape) -> Vec<Argument> {
    let mut args = Vec::new();
    if shape.transaction_id {
        args.push(Argument::TransactionId(TX));
    }
    let templated = shape.mappings == 2;
    match shape.payload {
        Payload::None => {}
        Payload::Text if templated => args.push("MATCH (n:${label}) WHERE n.id = $id RETURN n".into()),
        Payload::Text => args.push("MATCH (n) WHERE n.id = $id RETURN n".into()),
        Payload::Lines if templated => args.push(
            vec!["MATCH (n:${label})", "WHERE n.id = $id", "RETURN n"].into(),
        ),
        Payload::Lines => args.push(vec!["MATCH (n)", "WHERE n.id = $id", "RETURN n"].into()),
        Payload::Statements => args.push(
            vec![
                Statement::new("RETURN $a").with_param("a", 1),
                Statement::new("RETURN 2"),
            ]
            .into(),
        ),
    }
    match shape.mappings {
        0 => {}
        1 => args.push(mapping(json!({"id": 1}))),
        _ => {
            args.push(mapping(json!({"label": "User"})));
            args.push(mapping(json!({"id": 1})));
        }
    }
    args
}

fn expected_statements(shape: &CallShape) -> Vec<Statement> {
    let params = |present: bool| -> Map<String, Value> {
        if present {
            json!({"id": 1}).as_object().cloned().unwrap_or_default()
        } else {
            Map::new()
        }
    };
    match shape.payload {
        Payload::None => vec![],
        Payload::Text => {
            let text = if shape.mappings == 2 {
                "MATCH (n:User) WHERE n.id = $id RETURN n"
            } else {
                "MATCH (n) WHERE n.id = $id RETURN n"
            };
            vec![Statement {
                statement: text.to_string(),
                parameters: params(shape.mappings > 0),
            }]
        }
        Payload::Lines => {
            let text = if shape.mappings == 2 {
                "MATCH (n:User)\nWHERE n.id = $id\nRETURN n"
            } else {
                "MATCH (n)\nWHERE n.id = $id\nRETURN n"
            };
            vec![Statement {
                statement: text.to_string(),
                parameters: params(shape.mappings > 0),
            }]
        }
        Payload::Statements => vec![
            Statement::new("RETURN $a").with_param("a", 1),
            Statement::new("RETURN 2"),
        ],
    }
}

#[test]
fn test_every_documented_shape_classifies_to_itself() {
    for shape in CallShape::DOCUMENTED {
        let classified = CallShape::classify(&build(shape));
        assert_eq!(classified.ok().as_ref(), Some(shape), "shape {:?}", shape);
    }
}

#[test]
fn test_every_documented_shape_parses() {
    for shape in CallShape::DOCUMENTED {
        let parsed = parse_arguments(build(shape), ());
        assert!(parsed.error.is_none(), "shape {:?}: {:?}", shape, parsed.error);
        assert_eq!(
            parsed.transaction_id,
            shape.transaction_id.then_some(TX),
            "shape {:?}",
            shape
        );
        assert_eq!(parsed.statements, expected_statements(shape), "shape {:?}", shape);
    }
}

#[test]
fn test_every_documented_shape_reaches_the_wire() {
    for shape in CallShape::DOCUMENTED {
        let transport = ScriptedTransport::new();
        let client = Client::with_transport(TEST_BASE_URI, &transport);

        let parts = client.query(build(shape), collect);
        assert!(parts.error.is_none(), "shape {:?}", shape);

        let request = transport.last_request().unwrap();
        let expected_url = if shape.transaction_id {
            format!("{}{}", TEST_TRANSACTION_URI, TX)
        } else {
            format!("{}commit", TEST_TRANSACTION_URI)
        };
        assert_eq!(request.url, expected_url, "shape {:?}", shape);
        assert_eq!(
            request.body,
            Some(json!({"statements": expected_statements(shape)})),
            "shape {:?}",
            shape
        );
    }
}

#[test]
fn test_undocumented_shapes_are_usage_errors() {
    let cases: Vec<(&str, Vec<Argument>)> = vec![
        ("mapping as payload", vec![mapping(json!({"a": 1}))]),
        ("two transaction IDs", vec![Argument::TransactionId(1), Argument::TransactionId(2)]),
        (
            "three mappings",
            vec![
                "RETURN 1".into(),
                mapping(json!({})),
                mapping(json!({})),
                mapping(json!({})),
            ],
        ),
        ("template after template", vec!["RETURN 1".into(), "RETURN 2".into()]),
        ("mappings before payload", vec![mapping(json!({})), "RETURN 1".into()]),
        ("null payload", vec![Argument::Other(Value::Null)]),
        ("mapping only after id", vec![Argument::TransactionId(1), mapping(json!({}))]),
    ];

    for (name, args) in cases {
        let classified = CallShape::classify(&args);
        assert_eq!(
            classified.err().map(|e| e.kind()),
            Some(ErrorKind::Usage),
            "case {}",
            name
        );

        let transport = ScriptedTransport::new();
        let client = Client::with_transport(TEST_BASE_URI, &transport);
        let parts = client.query(args, collect);
        assert_eq!(parts.error.map(|e| e.kind()), Some(ErrorKind::Usage), "case {}", name);
        assert_eq!(transport.request_count(), 0, "case {}", name);
    }
}

#[test]
fn test_begin_rejects_every_shape_with_transaction_id() {
    for shape in CallShape::DOCUMENTED.iter().filter(|s| s.transaction_id) {
        let transport = ScriptedTransport::new();
        let client = Client::with_transport(TEST_BASE_URI, &transport);
        let parts = client.begin(build(shape), collect);
        assert_eq!(parts.error.map(|e| e.kind()), Some(ErrorKind::Usage), "shape {:?}", shape);
        assert_eq!(transport.request_count(), 0);
    }
}

#[test]
fn test_commit_requires_transaction_id_for_every_shape() {
    for shape in CallShape::DOCUMENTED {
        let transport = ScriptedTransport::new();
        let client = Client::with_transport(TEST_BASE_URI, &transport);
        let parts = client.commit(build(shape), collect);
        if shape.transaction_id {
            assert!(parts.error.is_none(), "shape {:?}", shape);
            assert_eq!(
                transport.last_request().unwrap().url,
                format!("{}{}/commit", TEST_TRANSACTION_URI, TX)
            );
        } else {
            assert_eq!(parts.error.map(|e| e.kind()), Some(ErrorKind::Usage), "shape {:?}", shape);
            assert_eq!(transport.request_count(), 0);
        }
    }
}
