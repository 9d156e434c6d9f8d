//! Sparse Document Tests
//!
//! Value trees other than `serde_json::Value` can carry holes: array slots
//! that exist by length but hold nothing. A hole is checked exactly like a
//! missing object member.

use std::collections::BTreeMap;

use serde_json::json;
use shapeguard::schema::{Declaration, Document, Kind};

/// Minimal value tree with sparse arrays.
#[derive(Debug, Clone)]
enum Node {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
    List(Vec<Option<Node>>),
    Map(BTreeMap<String, Node>),
}

impl Document for Node {
    fn kind(&self) -> Kind {
        match self {
            Node::Str(_) => Kind::String,
            Node::Num(_) => Kind::Number,
            Node::Bool(_) => Kind::Boolean,
            Node::Null => Kind::Null,
            Node::List(_) => Kind::Array,
            Node::Map(_) => Kind::Object,
        }
    }

    fn field(&self, name: &str) -> Option<&Self> {
        match self {
            Node::Map(map) => map.get(name),
            _ => None,
        }
    }

    fn element(&self, index: usize) -> Option<&Self> {
        match self {
            Node::List(items) => items.get(index).and_then(|slot| slot.as_ref()),
            _ => None,
        }
    }

    fn length(&self) -> usize {
        match self {
            Node::List(items) => items.len(),
            _ => 0,
        }
    }
}

fn s(text: &str) -> Option<Node> {
    Some(Node::Str(text.to_string()))
}

#[test]
fn test_hole_is_reported_as_absent() {
    // ["a", <hole>, null]
    let payload = Node::List(vec![s("a"), None, Some(Node::Null)]);
    let decl = Declaration::array_of(Declaration::string().required());

    let result = decl.validate(Some(&payload));
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"payload": [
            {"index": 1, "kind": "missing", "message": "expected string, got absent"},
            {"index": 2, "kind": "missing", "message": "expected string, got null"},
        ]})
    );
}

#[test]
fn test_hole_passes_optional_elements() {
    let payload = Node::List(vec![None, s("b"), None]);
    let decl = Declaration::array_of(Declaration::string());
    assert!(decl.validate(Some(&payload)).is_none());
}

#[test]
fn test_nested_holes() {
    // {"arr": [[<hole>, 5]], "flag": true}
    let mut map = BTreeMap::new();
    map.insert(
        "arr".to_string(),
        Node::List(vec![Some(Node::List(vec![None, Some(Node::Num(5.0))]))]),
    );
    map.insert("flag".to_string(), Node::Bool(true));
    let payload = Node::Map(map);

    let decl = Declaration::shape([
        (
            "arr",
            Declaration::array_of(Declaration::array_of(Declaration::string().required()).required())
                .required(),
        ),
        ("flag", Declaration::boolean().required()),
    ]);

    assert_eq!(
        serde_json::to_value(decl.validate(Some(&payload))).unwrap(),
        json!({"payload": {"arr": [
            {"index": 0, "elements": [
                {"index": 0, "kind": "missing", "message": "expected string, got absent"},
                {"index": 1, "kind": "invalid", "message": "expected string, got number"},
            ]}
        ]}})
    );
}

#[test]
fn test_hole_inside_one_of() {
    let payload = Node::List(vec![None, s("x")]);
    let decl = Declaration::array_of(
        Declaration::one_of([Declaration::string(), Declaration::number()])
            .unwrap()
            .required(),
    );
    let violation = decl.validate(Some(&payload)).unwrap().into_violation();
    assert_eq!(
        violation.element(0).and_then(|v| v.message()),
        Some("expected string || number, got absent")
    );
    assert!(violation.element(1).is_none());
}
