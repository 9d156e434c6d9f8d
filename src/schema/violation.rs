//! Violation trees
//!
//! A violation describes why a value did not match a declaration. Leaves
//! carry a kind and a message; aggregates come from `arrayOf` (a list of
//! indexed entries) and `shape` (a map keyed by field name). Both aggregates
//! omit positions that passed.
//!
//! Wire shapes:
//! - leaf: `{"kind": "invalid", "message": "expected string, got number"}`
//! - shape aggregate: `{"<field>": <violation>, ...}`
//! - arrayOf aggregate: `[{"index": 1, "kind": ..., "message": ...}, ...]`,
//!   where a nested aggregate entry is `{"index": 1, "fields": {...}}` or
//!   `{"index": 1, "elements": [...]}`
//! - root: `{"payload": <violation>}`
//! - below the root: `{"key": "<field>" | <index>, ...same splicing...}`

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::resolve::{ErrorKey, PAYLOAD_KEY};

/// Why a position failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// Present, but of the wrong kind
    Invalid,
    /// Absent or null where a value is required
    Missing,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Invalid => write!(f, "invalid"),
            ViolationKind::Missing => write!(f, "missing"),
        }
    }
}

/// The body of a violation at one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Violation {
    /// A single mismatch
    Leaf {
        kind: ViolationKind,
        message: String,
    },
    /// Failed fields of an object, by name
    Fields(BTreeMap<String, Violation>),
    /// Failed elements of an array, in index order
    Elements(Vec<IndexedViolation>),
}

impl Violation {
    pub fn leaf(kind: ViolationKind, message: impl Into<String>) -> Self {
        Violation::Leaf {
            kind,
            message: message.into(),
        }
    }

    /// Kind of a leaf violation. `None` for aggregates.
    pub fn kind(&self) -> Option<ViolationKind> {
        match self {
            Violation::Leaf { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Message of a leaf violation. `None` for aggregates.
    pub fn message(&self) -> Option<&str> {
        match self {
            Violation::Leaf { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Violation recorded for a named field of a shape aggregate.
    pub fn field(&self, name: &str) -> Option<&Violation> {
        match self {
            Violation::Fields(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Violation recorded for an array slot of an arrayOf aggregate.
    pub fn element(&self, index: usize) -> Option<&Violation> {
        match self {
            Violation::Elements(elements) => elements
                .iter()
                .find(|e| e.index == index)
                .map(|e| &e.violation),
            _ => None,
        }
    }

    /// Number of leaf violations in this tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Violation::Leaf { .. } => 1,
            Violation::Fields(fields) => fields.values().map(Violation::leaf_count).sum(),
            Violation::Elements(elements) => {
                elements.iter().map(|e| e.violation.leaf_count()).sum()
            }
        }
    }

    /// Writes the body of this violation into a map that already holds a
    /// positional entry (`key` or `index`).
    fn serialize_spliced<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        match self {
            Violation::Leaf { kind, message } => {
                map.serialize_entry("kind", kind)?;
                map.serialize_entry("message", message)?;
            }
            Violation::Fields(fields) => map.serialize_entry("fields", fields)?,
            Violation::Elements(elements) => map.serialize_entry("elements", elements)?,
        }
        Ok(())
    }
}

/// One failed slot of an arrayOf aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedViolation {
    pub index: usize,
    pub violation: Violation,
}

impl Serialize for IndexedViolation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("index", &self.index)?;
        self.violation.serialize_spliced(&mut map)?;
        map.end()
    }
}

/// A violation together with the key of the position it was found at.
///
/// This is what a declaration returns. At the root the key is the payload
/// sentinel and the violation is delivered wrapped under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedViolation {
    pub key: ErrorKey,
    pub violation: Violation,
}

impl KeyedViolation {
    pub fn new(key: ErrorKey, violation: Violation) -> Self {
        Self { key, violation }
    }

    /// Whether this violation was found at the root of the payload.
    pub fn is_root(&self) -> bool {
        self.key.is_payload()
    }

    pub fn violation(&self) -> &Violation {
        &self.violation
    }

    /// Drops the key, including the payload wrapper at the root.
    pub fn into_violation(self) -> Violation {
        self.violation
    }
}

impl Serialize for KeyedViolation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if self.key.is_payload() {
            map.serialize_entry(PAYLOAD_KEY, &self.violation)?;
        } else {
            map.serialize_entry("key", &self.key)?;
            self.violation.serialize_spliced(&mut map)?;
        }
        map.end()
    }
}
