//! Value classification
//!
//! Every value under test falls into exactly one of six JSON kinds. A value
//! that does not exist in its container is *absent*, which is modelled as
//! `None` rather than as a seventh kind: it is never reported as a kind of
//! its own, only named in messages.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The six JSON value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl Kind {
    /// Returns the kind name used in violation messages
    pub fn name(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name reported for a value that does not exist in its container.
pub const ABSENT: &str = "absent";

/// A read-only value tree that declarations can be checked against.
///
/// `serde_json::Value` is the usual implementation. Other trees may report
/// holes: an `element` lookup below `length()` that yields `None` is treated
/// exactly like a missing object member.
pub trait Document {
    /// Classifies this value.
    fn kind(&self) -> Kind;

    /// Looks up an object member. Non-objects have no members.
    fn field(&self, name: &str) -> Option<&Self>;

    /// Looks up an array element. Non-arrays have no elements.
    fn element(&self, index: usize) -> Option<&Self>;

    /// Number of array slots, holes included. Zero for non-arrays.
    fn length(&self) -> usize;
}

impl Document for Value {
    fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    fn field(&self, name: &str) -> Option<&Self> {
        self.as_object().and_then(|obj| obj.get(name))
    }

    fn element(&self, index: usize) -> Option<&Self> {
        self.as_array().and_then(|arr| arr.get(index))
    }

    fn length(&self) -> usize {
        self.as_array().map_or(0, Vec::len)
    }
}

/// Classifies a possibly absent value. `None` means absent.
pub fn classify<D: Document + ?Sized>(value: Option<&D>) -> Option<Kind> {
    value.map(|v| v.kind())
}

/// A value exists when it is present and not null.
pub fn exists(kind: Option<Kind>) -> bool {
    matches!(kind, Some(k) if k != Kind::Null)
}

/// Display name of a possibly absent kind.
pub fn kind_name(kind: Option<Kind>) -> &'static str {
    kind.map_or(ABSENT, |k| k.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classifies_six_kinds() {
        assert_eq!(json!("x").kind(), Kind::String);
        assert_eq!(json!(1.5).kind(), Kind::Number);
        assert_eq!(json!(0).kind(), Kind::Number);
        assert_eq!(json!(false).kind(), Kind::Boolean);
        assert_eq!(json!(null).kind(), Kind::Null);
        assert_eq!(json!([]).kind(), Kind::Array);
        assert_eq!(json!({}).kind(), Kind::Object);
    }

    #[test]
    fn test_array_and_null_are_not_objects() {
        assert_ne!(json!([1, 2]).kind(), Kind::Object);
        assert_ne!(json!(null).kind(), Kind::Object);
    }

    #[test]
    fn test_absent_is_not_a_kind() {
        assert_eq!(classify::<Value>(None), None);
        assert_eq!(kind_name(None), "absent");
        assert_eq!(kind_name(Some(Kind::Null)), "null");
    }

    #[test]
    fn test_exists() {
        assert!(!exists(None));
        assert!(!exists(Some(Kind::Null)));
        assert!(exists(Some(Kind::Boolean)));
        assert!(exists(Some(Kind::String)));
    }

    #[test]
    fn test_member_lookup() {
        let doc = json!({"a": [10, 20]});
        assert_eq!(doc.field("a").map(|v| v.length()), Some(2));
        assert!(doc.field("b").is_none());
        assert!(doc.element(0).is_none());
        assert_eq!(doc.field("a").and_then(|a| a.element(1)), Some(&json!(20)));
        assert!(doc.field("a").and_then(|a| a.element(2)).is_none());
    }
}
