//! Field resolution
//!
//! Given a container and an optional selector, finds the value under test,
//! its kind, and the key a violation at this position is reported under.

use serde::{Serialize, Serializer};
use std::fmt;

use super::kind::{classify, Document, Kind};

/// Reserved key meaning "the whole payload".
pub const PAYLOAD_KEY: &str = "payload";

/// Where the value under test lives inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// An object member
    Field(&'a str),
    /// An array slot
    Index(usize),
}

impl<'a> From<&'a str> for Selector<'a> {
    fn from(name: &'a str) -> Self {
        Selector::Field(name)
    }
}

impl From<usize> for Selector<'_> {
    fn from(index: usize) -> Self {
        Selector::Index(index)
    }
}

/// Key a violation is reported under.
///
/// `Payload` is the sentinel for the root value. It never compares equal to
/// `Index(0)` or `Field("0")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    Payload,
    Field(String),
    Index(usize),
}

impl ErrorKey {
    /// Whether this is the root sentinel.
    pub fn is_payload(&self) -> bool {
        matches!(self, ErrorKey::Payload)
    }
}

impl From<Option<Selector<'_>>> for ErrorKey {
    fn from(selector: Option<Selector<'_>>) -> Self {
        match selector {
            None => ErrorKey::Payload,
            Some(Selector::Field(name)) => ErrorKey::Field(name.to_string()),
            Some(Selector::Index(index)) => ErrorKey::Index(index),
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKey::Payload => f.write_str(PAYLOAD_KEY),
            ErrorKey::Field(name) => f.write_str(name),
            ErrorKey::Index(index) => write!(f, "{}", index),
        }
    }
}

impl Serialize for ErrorKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ErrorKey::Payload => serializer.serialize_str(PAYLOAD_KEY),
            ErrorKey::Field(name) => serializer.serialize_str(name),
            ErrorKey::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

/// The value under test at one position of the tree.
#[derive(Debug)]
pub struct Resolved<'d, D: ?Sized> {
    /// The value, `None` when absent
    pub value: Option<&'d D>,
    /// Its kind, `None` when absent
    pub kind: Option<Kind>,
    /// Key to report a violation under
    pub key: ErrorKey,
}

impl<D: ?Sized> Clone for Resolved<'_, D> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            kind: self.kind,
            key: self.key.clone(),
        }
    }
}

/// Resolves `selector` inside `container`.
///
/// Without a selector the container itself is under test and the key is the
/// payload sentinel. A member that does not exist resolves to absent.
pub fn resolve<'d, D: Document + ?Sized>(
    container: Option<&'d D>,
    selector: Option<Selector<'_>>,
) -> Resolved<'d, D> {
    let value = match selector {
        None => container,
        Some(Selector::Field(name)) => container.and_then(|c| c.field(name)),
        Some(Selector::Index(index)) => container.and_then(|c| c.element(index)),
    };

    Resolved {
        value,
        kind: classify(value),
        key: ErrorKey::from(selector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_no_selector_is_the_payload() {
        let doc = json!({"a": 1});
        let resolved = resolve(Some(&doc), None);
        assert_eq!(resolved.value, Some(&doc));
        assert_eq!(resolved.kind, Some(Kind::Object));
        assert_eq!(resolved.key, ErrorKey::Payload);
    }

    #[test]
    fn test_field_selector() {
        let doc = json!({"a": "x"});
        let resolved = resolve(Some(&doc), Some(Selector::Field("a")));
        assert_eq!(resolved.kind, Some(Kind::String));
        assert_eq!(resolved.key, ErrorKey::Field("a".into()));

        let missing = resolve(Some(&doc), Some(Selector::Field("b")));
        assert!(missing.value.is_none());
        assert_eq!(missing.kind, None);
        assert_eq!(missing.key, ErrorKey::Field("b".into()));
    }

    #[test]
    fn test_index_zero_is_not_the_payload() {
        let doc = json!([true]);
        let resolved = resolve(Some(&doc), Some(Selector::Index(0)));
        assert_eq!(resolved.kind, Some(Kind::Boolean));
        assert_eq!(resolved.key, ErrorKey::Index(0));
        assert!(!resolved.key.is_payload());
    }

    #[test]
    fn test_field_named_zero_is_not_the_payload() {
        let doc = json!({"0": 1});
        let resolved = resolve(Some(&doc), Some(Selector::Field("0")));
        assert_eq!(resolved.key, ErrorKey::Field("0".into()));
        assert_ne!(resolved.key, ErrorKey::Payload);
    }

    #[test]
    fn test_absent_container() {
        let resolved = resolve::<Value>(None, Some(Selector::Field("a")));
        assert!(resolved.value.is_none());
        assert_eq!(resolved.kind, None);
    }

    #[test]
    fn test_key_serialization() {
        assert_eq!(serde_json::to_value(ErrorKey::Payload).unwrap(), json!("payload"));
        assert_eq!(serde_json::to_value(ErrorKey::Index(0)).unwrap(), json!(0));
        assert_eq!(serde_json::to_value(ErrorKey::Field("0".into())).unwrap(), json!("0"));
    }
}
