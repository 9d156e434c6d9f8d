//! Declaration matching
//!
//! Walks a declaration tree and a value tree in lockstep. Each call is one
//! synchronous depth-first traversal whose depth is bounded by the
//! declaration tree, never by the size of the value.
//!
//! Semantics:
//! - primitives compare kinds directly
//! - arrayOf checks every slot `0..length` against its element declaration
//! - shape checks every declared field and ignores undeclared ones
//! - oneOf passes as soon as one alternative matches, except that a required
//!   oneOf never accepts an absent or null value
//! - a position that does not match falls through to the leaf verdict
//!
//! Aggregates collect the violations of failed children only. A child that
//! is itself a container contributes its aggregate as is, spliced under its
//! index or field name, rather than being reduced to a leaf.

use std::collections::BTreeMap;

use super::kind::{exists, Document, Kind};
use super::resolve::{resolve, Resolved, Selector};
use super::types::{Declaration, Presence, Rule};
use super::verdict::verdict;
use super::violation::{IndexedViolation, KeyedViolation, Violation};

impl Declaration {
    /// Validates a whole payload. `None` is an absent payload.
    ///
    /// Returns `None` when the payload conforms. A violation is always keyed
    /// by the payload sentinel.
    pub fn validate<D: Document + ?Sized>(&self, payload: Option<&D>) -> Option<KeyedViolation> {
        self.check(payload, None)
    }

    /// Checks the value at `selector` inside `container`, or the container
    /// itself when there is no selector.
    pub fn check<D: Document + ?Sized>(
        &self,
        container: Option<&D>,
        selector: Option<Selector<'_>>,
    ) -> Option<KeyedViolation> {
        let resolved = resolve(container, selector);

        match &self.rule {
            Rule::Primitive(primitive) => check_primitive(primitive.kind(), self.presence, &resolved),
            Rule::ArrayOf(element) => check_array_of(element, self.presence, &resolved),
            Rule::Shape(fields) => check_shape(fields, self.presence, &resolved),
            Rule::OneOf {
                alternatives,
                label,
            } => check_one_of(alternatives, label, self.presence, &resolved),
        }
    }

    /// Whether `value` conforms.
    pub fn matches<D: Document + ?Sized>(&self, value: Option<&D>) -> bool {
        self.validate(value).is_none()
    }
}

fn check_primitive<D: Document + ?Sized>(
    expected: Kind,
    presence: Presence,
    resolved: &Resolved<'_, D>,
) -> Option<KeyedViolation> {
    if resolved.kind == Some(expected) {
        return None;
    }
    verdict(expected.name(), presence, resolved)
}

fn check_array_of<D: Document + ?Sized>(
    element: &Declaration,
    presence: Presence,
    resolved: &Resolved<'_, D>,
) -> Option<KeyedViolation> {
    let array = match resolved.value {
        Some(value) if resolved.kind == Some(Kind::Array) => value,
        _ => return verdict(Kind::Array.name(), presence, resolved),
    };

    let errors: Vec<IndexedViolation> = (0..array.length())
        .filter_map(|index| {
            element
                .check(Some(array), Some(Selector::Index(index)))
                .map(|e| IndexedViolation {
                    index,
                    violation: e.violation,
                })
        })
        .collect();

    if errors.is_empty() {
        return None;
    }
    Some(KeyedViolation::new(
        resolved.key.clone(),
        Violation::Elements(errors),
    ))
}

fn check_shape<D: Document + ?Sized>(
    fields: &[(String, Declaration)],
    presence: Presence,
    resolved: &Resolved<'_, D>,
) -> Option<KeyedViolation> {
    let object = match resolved.value {
        Some(value) if resolved.kind == Some(Kind::Object) => value,
        _ => return verdict(Kind::Object.name(), presence, resolved),
    };

    let mut errors = BTreeMap::new();
    for (name, declaration) in fields {
        if let Some(e) = declaration.check(Some(object), Some(Selector::Field(name))) {
            errors.insert(name.clone(), e.violation);
        }
    }

    if errors.is_empty() {
        return None;
    }
    Some(KeyedViolation::new(
        resolved.key.clone(),
        Violation::Fields(errors),
    ))
}

fn check_one_of<D: Document + ?Sized>(
    alternatives: &[Declaration],
    label: &str,
    presence: Presence,
    resolved: &Resolved<'_, D>,
) -> Option<KeyedViolation> {
    // An optional alternative accepts absent/null; that must not satisfy a
    // required oneOf.
    let accepts_pass = exists(resolved.kind) || !presence.is_required();

    for alternative in alternatives {
        if alternative.validate(resolved.value).is_none() && accepts_pass {
            return None;
        }
    }

    verdict(label, presence, resolved)
}
