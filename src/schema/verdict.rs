//! Leaf verdicts
//!
//! Runs once a position is known not to match: decides between `missing`,
//! `invalid`, or no violation at all (optional and absent/null).

use super::kind::{exists, kind_name};
use super::resolve::Resolved;
use super::types::Presence;
use super::violation::{KeyedViolation, Violation, ViolationKind};

/// Formats the message shared by every leaf violation.
pub fn mismatch_message(expected: &str, actual: &str) -> String {
    format!("expected {}, got {}", expected, actual)
}

/// Builds the leaf violation for a mismatch at `resolved`.
pub fn verdict<D: ?Sized>(
    expected: &str,
    presence: Presence,
    resolved: &Resolved<'_, D>,
) -> Option<KeyedViolation> {
    let kind = if exists(resolved.kind) {
        ViolationKind::Invalid
    } else if presence.is_required() {
        ViolationKind::Missing
    } else {
        return None;
    };

    let message = mismatch_message(expected, kind_name(resolved.kind));
    Some(KeyedViolation::new(
        resolved.key.clone(),
        Violation::leaf(kind, message),
    ))
}
