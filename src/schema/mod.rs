//! Declarations and the matching engine
//!
//! A declaration tree is built once, typically at startup, and then applied
//! to any number of payloads. Each application is a pure, synchronous walk
//! that returns either nothing or a path-addressed violation tree.
//!
//! # Design Principles
//!
//! - Declarations are immutable and checked for consistency when built
//! - Payloads are never mutated
//! - Violations are data, configuration mistakes are errors
//! - Open-world objects: undeclared fields are ignored
//! - Deterministic output for identical inputs

mod errors;
mod kind;
mod loader;
mod resolve;
mod types;
mod validator;
mod verdict;
mod violation;

pub use errors::{DeclarationError, DeclarationResult};
pub use kind::{classify, exists, kind_name, Document, Kind, ABSENT};
pub use loader::{parse_declaration, parse_declaration_str, SchemaRegistry};
pub use resolve::{resolve, ErrorKey, Resolved, Selector, PAYLOAD_KEY};
pub use types::{Declaration, Presence, TypeTag};
pub use verdict::{mismatch_message, verdict};
pub use violation::{IndexedViolation, KeyedViolation, Violation, ViolationKind};
