//! shapeguard - declarative, composable runtime shape validation
//!
//! Declarations describe the expected shape of a JSON value tree:
//! primitives, `arrayOf`, `shape` and `oneOf`, each optional or required.
//! Validating a value returns nothing when it conforms, or a structured,
//! path-addressed description of every violation.

pub mod http;
pub mod schema;

pub use schema::{Declaration, DeclarationError, KeyedViolation, Violation, ViolationKind};
