//! Declaration configuration errors
//!
//! These signal a mistake in how a schema was declared, never a problem with
//! the payload being validated. Payload problems are reported as violations.
//!
//! Error codes:
//! - SHAPE_ONE_OF_ARITY
//! - SHAPE_ONE_OF_NESTED
//! - SHAPE_ONE_OF_CONFIG
//! - SHAPE_SHAPE_CONFIG
//! - SHAPE_ARRAY_OF_MISSING
//! - SHAPE_ARRAY_OF_CONFIG
//! - SHAPE_NOT_A_DECLARATION
//! - SHAPE_UNKNOWN_TYPE
//! - SHAPE_REQUIRED_CONFIG
//! - SHAPE_MALFORMED
//! - SHAPE_IO
//! - SHAPE_DUPLICATE_SCHEMA
//!
//! Errors raised while loading a schema file are wrapped with the file
//! (`InFile`); errors from the builder are wrapped with the document path
//! (`AtPath`). Wrappers report the code of the error they wrap.

use thiserror::Error;

/// Result type for declaration construction and loading
pub type DeclarationResult<T> = Result<T, DeclarationError>;

/// Errors raised while building or loading declarations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// oneOf with fewer than two alternatives
    #[error(
        "oneOf needs at least 2 declarations to work (got {found}), otherwise use a precise declaration such as string instead"
    )]
    NotEnoughAlternatives { found: usize },

    /// oneOf directly inside another oneOf
    #[error("do not nest oneOf directly inside another oneOf (alternative {position})")]
    NestedOneOf { position: usize },

    /// oneOf alternatives not given as a list
    #[error("unclear configuration at {path}: oneOf expects a list of declarations, got {found}")]
    OneOfNotSequence { path: String, found: String },

    /// shape fields not given as a mapping
    #[error("unclear configuration at {path}: shape expects a mapping of field declarations, got {found}")]
    ShapeNotMapping { path: String, found: String },

    /// arrayOf without an element declaration
    #[error("missing configuration parameters for arrayOf at {path}")]
    ArrayOfMissingElement { path: String },

    /// arrayOf given something other than a declaration
    #[error("unclear configuration at {path}: try {hint} instead")]
    ArrayOfUnclear { path: String, hint: String },

    /// A declaration was expected
    #[error("expected a declaration at {path}, got {found}")]
    NotADeclaration { path: String, found: String },

    /// Unrecognized `type` name
    #[error("unknown declaration type '{name}' at {path}")]
    UnknownType { path: String, name: String },

    /// `required` given something other than a boolean
    #[error("unclear configuration at {path}: \"required\" must be a boolean, got {found}")]
    RequiredNotBoolean { path: String, found: String },

    /// A builder error raised inside a declaration document
    #[error("{source} at {path}")]
    AtPath {
        path: String,
        source: Box<DeclarationError>,
    },

    /// Any error raised while loading a schema file
    #[error("in schema file '{file}': {source}")]
    InFile {
        file: String,
        source: Box<DeclarationError>,
    },

    /// Declaration document could not be parsed
    #[error("malformed declaration document '{source_name}': {reason}")]
    Malformed { source_name: String, reason: String },

    /// Filesystem failure while loading declarations
    #[error("failed to load declarations from '{path}': {reason}")]
    Io { path: String, reason: String },

    /// A schema name was registered twice
    #[error("schema '{name}' is already registered")]
    DuplicateSchema { name: String },
}

impl DeclarationError {
    /// Wraps this error with the schema file it came from.
    ///
    /// Errors that already name their source are left as they are.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            DeclarationError::Malformed { .. }
            | DeclarationError::Io { .. }
            | DeclarationError::InFile { .. } => self,
            other => DeclarationError::InFile {
                file: file.into(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, without file or path wrappers
    pub fn root_cause(&self) -> &DeclarationError {
        match self {
            DeclarationError::AtPath { source, .. } | DeclarationError::InFile { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DeclarationError::NotEnoughAlternatives { .. } => "SHAPE_ONE_OF_ARITY",
            DeclarationError::NestedOneOf { .. } => "SHAPE_ONE_OF_NESTED",
            DeclarationError::OneOfNotSequence { .. } => "SHAPE_ONE_OF_CONFIG",
            DeclarationError::ShapeNotMapping { .. } => "SHAPE_SHAPE_CONFIG",
            DeclarationError::ArrayOfMissingElement { .. } => "SHAPE_ARRAY_OF_MISSING",
            DeclarationError::ArrayOfUnclear { .. } => "SHAPE_ARRAY_OF_CONFIG",
            DeclarationError::NotADeclaration { .. } => "SHAPE_NOT_A_DECLARATION",
            DeclarationError::UnknownType { .. } => "SHAPE_UNKNOWN_TYPE",
            DeclarationError::RequiredNotBoolean { .. } => "SHAPE_REQUIRED_CONFIG",
            DeclarationError::AtPath { source, .. } | DeclarationError::InFile { source, .. } => {
                source.code()
            }
            DeclarationError::Malformed { .. } => "SHAPE_MALFORMED",
            DeclarationError::Io { .. } => "SHAPE_IO",
            DeclarationError::DuplicateSchema { .. } => "SHAPE_DUPLICATE_SCHEMA",
        }
    }
}
