//! Declaration types
//!
//! A declaration is an immutable rule describing the expected shape of a
//! value. Declarations compose into finite, acyclic trees of owned nodes:
//! - string, number, boolean: exact primitive kinds
//! - array, object: any array / any object
//! - arrayOf: array whose every element matches one declaration
//! - shape: object whose named fields match their declarations
//! - oneOf: value matching at least one of two or more declarations
//!
//! Every declaration is optional unless turned into its required sibling
//! with [`Declaration::required`].

use std::fmt;

use super::errors::{DeclarationError, DeclarationResult};
use super::kind::Kind;

/// Type tag carried by every declaration, used in `oneOf` labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Object,
    /// Both `array` and `arrayOf`
    Array,
    Shape,
    OneOf,
}

impl TypeTag {
    /// Returns the tag name used in expected-type labels
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Object => "object",
            TypeTag::Array => "array",
            TypeTag::Shape => "shape",
            TypeTag::OneOf => "oneOf",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two invocation modes of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Presence {
    /// Absent or null values pass
    #[default]
    Optional,
    /// Absent or null values are reported as missing
    Required,
}

impl Presence {
    pub fn is_required(&self) -> bool {
        matches!(self, Presence::Required)
    }
}

/// Kinds a primitive declaration can expect. `null` is never expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Primitive {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl Primitive {
    pub(crate) fn kind(self) -> Kind {
        match self {
            Primitive::String => Kind::String,
            Primitive::Number => Kind::Number,
            Primitive::Boolean => Kind::Boolean,
            Primitive::Array => Kind::Array,
            Primitive::Object => Kind::Object,
        }
    }

    fn tag(self) -> TypeTag {
        match self {
            Primitive::String => TypeTag::String,
            Primitive::Number => TypeTag::Number,
            Primitive::Boolean => TypeTag::Boolean,
            Primitive::Array => TypeTag::Array,
            Primitive::Object => TypeTag::Object,
        }
    }
}

/// The matching rule of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Rule {
    /// Direct kind comparison
    Primitive(Primitive),
    /// Every element matches the boxed declaration
    ArrayOf(Box<Declaration>),
    /// Declared fields, in declaration order
    Shape(Vec<(String, Declaration)>),
    /// At least one alternative matches
    OneOf {
        alternatives: Vec<Declaration>,
        /// Alternatives' tags joined with ` || `
        label: String,
    },
}

/// An immutable, composable rule describing the expected shape of a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub(crate) rule: Rule,
    pub(crate) presence: Presence,
}

impl Declaration {
    fn optional_rule(rule: Rule) -> Self {
        Self {
            rule,
            presence: Presence::Optional,
        }
    }

    fn primitive(primitive: Primitive) -> Self {
        Self::optional_rule(Rule::Primitive(primitive))
    }

    /// Any string
    pub fn string() -> Self {
        Self::primitive(Primitive::String)
    }

    /// Any number
    pub fn number() -> Self {
        Self::primitive(Primitive::Number)
    }

    /// `true` or `false`
    pub fn boolean() -> Self {
        Self::primitive(Primitive::Boolean)
    }

    /// Array of elements of any kind
    pub fn array() -> Self {
        Self::primitive(Primitive::Array)
    }

    /// Object of any shape
    pub fn object() -> Self {
        Self::primitive(Primitive::Object)
    }

    /// Array whose every element matches `element`
    pub fn array_of(element: Declaration) -> Self {
        Self::optional_rule(Rule::ArrayOf(Box::new(element)))
    }

    /// Object whose named fields match their declarations.
    ///
    /// Fields are checked in the order given. Undeclared fields are ignored.
    pub fn shape<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Declaration)>,
        K: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, declaration)| (name.into(), declaration))
            .collect();
        Self::optional_rule(Rule::Shape(fields))
    }

    /// Value matching at least one of `alternatives`, tried in order.
    ///
    /// # Errors
    ///
    /// - fewer than two alternatives (`SHAPE_ONE_OF_ARITY`)
    /// - an alternative that is itself a `oneOf` (`SHAPE_ONE_OF_NESTED`)
    pub fn one_of<I>(alternatives: I) -> DeclarationResult<Self>
    where
        I: IntoIterator<Item = Declaration>,
    {
        let alternatives: Vec<Declaration> = alternatives.into_iter().collect();

        if alternatives.len() < 2 {
            return Err(DeclarationError::NotEnoughAlternatives {
                found: alternatives.len(),
            });
        }

        if let Some(position) = alternatives
            .iter()
            .position(|alt| alt.type_tag() == TypeTag::OneOf)
        {
            return Err(DeclarationError::NestedOneOf { position });
        }

        let label = alternatives
            .iter()
            .map(|alt| alt.type_tag().name())
            .collect::<Vec<_>>()
            .join(" || ");

        Ok(Self::optional_rule(Rule::OneOf {
            alternatives,
            label,
        }))
    }

    /// The sibling declaration that also enforces presence.
    pub fn required(self) -> Self {
        Self {
            presence: Presence::Required,
            ..self
        }
    }

    /// The sibling declaration that lets absent and null values pass.
    pub fn optional(self) -> Self {
        Self {
            presence: Presence::Optional,
            ..self
        }
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_required(&self) -> bool {
        self.presence.is_required()
    }

    /// Type tag of this declaration. Required and optional siblings share it.
    pub fn type_tag(&self) -> TypeTag {
        match &self.rule {
            Rule::Primitive(primitive) => primitive.tag(),
            Rule::ArrayOf(_) => TypeTag::Array,
            Rule::Shape(_) => TypeTag::Shape,
            Rule::OneOf { .. } => TypeTag::OneOf,
        }
    }

    /// Label used as "expected ..." when this declaration fails at a leaf.
    pub fn expected_label(&self) -> &str {
        match &self.rule {
            Rule::Primitive(primitive) => primitive.kind().name(),
            Rule::ArrayOf(_) => Kind::Array.name(),
            Rule::Shape(_) => Kind::Object.name(),
            Rule::OneOf { label, .. } => label.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_sibling_shares_tag() {
        let optional = Declaration::string();
        let required = optional.clone().required();
        assert!(!optional.is_required());
        assert!(required.is_required());
        assert_eq!(optional.type_tag(), required.type_tag());
        assert_eq!(required.optional(), optional);
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(Declaration::string().type_tag(), TypeTag::String);
        assert_eq!(Declaration::number().type_tag(), TypeTag::Number);
        assert_eq!(Declaration::boolean().type_tag(), TypeTag::Boolean);
        assert_eq!(Declaration::array().type_tag(), TypeTag::Array);
        assert_eq!(Declaration::object().type_tag(), TypeTag::Object);
        assert_eq!(
            Declaration::array_of(Declaration::string()).type_tag(),
            TypeTag::Array
        );
        assert_eq!(
            Declaration::shape([("a", Declaration::string())]).type_tag(),
            TypeTag::Shape
        );
        let one_of = Declaration::one_of([Declaration::string(), Declaration::number()]).unwrap();
        assert_eq!(one_of.type_tag(), TypeTag::OneOf);
        assert_eq!(one_of.type_tag().to_string(), "oneOf");
    }

    #[test]
    fn test_one_of_needs_two_alternatives() {
        let err = Declaration::one_of([Declaration::string()]).unwrap_err();
        assert_eq!(err, DeclarationError::NotEnoughAlternatives { found: 1 });

        let err = Declaration::one_of(Vec::new()).unwrap_err();
        assert_eq!(err, DeclarationError::NotEnoughAlternatives { found: 0 });
    }

    #[test]
    fn test_one_of_rejects_direct_nesting() {
        let inner = Declaration::one_of([Declaration::string(), Declaration::number()]).unwrap();
        let err = Declaration::one_of([Declaration::string(), inner.required()]).unwrap_err();
        assert_eq!(err, DeclarationError::NestedOneOf { position: 1 });
    }

    #[test]
    fn test_one_of_label() {
        let decl = Declaration::one_of([
            Declaration::string(),
            Declaration::number().required(),
            Declaration::shape([("lol", Declaration::string().required())]),
            Declaration::array_of(Declaration::boolean()),
        ])
        .unwrap();
        assert_eq!(decl.expected_label(), "string || number || shape || array");
    }

    #[test]
    fn test_primitive_labels_match_tags() {
        for decl in [
            Declaration::string(),
            Declaration::number(),
            Declaration::boolean(),
            Declaration::array(),
            Declaration::object(),
        ] {
            assert_eq!(decl.expected_label(), decl.type_tag().name());
            assert_ne!(decl.expected_label(), Kind::Null.name());
        }
    }

    #[test]
    fn test_container_labels() {
        assert_eq!(Declaration::array_of(Declaration::string()).expected_label(), "array");
        assert_eq!(Declaration::shape(Vec::<(String, Declaration)>::new()).expected_label(), "object");
    }
}
