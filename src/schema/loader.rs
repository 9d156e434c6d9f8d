//! Declaration documents and the schema registry
//!
//! Declarations can be written as JSON documents so that schemas live in
//! configuration instead of code:
//!
//! ```json
//! {
//!   "type": "shape",
//!   "required": true,
//!   "fields": {
//!     "firstName": { "type": "string", "required": true },
//!     "tags": { "type": "arrayOf", "of": { "type": "string" } },
//!     "id": { "type": "oneOf", "of": [{ "type": "string" }, { "type": "number" }] }
//!   }
//! }
//! ```
//!
//! Every configuration check runs while the document is parsed, so a
//! registry that loaded successfully never fails on a payload.
//!
//! The registry keeps one root declaration per name, read from
//! `<schema_dir>/<name>.json`.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{DeclarationError, DeclarationResult};
use super::kind::Document;
use super::types::Declaration;

/// Path of the document root in error messages.
const ROOT_PATH: &str = "$";

/// Parses a declaration document.
pub fn parse_declaration(document: &Value) -> DeclarationResult<Declaration> {
    parse_at(document, ROOT_PATH)
}

/// Parses a declaration document from JSON text.
///
/// `source_name` only labels errors.
pub fn parse_declaration_str(text: &str, source_name: &str) -> DeclarationResult<Declaration> {
    let document: Value = serde_json::from_str(text).map_err(|e| DeclarationError::Malformed {
        source_name: source_name.to_string(),
        reason: format!("Invalid JSON: {}", e),
    })?;
    parse_declaration(&document)
}

fn parse_at(document: &Value, path: &str) -> DeclarationResult<Declaration> {
    let obj = declaration_object(document).ok_or_else(|| DeclarationError::NotADeclaration {
        path: path.to_string(),
        found: describe(document),
    })?;

    // declaration_object guarantees a string "type"
    let type_name = obj.get("type").and_then(Value::as_str).unwrap_or_default();

    let declaration = match type_name {
        "string" => Declaration::string(),
        "number" => Declaration::number(),
        "boolean" => Declaration::boolean(),
        "array" => Declaration::array(),
        "object" => Declaration::object(),
        "arrayOf" => parse_array_of(obj, path)?,
        "shape" => parse_shape(obj, path)?,
        "oneOf" => parse_one_of(obj, path)?,
        other => {
            return Err(DeclarationError::UnknownType {
                path: path.to_string(),
                name: other.to_string(),
            })
        }
    };

    match obj.get("required") {
        None | Some(Value::Bool(false)) => Ok(declaration),
        Some(Value::Bool(true)) => Ok(declaration.required()),
        Some(other) => Err(DeclarationError::RequiredNotBoolean {
            path: path.to_string(),
            found: describe(other),
        }),
    }
}

fn parse_array_of(obj: &Map<String, Value>, path: &str) -> DeclarationResult<Declaration> {
    let element_path = format!("{}.of", path);
    let element = match obj.get("of") {
        None | Some(Value::Null) => {
            return Err(DeclarationError::ArrayOfMissingElement {
                path: path.to_string(),
            })
        }
        Some(of) if declaration_object(of).is_some() => parse_at(of, &element_path)?,
        Some(other) => {
            return Err(DeclarationError::ArrayOfUnclear {
                path: element_path,
                hint: array_of_hint(other),
            })
        }
    };
    Ok(Declaration::array_of(element))
}

fn parse_shape(obj: &Map<String, Value>, path: &str) -> DeclarationResult<Declaration> {
    let fields = match obj.get("fields") {
        Some(Value::Object(fields)) => fields,
        other => {
            return Err(DeclarationError::ShapeNotMapping {
                path: path.to_string(),
                found: other.map_or_else(|| "nothing".to_string(), describe),
            })
        }
    };

    let mut parsed = Vec::with_capacity(fields.len());
    for (name, field) in fields {
        let field_path = format!("{}.fields.{}", path, name);
        parsed.push((name.clone(), parse_at(field, &field_path)?));
    }
    Ok(Declaration::shape(parsed))
}

fn parse_one_of(obj: &Map<String, Value>, path: &str) -> DeclarationResult<Declaration> {
    let alternatives = match obj.get("of") {
        Some(Value::Array(alternatives)) => alternatives,
        other => {
            return Err(DeclarationError::OneOfNotSequence {
                path: path.to_string(),
                found: other.map_or_else(|| "nothing".to_string(), describe),
            })
        }
    };

    let of_path = format!("{}.of", path);
    let at_path = |source: DeclarationError| DeclarationError::AtPath {
        path: of_path.clone(),
        source: Box::new(source),
    };

    // arity first, so a lone alternative is reported before its contents
    if alternatives.len() < 2 {
        return Err(at_path(DeclarationError::NotEnoughAlternatives {
            found: alternatives.len(),
        }));
    }

    let parsed = alternatives
        .iter()
        .enumerate()
        .map(|(i, alt)| parse_at(alt, &format!("{}[{}]", of_path, i)))
        .collect::<DeclarationResult<Vec<_>>>()?;

    Declaration::one_of(parsed).map_err(at_path)
}

/// A declaration document is an object with a string `type`.
fn declaration_object(document: &Value) -> Option<&Map<String, Value>> {
    document
        .as_object()
        .filter(|obj| obj.get("type").map_or(false, Value::is_string))
}

/// Suggests what was probably meant by an arrayOf element that is not a
/// declaration document.
fn array_of_hint(element: &Value) -> String {
    match element {
        Value::Object(_) => {
            r#"{"type": "arrayOf", "of": {"type": "shape", "fields": {...}}} or {"type": "arrayOf", "of": {"type": "object"}}"#
                .to_string()
        }
        Value::Array(_) => {
            r#"{"type": "arrayOf", "of": {"type": "arrayOf", "of": {"type": "string"}}} or {"type": "arrayOf", "of": {"type": "array"}}"#
                .to_string()
        }
        Value::String(name) if is_primitive_name(name) => {
            format!(r#"{{"type": "arrayOf", "of": {{"type": "{}"}}}}"#, name)
        }
        other => format!(
            r#"{{"type": "arrayOf", "of": {{"type": "{}"}}}}"#,
            other.kind().name()
        ),
    }
}

fn is_primitive_name(name: &str) -> bool {
    matches!(name, "string" | "number" | "boolean" | "array" | "object")
}

fn describe(value: &Value) -> String {
    match value {
        Value::Object(_) => "an object without a string \"type\"".to_string(),
        other => other.kind().name().to_string(),
    }
}

/// Registry of named root declarations.
pub struct SchemaRegistry {
    /// Directory containing declaration documents
    schema_dir: PathBuf,
    /// Loaded declarations by name
    schemas: BTreeMap<String, Declaration>,
}

impl SchemaRegistry {
    /// Creates an empty registry reading from `schema_dir`.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: BTreeMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` document in the schema directory.
    ///
    /// A missing directory loads nothing. Any malformed document fails the
    /// whole load.
    pub fn load_all(&mut self) -> DeclarationResult<()> {
        if !self.schema_dir.exists() {
            tracing::debug!(dir = %self.schema_dir.display(), "schema directory absent, nothing to load");
            return Ok(());
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| DeclarationError::Io {
            path: self.schema_dir.display().to_string(),
            reason: format!("Failed to read schema directory: {}", e),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DeclarationError::Io {
                path: self.schema_dir.display().to_string(),
                reason: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }

        // deterministic load order
        paths.sort();
        for path in paths {
            self.load_schema_file(&path)?;
        }

        tracing::debug!(count = self.schemas.len(), "schemas loaded");
        Ok(())
    }

    /// Loads a single declaration document, named after its file stem.
    pub fn load_schema_file(&mut self, path: &Path) -> DeclarationResult<()> {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| DeclarationError::Io {
                path: path.display().to_string(),
                reason: "File name is not valid UTF-8".to_string(),
            })?
            .to_string();

        let content = fs::read_to_string(path).map_err(|e| DeclarationError::Io {
            path: path.display().to_string(),
            reason: format!("Failed to read file: {}", e),
        })?;

        let file = path.display().to_string();
        let declaration =
            parse_declaration_str(&content, &file).map_err(|e| e.in_file(file.as_str()))?;
        tracing::debug!(schema = %name, path = %path.display(), "loaded declaration");

        self.register(name, declaration).map_err(|e| e.in_file(file))
    }

    /// Registers a declaration under `name`.
    ///
    /// Names are unique; registering one twice fails.
    pub fn register(&mut self, name: impl Into<String>, declaration: Declaration) -> DeclarationResult<()> {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Err(DeclarationError::DuplicateSchema { name });
        }
        self.schemas.insert(name, declaration);
        Ok(())
    }

    /// Gets a declaration by name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.schemas.get(name)
    }

    /// Checks if a declaration is registered under `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Returns the number of registered declarations.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
