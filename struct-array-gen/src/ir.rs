//! Intermediate representation shared by the generator stages.
//!
//! Scanners produce [`AttributeOccurrence`]s, extraction turns them into
//! [`GenerationRequest`]s and emission consumes those. None of these types
//! know where the data came from (a manifest, a macro invocation, a test
//! fixture), which keeps every stage unit-testable on its own.

use std::fmt;
use std::num::NonZeroU8;

use heck::ToSnakeCase;

use crate::error::SchemaErrorKind;

/// Runtime type tag of a resolved attribute argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Str,
    Int,
    Bool,
    Float,
    Other,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArgKind::Str => "a string",
            ArgKind::Int => "an integer",
            ArgKind::Bool => "a boolean",
            ArgKind::Float => "a float",
            ArgKind::Other => "a non-literal expression",
        })
    }
}

/// A single positional attribute argument, as resolved by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i128),
    Bool(bool),
    Float(f64),
    /// Anything that is not a plain literal. Holds the source text for
    /// diagnostics.
    Other(String),
}

impl ArgValue {
    pub fn kind(&self) -> ArgKind {
        match self {
            ArgValue::Str(_) => ArgKind::Str,
            ArgValue::Int(_) => ArgKind::Int,
            ArgValue::Bool(_) => ArgKind::Bool,
            ArgValue::Float(_) => ArgKind::Float,
            ArgValue::Other(_) => ArgKind::Other,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_owned())
    }
}

impl From<i128> for ArgValue {
    fn from(value: i128) -> Self {
        ArgValue::Int(value)
    }
}

/// One attribute attached to a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTag {
    /// Path as written, e.g. `struct_array` or `struct_array::struct_array`.
    pub path: String,
    pub args: Vec<ArgValue>,
}

impl AttributeTag {
    pub fn new(path: impl Into<String>, args: Vec<ArgValue>) -> Self {
        Self {
            path: path.into(),
            args,
        }
    }

    /// Last path segment, which is what extraction matches on.
    pub fn name(&self) -> &str {
        self.path
            .rsplit("::")
            .next()
            .unwrap_or(&self.path)
            .trim()
    }
}

/// A declaration reported by a [`Scanner`](crate::scan::Scanner) together
/// with every attribute attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeOccurrence {
    /// Human readable name of the originating declaration. For the inline
    /// shape this is also the name of the generated type.
    pub declaration: String,
    pub attributes: Vec<AttributeTag>,
}

impl AttributeOccurrence {
    pub fn new(declaration: impl Into<String>, attributes: Vec<AttributeTag>) -> Self {
        Self {
            declaration: declaration.into(),
            attributes,
        }
    }
}

/// Which argument layout an occurrence uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `(name, namespace, size)`: declares a brand new standalone type.
    Named,
    /// `(size)`: expands the annotated declaration in place.
    Inline,
}

impl Shape {
    pub fn arity(self) -> usize {
        match self {
            Shape::Named => 3,
            Shape::Inline => 1,
        }
    }

    pub fn size_index(self) -> usize {
        match self {
            Shape::Named => 2,
            Shape::Inline => 0,
        }
    }
}

/// Module path a generated type is declared in. The empty path is the root
/// of the generated document.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dotted (`Geometry.Shapes`) or Rust-style (`geometry::shapes`)
    /// path. Segments are normalized to snake_case module names.
    pub fn parse(path: &str) -> Result<Self, SchemaErrorKind> {
        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::root());
        }

        let invalid = || SchemaErrorKind::InvalidNamespace {
            value: path.to_owned(),
        };

        let mut segments = Vec::new();
        for raw in path.split("::").flat_map(|part| part.split('.')) {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(invalid());
            }
            let segment = raw.to_snake_case();
            if !is_identifier(&segment) {
                return Err(invalid());
            }
            segments.push(segment);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

/// One validated instruction to synthesize one container type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationRequest {
    pub name: String,
    pub namespace: Namespace,
    pub size: NonZeroU8,
}

impl GenerationRequest {
    pub fn new(name: impl Into<String>, namespace: Namespace, size: NonZeroU8) -> Self {
        Self {
            name: name.into(),
            namespace,
            size,
        }
    }

    /// Number of slots as a `usize`.
    pub fn len(&self) -> usize {
        usize::from(self.size.get())
    }

    /// `namespace::Name`, or just `Name` at the root.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_root() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }
}

/// Whether `value` can be used verbatim as a Rust identifier (keywords are
/// rejected unless written as raw identifiers).
pub fn is_identifier(value: &str) -> bool {
    syn::parse_str::<syn::Ident>(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_accepts_dotted_and_rust_paths() {
        let dotted = Namespace::parse("Geometry.Shapes").unwrap();
        let rusty = Namespace::parse("geometry::shapes").unwrap();
        assert_eq!(dotted, rusty);
        assert_eq!(dotted.to_string(), "geometry::shapes");
    }

    #[test]
    fn empty_namespace_is_root() {
        assert!(Namespace::parse("  ").unwrap().is_root());
    }

    #[test]
    fn namespace_rejects_empty_segments_and_keywords() {
        assert!(Namespace::parse("geometry..shapes").is_err());
        assert!(Namespace::parse("Type").is_err());
        assert!(Namespace::parse("3d").is_err());
    }

    #[test]
    fn tag_name_is_last_segment() {
        let tag = AttributeTag::new("struct_array::struct_array", vec![]);
        assert_eq!(tag.name(), "struct_array");
        assert_eq!(AttributeTag::new("struct_array", vec![]).name(), "struct_array");
    }

    #[test]
    fn qualified_name_omits_root() {
        let size = NonZeroU8::new(2).unwrap();
        let nested = GenerationRequest::new("Pair", Namespace::parse("a.b").unwrap(), size);
        assert_eq!(nested.qualified_name(), "a::b::Pair");
        let root = GenerationRequest::new("Pair", Namespace::root(), size);
        assert_eq!(root.qualified_name(), "Pair");
    }
}
