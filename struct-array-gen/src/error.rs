use std::path::PathBuf;

use thiserror::Error;

use crate::ir::ArgKind;

/// An annotation whose arguments do not match the declared schema.
///
/// This is a build configuration bug rather than a data condition, so it
/// aborts the whole generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid #[{attribute}] on `{declaration}`: {kind}")]
pub struct SchemaError {
    pub declaration: String,
    pub attribute: String,
    pub kind: SchemaErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaErrorKind {
    #[error("expected {expected} positional arguments, found {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("argument {index} must be {expected}, found {found}")]
    TypeMismatch {
        index: usize,
        expected: ArgKind,
        found: ArgKind,
    },

    #[error("size {value} does not fit in a byte; use 1..=255, or 0 to disable generation")]
    SizeOutOfRange { value: i128 },

    #[error("`{value}` is not a valid type name")]
    InvalidName { value: String },

    #[error("`{value}` is not a valid namespace")]
    InvalidNamespace { value: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("struct array `{0}` is declared more than once")]
    DuplicateType(String),

    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest `{path}`")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid worker count {value} in `{path}`: expected 1..={max}")]
    WorkerCount {
        path: PathBuf,
        value: usize,
        max: usize,
    },

    #[error("a generation worker panicked; no output was produced")]
    WorkerPanicked,
}
