//! Error types for diagram parsing and semantic resolution
//!
//! Each pipeline stage fails with its own typed error; `DiagramError` wraps
//! both for callers that run the whole pipeline at once.

use thiserror::Error;

/// Failure to parse diagram text.
///
/// Parsing is all-or-nothing: no partial AST is produced. Line and column
/// are 1-based and point at the first offending character.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse error: {message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: String, line: usize, column: usize) -> Self {
        Self {
            message,
            line,
            column,
        }
    }
}

/// Failure to resolve a parsed diagram into a state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    /// The same vertex name was declared more than once, at any nesting depth
    #[error("Duplicate vertex defined: {name}")]
    DuplicateVertex { name: String },

    /// A transition referenced a name that no state declaration defines
    #[error("Undefined vertex: {name} (referenced by {reference})")]
    UndefinedVertex { name: String, reference: String },
}

impl SemanticError {
    /// Create a duplicate-vertex error
    pub fn duplicate_vertex(name: String) -> Self {
        Self::DuplicateVertex { name }
    }

    /// Create an undefined-vertex error naming the construct that referenced it
    pub fn undefined_vertex(name: String, reference: String) -> Self {
        Self::UndefinedVertex { name, reference }
    }

    /// The vertex name the error is about
    pub fn vertex_name(&self) -> &str {
        match self {
            Self::DuplicateVertex { name } => name,
            Self::UndefinedVertex { name, .. } => name,
        }
    }
}

/// Failure in either pipeline stage, for one-shot compilation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagramError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),
}
