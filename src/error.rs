//! Error types for encoding and decoding.
//!
//! Every failure aborts the whole call: the encoder never returns partial
//! text and the decoder never returns a partially built graph.
//!
//! ## Error Categories
//!
//! - **Encoding**: [`Error::CycleDetected`], [`Error::UnknownEntity`], [`Error::UnsupportedType`]
//! - **Scanning**: [`Error::Syntax`] (strict mode only)
//! - **Nesting**: [`Error::StructuralConflict`]
//! - **Instantiation**: [`Error::MissingSchema`], [`Error::TypeCoercion`]
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlish::{decode, Error, Field, FieldKind, Schema};
//!
//! static COUNTER: Schema = Schema::new("Counter", &[Field::new("hits", FieldKind::Integer)]);
//!
//! let result = decode("hits = \"12\"", &COUNTER);
//! assert!(matches!(result, Err(Error::TypeCoercion { .. })));
//! ```

use crate::EntityId;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An entity was re-entered while it was still being serialized.
    #[error("Cycle detected at `{path}`: entity is its own ancestor")]
    CycleDetected { path: String },

    /// Instantiation was requested for a type nobody registered a schema for.
    #[error("No schema registered for type `{type_name}`")]
    MissingSchema { type_name: String },

    /// A scanned value cannot be converted to the declared field type.
    #[error("Cannot coerce `{path}`: expected {expected}, found {found}")]
    TypeCoercion {
        path: String,
        expected: String,
        found: String,
    },

    /// A dotted key collides with a primitive already assigned on its path.
    #[error("Structural conflict at `{path}`: a value and a section share this path")]
    StructuralConflict { path: String },

    /// Malformed line, only reported when lenient scanning is disabled.
    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// An entity reference points outside the graph arena.
    #[error("Unknown entity {0}")]
    UnknownEntity(EntityId),

    /// A value shape the format cannot represent.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a cycle error for the section path at which the ancestor was re-entered.
    pub fn cycle_detected(path: &str) -> Self {
        Error::CycleDetected {
            path: path.to_string(),
        }
    }

    /// Creates a missing schema error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlish::Error;
    ///
    /// let err = Error::missing_schema("Person");
    /// assert!(err.to_string().contains("`Person`"));
    /// ```
    pub fn missing_schema(type_name: &str) -> Self {
        Error::MissingSchema {
            type_name: type_name.to_string(),
        }
    }

    /// Creates a coercion error for the field at `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlish::Error;
    ///
    /// let err = Error::type_coercion("person.age", "integer", "string \"22\"");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_coercion(path: &str, expected: &str, found: &str) -> Self {
        Error::TypeCoercion {
            path: path.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn structural_conflict(path: &str) -> Self {
        Error::StructuralConflict {
            path: path.to_string(),
        }
    }

    /// Creates a syntax error for a 1-based line number.
    pub fn syntax(line: usize, message: &str) -> Self {
        Error::Syntax {
            line,
            message: message.to_string(),
        }
    }

    pub fn unknown_entity(id: EntityId) -> Self {
        Error::UnknownEntity(id)
    }

    /// Creates an unsupported type error for shapes the format cannot represent.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlish::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader and writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
