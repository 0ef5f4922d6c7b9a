//! # serde_tomlish
//!
//! A schema-driven codec between object graphs and a small TOML-like text
//! format.
//!
//! ## The format
//!
//! ```text
//! name = "Dima"
//! age = 22
//! score = 3.5
//! admin = true
//! manager = null
//! tags = ["a", "b", "c"]
//!
//! [address]
//! city = "Paris"
//!
//! [address.geo]
//! zone = 1
//! ```
//!
//! Primitive and list fields are `key = value` lines. Nested entities become
//! `[dotted.path]` sections after their parent's lines. Blank lines are
//! cosmetic. There are no comments, no multi-line values and no escapes
//! inside quoted strings.
//!
//! ## Key Features
//!
//! - **Arena graphs**: [`Graph`] stores records by [`EntityId`]; shared values
//!   are allowed, cycles are detected and reported
//! - **Static schemas**: decoding is driven by a [`Schema`] declared with
//!   [`entity!`] or by hand, with no runtime reflection
//! - **Three-stage decoding**: [`scan()`] to a flat map, [`nest()`] into a tree,
//!   [`instantiate()`] with per-field type coercion
//! - **Serde bridge**: derive `Serialize`/`Deserialize` and use [`to_string`] /
//!   [`from_str`] directly
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_tomlish::{entity, from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Address {
//!     city: String,
//!     country: String,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Person {
//!     name: String,
//!     age: i64,
//!     tags: Vec<String>,
//!     address: Address,
//! }
//!
//! entity!(Address { city: string, country: string });
//! entity!(Person { name: string, age: integer, tags: [string], address: Address });
//!
//! let person = Person {
//!     name: "Dima".to_string(),
//!     age: 22,
//!     tags: vec!["a".to_string(), "b".to_string()],
//!     address: Address { city: "Paris".to_string(), country: "France".to_string() },
//! };
//!
//! let text = to_string(&person).unwrap();
//! assert_eq!(
//!     text,
//!     "name = \"Dima\"\nage = 22\ntags = [\"a\", \"b\"]\n\n[address]\ncity = \"Paris\"\ncountry = \"France\""
//! );
//!
//! let back: Person = from_str(&text).unwrap();
//! assert_eq!(back, person);
//! ```
//!
//! ## Working with Graphs Directly
//!
//! ```rust
//! use serde_tomlish::{encode, Error, Graph, Value};
//!
//! let mut graph = Graph::new();
//! let data = graph.add_with("Data", [("text", Value::from("shared"))]);
//! let user = graph.add_with(
//!     "User",
//!     [("name", Value::from("Ivan")), ("data", Value::from(data)), ("backup", Value::from(data))],
//! );
//!
//! // The same record under two sibling fields is fine
//! assert!(encode(&graph, user).is_ok());
//!
//! // A record that contains itself is not
//! graph.set(data, "owner", user).unwrap();
//! assert!(matches!(encode(&graph, user), Err(Error::CycleDetected { .. })));
//! ```
//!
//! ## Error Handling
//!
//! Every failure aborts the call with an [`Error`]; see the [`error`] module.
//!
//! ## Thread Safety
//!
//! All traversal state is created per call. Independent graphs may be encoded
//! and decoded concurrently from any number of threads.

pub mod de;
pub mod error;
pub mod graph;
pub mod instantiate;
pub mod macros;
pub mod map;
pub mod nest;
pub mod options;
pub mod scan;
pub mod schema;
pub mod ser;
mod tracing_macros;
pub mod value;

pub use de::{
    decode_named, decode_with_options, from_document, from_str_with_options, GraphDeserializer,
};
pub use error::{Error, Result};
pub use graph::{Document, Graph, Record};
pub use instantiate::{coerce, instantiate};
pub use map::FieldMap;
pub use nest::{nest, nest_with_sections, NestedMap, Node};
pub use options::CodecOptions;
pub use scan::{scan, scan_with_sections, FlatMap, Literal};
pub use schema::{Entity, Field, FieldKind, ScalarKind, Schema, SchemaRef, SchemaRegistry};
pub use ser::{encode_with_options, to_graph, GraphSerializer};
pub use value::{EntityId, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Encodes the tree rooted at `root` with default options.
///
/// # Examples
///
/// ```rust
/// use serde_tomlish::{encode, Graph, Value};
///
/// let mut graph = Graph::new();
/// let root = graph.add_with("Point", [("x", Value::from(1)), ("y", Value::from(2))]);
/// assert_eq!(encode(&graph, root).unwrap(), "x = 1\ny = 2");
/// ```
///
/// # Errors
///
/// Returns [`Error::CycleDetected`] if a record is reachable from itself.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(graph: &Graph, root: EntityId) -> Result<String> {
    encode_with_options(graph, root, &CodecOptions::default())
}

/// Decodes `text` against `schema` with default options.
///
/// # Examples
///
/// ```rust
/// use serde_tomlish::{decode, Field, FieldKind, Schema, Value};
///
/// static POINT: Schema = Schema::new("Point", &[
///     Field::new("x", FieldKind::Integer),
///     Field::new("y", FieldKind::Integer),
/// ]);
///
/// let doc = decode("x = 1\ny = 2", &POINT).unwrap();
/// assert_eq!(doc.graph.field(doc.root, "x"), Some(&Value::Integer(1)));
/// ```
///
/// # Errors
///
/// Returns [`Error::TypeCoercion`] or [`Error::StructuralConflict`] if the
/// text does not fit the schema.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(text: &str, schema: &'static Schema) -> Result<Document> {
    decode_with_options(text, schema, &CodecOptions::default())
}

/// Serialize any `T: Serialize` struct to a string.
///
/// # Examples
///
/// ```rust
/// use serde_tomlish::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "x = 1\ny = 2");
/// ```
///
/// # Errors
///
/// Returns an error if the value is not a struct or holds a shape the format
/// cannot represent (maps, lists of structs, data-carrying enums).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &CodecOptions::default())
}

/// Serialize any `T: Serialize` struct to a string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &CodecOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let document = to_graph(value)?;
    encode_with_options(&document.graph, document.root, options)
}

/// Serialize any `T: Serialize` struct to a writer.
///
/// # Examples
///
/// ```rust
/// use serde_tomlish::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x = 1\ny = 2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &CodecOptions::default())
}

/// Serialize any `T: Serialize` struct to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &CodecOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string.
///
/// # Examples
///
/// ```rust
/// use serde_tomlish::{entity, from_str};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// entity!(Point { x: integer, y: integer });
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text does not fit `T`'s schema or serde rejects
/// the decoded values.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: Entity + DeserializeOwned,
{
    from_str_with_options(s, &CodecOptions::default())
}

/// Deserialize an instance of type `T` from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use serde_tomlish::{entity, from_reader};
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// entity!(Point { x: integer, y: integer });
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\ny = 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the text cannot be decoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: Entity + DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or cannot be decoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: Entity + DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
