//! Static field schemas for decodable entity types.
//!
//! A [`Schema`] is the ordered list of `(field name, field kind)` pairs for
//! one entity type. Schemas are plain `static` data built with `const fn`
//! constructors, usually through the [`entity!`](crate::entity) macro, so no
//! runtime introspection is involved. Nested entity fields reference their
//! schema through a function pointer, which lets a type refer to itself.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlish::{Entity, Field, FieldKind, ScalarKind, Schema};
//!
//! struct Address;
//! struct Person;
//!
//! impl Entity for Address {
//!     fn schema() -> &'static Schema {
//!         static SCHEMA: Schema = Schema::new("Address", &[
//!             Field::new("city", FieldKind::String),
//!         ]);
//!         &SCHEMA
//!     }
//! }
//!
//! impl Entity for Person {
//!     fn schema() -> &'static Schema {
//!         static SCHEMA: Schema = Schema::new("Person", &[
//!             Field::new("name", FieldKind::String),
//!             Field::new("tags", FieldKind::List(ScalarKind::String)),
//!             Field::new("address", FieldKind::Entity(Address::schema)),
//!         ]);
//!         &SCHEMA
//!     }
//! }
//!
//! assert_eq!(Person::schema().fields().len(), 3);
//! ```

use crate::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// Resolves the schema of a nested entity type.
pub type SchemaRef = fn() -> &'static Schema;

/// Declared type of a primitive value or list element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
    /// Keep whatever the scanner produced.
    Any,
}

impl ScalarKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Any => "any",
        }
    }
}

/// Declared type of one entity field.
#[derive(Clone, Copy)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    List(ScalarKind),
    Entity(SchemaRef),
    Any,
}

impl FieldKind {
    /// The scalar kind for primitive fields, `None` for lists and entities.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            FieldKind::String => Some(ScalarKind::String),
            FieldKind::Integer => Some(ScalarKind::Integer),
            FieldKind::Float => Some(ScalarKind::Float),
            FieldKind::Boolean => Some(ScalarKind::Boolean),
            FieldKind::Any => Some(ScalarKind::Any),
            FieldKind::List(_) | FieldKind::Entity(_) => None,
        }
    }

    /// The nested schema for entity fields.
    #[must_use]
    pub fn entity_schema(&self) -> Option<&'static Schema> {
        match self {
            FieldKind::Entity(schema) => Some(schema()),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => f.write_str("String"),
            FieldKind::Integer => f.write_str("Integer"),
            FieldKind::Float => f.write_str("Float"),
            FieldKind::Boolean => f.write_str("Boolean"),
            FieldKind::Any => f.write_str("Any"),
            FieldKind::List(kind) => write!(f, "List({:?})", kind),
            FieldKind::Entity(schema) => write!(f, "Entity({})", schema().name()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => f.write_str("string"),
            FieldKind::Integer => f.write_str("integer"),
            FieldKind::Float => f.write_str("float"),
            FieldKind::Boolean => f.write_str("boolean"),
            FieldKind::Any => f.write_str("any"),
            FieldKind::List(kind) => write!(f, "list of {}", kind.name()),
            FieldKind::Entity(schema) => write!(f, "entity {}", schema().name()),
        }
    }
}

/// One declared field.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    name: &'static str,
    kind: FieldKind,
}

impl Field {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Field { name, kind }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

/// The ordered field list of one entity type.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: &'static [Field],
}

impl Schema {
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Schema { name, fields }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn fields(&self) -> &'static [Field] {
        self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Types that can be reconstructed from decoded text.
///
/// Implement by hand or with [`entity!`](crate::entity).
pub trait Entity {
    fn schema() -> &'static Schema;
}

/// Lookup of schemas by type name, for decoding when the target type is only
/// known at runtime.
///
/// # Examples
///
/// ```rust
/// use serde_tomlish::{Field, FieldKind, Schema, SchemaRegistry};
///
/// static POINT: Schema = Schema::new("Point", &[
///     Field::new("x", FieldKind::Integer),
///     Field::new("y", FieldKind::Integer),
/// ]);
///
/// let mut registry = SchemaRegistry::new();
/// registry.register_schema(&POINT);
///
/// assert!(registry.get("Point").is_ok());
/// assert!(registry.get("Line").is_err());
/// ```
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<&'static str, &'static Schema>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        SchemaRegistry::default()
    }

    /// Registers `T` and every entity schema reachable from it.
    pub fn register<T: Entity>(&mut self) -> &mut Self {
        self.register_schema(T::schema())
    }

    /// Registers `schema` and every entity schema reachable from it.
    pub fn register_schema(&mut self, schema: &'static Schema) -> &mut Self {
        let mut pending = vec![schema];
        while let Some(schema) = pending.pop() {
            if self.schemas.contains_key(schema.name()) {
                continue;
            }
            self.schemas.insert(schema.name(), schema);
            pending.extend(
                schema
                    .fields()
                    .iter()
                    .filter_map(|field| field.kind().entity_schema()),
            );
        }
        self
    }

    /// Looks up a schema by type name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSchema`] if no schema was registered under `name`.
    pub fn get(&self, name: &str) -> Result<&'static Schema> {
        self.schemas
            .get(name)
            .copied()
            .ok_or_else(|| Error::missing_schema(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered type names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schemas.keys().copied()
    }
}
