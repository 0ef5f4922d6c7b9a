//! Deserialization: text back to object graphs and Rust values.
//!
//! Decoding runs three stages strictly in sequence, each consuming the full
//! output of the previous one:
//!
//! 1. [`scan`](crate::scan()) reads lines into a flat map of dotted keys
//! 2. [`nest`](crate::nest()) rebuilds the section tree
//! 3. [`instantiate`](crate::instantiate()) builds a fresh [`Graph`] from a schema
//!
//! [`GraphDeserializer`] then lets serde map the resulting records onto a
//! Rust type.
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_tomlish::{entity, from_str};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32, label: Option<String> }
//!
//! entity!(Point { x: integer, y: integer, label: string });
//!
//! let point: Point = from_str("y = 2\nx = 1").unwrap();
//! assert_eq!(point, Point { x: 1, y: 2, label: None });
//! ```

use crate::{
    instantiate, nest_with_sections, scan_with_sections, CodecOptions, Document, Entity, EntityId,
    Error, Graph, Result, Schema, SchemaRegistry, Value,
};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Decodes `text` against `schema` into a new graph.
///
/// # Errors
///
/// Returns [`Error::StructuralConflict`] for contradictory dotted paths,
/// [`Error::TypeCoercion`] for values that do not fit the schema and, in
/// strict mode, [`Error::Syntax`] for malformed lines.
pub fn decode_with_options(
    text: &str,
    schema: &'static Schema,
    options: &CodecOptions,
) -> Result<Document> {
    let (flat, sections) = scan_with_sections(text, options)?;
    let nested = nest_with_sections(flat, &sections)?;
    instantiate(schema, &nested)
}

/// Decodes `text` against the schema registered under `type_name`.
///
/// # Errors
///
/// Returns [`Error::MissingSchema`] if `registry` has no such type, or any
/// error of [`decode_with_options`].
///
/// # Examples
///
/// ```rust
/// use serde_tomlish::{decode_named, entity, CodecOptions, Error, SchemaRegistry, Value};
///
/// struct Point;
/// entity!(Point { x: integer, y: integer });
///
/// let mut registry = SchemaRegistry::new();
/// registry.register::<Point>();
///
/// let doc = decode_named("x = 1\ny = 2", "Point", &registry, &CodecOptions::default()).unwrap();
/// assert_eq!(doc.graph.field(doc.root, "y"), Some(&Value::Integer(2)));
///
/// let err = decode_named("x = 1", "Line", &registry, &CodecOptions::default()).unwrap_err();
/// assert!(matches!(err, Error::MissingSchema { .. }));
/// ```
pub fn decode_named(
    text: &str,
    type_name: &str,
    registry: &SchemaRegistry,
    options: &CodecOptions,
) -> Result<Document> {
    let schema = registry.get(type_name)?;
    decode_with_options(text, schema, options)
}

/// Decodes `text` into a `T`.
///
/// # Errors
///
/// Any decoding error, or [`Error::Custom`] if serde rejects the decoded
/// records (for example a `null` in a non-`Option` field).
pub fn from_str_with_options<T>(text: &str, options: &CodecOptions) -> Result<T>
where
    T: Entity + DeserializeOwned,
{
    let document = decode_with_options(text, T::schema(), options)?;
    from_document(&document)
}

/// Maps an already decoded document onto `T`.
///
/// # Errors
///
/// Returns an error if serde rejects the record tree.
pub fn from_document<T>(document: &Document) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(GraphDeserializer::new(&document.graph, document.root))
}

/// Serde deserializer over one record of a graph.
pub struct GraphDeserializer<'g> {
    graph: &'g Graph,
    value: Value,
}

impl<'g> GraphDeserializer<'g> {
    pub fn new(graph: &'g Graph, root: EntityId) -> Self {
        GraphDeserializer {
            graph,
            value: Value::Entity(root),
        }
    }

    fn with_value(graph: &'g Graph, value: Value) -> Self {
        GraphDeserializer { graph, value }
    }
}

impl<'de, 'g> de::Deserializer<'de> for GraphDeserializer<'g> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Integer(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::List(items) => visitor.visit_seq(SeqDeserializer::new(self.graph, items)),
            Value::Entity(id) => {
                let record = self.graph.record(id)?;
                let fields: Vec<(String, Value)> = record
                    .fields()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                visitor.visit_map(MapDeserializer::new(self.graph, fields))
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            other => Err(Error::custom(format!(
                "expected a unit variant name, found {}",
                other.kind_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer<'g> {
    graph: &'g Graph,
    iter: std::vec::IntoIter<Value>,
}

impl<'g> SeqDeserializer<'g> {
    fn new(graph: &'g Graph, items: Vec<Value>) -> Self {
        SeqDeserializer {
            graph,
            iter: items.into_iter(),
        }
    }
}

impl<'de, 'g> de::SeqAccess<'de> for SeqDeserializer<'g> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(GraphDeserializer::with_value(self.graph, value))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer<'g> {
    graph: &'g Graph,
    iter: std::vec::IntoIter<(String, Value)>,
    value: Option<Value>,
}

impl<'g> MapDeserializer<'g> {
    fn new(graph: &'g Graph, fields: Vec<(String, Value)>) -> Self {
        MapDeserializer {
            graph,
            iter: fields.into_iter(),
            value: None,
        }
    }
}

impl<'de, 'g> de::MapAccess<'de> for MapDeserializer<'g> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(GraphDeserializer::with_value(self.graph, value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}
