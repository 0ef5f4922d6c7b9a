//! Serialization: object graphs to text.
//!
//! This module holds the encoder, which walks a [`Graph`] depth-first from a
//! root record, and [`GraphSerializer`], which turns any `T: Serialize`
//! struct into such a graph.
//!
//! ## Output layout
//!
//! A record's primitive and list fields become `name = value` lines. Nested
//! entity fields become `[dotted.path]` sections emitted after all of the
//! record's own lines, in declaration order, each section followed by its own
//! sub-sections. Blocks are separated by a blank line.
//!
//! ```rust
//! use serde_tomlish::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Address { city: String, country: String }
//!
//! #[derive(Serialize)]
//! struct Person { name: String, address: Address, age: i64, tags: Vec<String> }
//!
//! let person = Person {
//!     name: "Dima".to_string(),
//!     address: Address { city: "Paris".to_string(), country: "France".to_string() },
//!     age: 22,
//!     tags: vec!["a".to_string(), "b".to_string()],
//! };
//!
//! assert_eq!(
//!     to_string(&person).unwrap(),
//!     "name = \"Dima\"\nage = 22\ntags = [\"a\", \"b\"]\n\n[address]\ncity = \"Paris\"\ncountry = \"France\""
//! );
//! ```
//!
//! ## Cycles
//!
//! The encoder tracks the records currently on its path. Re-entering one of
//! them fails with [`Error::CycleDetected`]; the same record appearing under
//! two unrelated fields is fine and is written out twice.

use crate::tracing_macros::{debug, trace};
use crate::{CodecOptions, Document, EntityId, Error, FieldMap, Graph, Result, Value};
use serde::{ser, Serialize};
use std::collections::HashSet;

/// Encodes the tree rooted at `root`.
///
/// # Errors
///
/// Returns [`Error::CycleDetected`] if a record is its own ancestor,
/// [`Error::UnknownEntity`] for a dangling reference and
/// [`Error::UnsupportedType`] for a list containing entities.
pub fn encode_with_options(graph: &Graph, root: EntityId, options: &CodecOptions) -> Result<String> {
    let mut encoder = Encoder::new(graph);
    let mut blocks = Vec::new();
    encoder.encode_record(root, "", &mut blocks)?;

    let blocks: Vec<String> = blocks
        .into_iter()
        .filter_map(|block| block.render())
        .collect();
    Ok(blocks.join(options.block_separator()))
}

/// One section of output: an optional `[path]` header and its lines.
struct Block {
    header: Option<String>,
    lines: Vec<String>,
}

impl Block {
    fn render(self) -> Option<String> {
        match self.header {
            Some(header) if self.lines.is_empty() => Some(format!("[{}]", header)),
            Some(header) => Some(format!("[{}]\n{}", header, self.lines.join("\n"))),
            None if self.lines.is_empty() => None,
            None => Some(self.lines.join("\n")),
        }
    }
}

struct Encoder<'g> {
    graph: &'g Graph,
    visiting: HashSet<EntityId>,
}

impl<'g> Encoder<'g> {
    fn new(graph: &'g Graph) -> Self {
        Encoder {
            graph,
            visiting: HashSet::new(),
        }
    }

    /// Appends the block for `id` at `path`, followed by the blocks of its
    /// nested entities in pre-order.
    fn encode_record(&mut self, id: EntityId, path: &str, blocks: &mut Vec<Block>) -> Result<()> {
        if !self.visiting.insert(id) {
            let at = if path.is_empty() { "<root>" } else { path };
            debug!(entity = %id, path = at, "encode: cycle detected");
            return Err(Error::cycle_detected(at));
        }
        let graph = self.graph;
        let record = graph.record(id)?;
        trace!(entity = %id, record = record.name(), path, "encode: record");

        let header = (!path.is_empty()).then(|| path.to_string());
        let index = blocks.len();
        blocks.push(Block {
            header,
            lines: Vec::new(),
        });

        let mut nested = Vec::new();
        for (name, value) in record.fields() {
            match value {
                Value::Entity(child) => nested.push((name, *child)),
                value => {
                    let line = format!("{} = {}", name, format_value(value, path, name)?);
                    blocks[index].lines.push(line);
                }
            }
        }

        for (name, child) in nested {
            let child_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", path, name)
            };
            self.encode_record(child, &child_path, blocks)?;
        }

        self.visiting.remove(&id);
        Ok(())
    }
}

fn format_value(value: &Value, path: &str, name: &str) -> Result<String> {
    let text = match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => format!("\"{}\"", s),
        Value::List(items) => {
            let items = items
                .iter()
                .map(|item| match item {
                    Value::List(_) | Value::Entity(_) => Err(list_error(path, name, item)),
                    item => format_value(item, path, name),
                })
                .collect::<Result<Vec<_>>>()?;
            format!("[{}]", items.join(", "))
        }
        Value::Entity(_) => return Err(list_error(path, name, value)),
    };
    Ok(text)
}

fn list_error(path: &str, name: &str, item: &Value) -> Error {
    let field = if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    };
    Error::unsupported_type(&format!(
        "list `{}` contains a {}; lists may only hold primitives",
        field,
        item.kind_name()
    ))
}

/// Shortest round-trip form, always with a `.` for finite values so the
/// scanner reads it back as a float.
fn format_float(f: f64) -> String {
    let text = f.to_string();
    if f.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Converts any `T: Serialize` struct into a [`Document`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if the top level is not a struct or
/// the value contains maps, data-carrying enum variants, lists of structs or
/// nested lists.
pub fn to_graph<T>(value: &T) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    let mut graph = Graph::new();
    match value.serialize(GraphSerializer::new(&mut graph))? {
        Value::Entity(root) => Ok(Document::new(graph, root)),
        other => Err(Error::unsupported_type(&format!(
            "top-level value must be a struct, found {}",
            other.kind_name()
        ))),
    }
}

/// Serde serializer producing [`Value`]s and pushing structs into a graph.
///
/// Fields are serialized before their struct is pushed, so nested records
/// get lower ids than their parents.
pub struct GraphSerializer<'g> {
    graph: &'g mut Graph,
}

impl<'g> GraphSerializer<'g> {
    pub fn new(graph: &'g mut Graph) -> Self {
        GraphSerializer { graph }
    }
}

pub struct ListSerializer<'g> {
    graph: &'g mut Graph,
    items: Vec<Value>,
}

pub struct RecordSerializer<'g> {
    graph: &'g mut Graph,
    name: &'static str,
    fields: FieldMap<Value>,
}

impl<'g> ser::Serializer for GraphSerializer<'g> {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = ListSerializer<'g>;
    type SerializeTuple = ListSerializer<'g>;
    type SerializeTupleStruct = ListSerializer<'g>;
    type SerializeTupleVariant = ser::Impossible<Value, Error>;
    type SerializeMap = ser::Impossible<Value, Error>;
    type SerializeStruct = RecordSerializer<'g>;
    type SerializeStructVariant = ser::Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| Error::unsupported_type(&format!("u64 value {} exceeds i64::MAX", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::List(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ListSerializer<'g>> {
        Ok(ListSerializer {
            graph: self.graph,
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<ListSerializer<'g>> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<ListSerializer<'g>> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported_type("maps"))
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<RecordSerializer<'g>> {
        Ok(RecordSerializer {
            graph: self.graph,
            name,
            fields: FieldMap::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl<'g> ListSerializer<'g> {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(GraphSerializer::new(self.graph))? {
            item @ (Value::Entity(_) | Value::List(_)) => Err(Error::unsupported_type(&format!(
                "list element of kind {}; lists may only hold primitives",
                item.kind_name()
            ))),
            item => {
                self.items.push(item);
                Ok(())
            }
        }
    }
}

impl<'g> ser::SerializeSeq for ListSerializer<'g> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.items))
    }
}

impl<'g> ser::SerializeTuple for ListSerializer<'g> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.items))
    }
}

impl<'g> ser::SerializeTupleStruct for ListSerializer<'g> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.items))
    }
}

impl<'g> ser::SerializeStruct for RecordSerializer<'g> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = value.serialize(GraphSerializer::new(self.graph))?;
        self.fields.insert(key.to_string(), value);
        Ok(())
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        self.fields.insert(key.to_string(), Value::Null);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Entity(self.graph.add_with(self.name, self.fields)))
    }
}
