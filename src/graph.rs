//! Arena-owned object graphs.
//!
//! A [`Graph`] owns every [`Record`] in a flat vector; records reference
//! each other through [`Value::Entity`] holding an [`EntityId`]. The same id
//! may be referenced from several places, which is how shared values are
//! expressed. A record that (transitively) references itself forms a cycle,
//! which the encoder reports instead of following.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlish::{encode, Graph, Value};
//!
//! let mut graph = Graph::new();
//! let address = graph.add_with("Address", [("city", Value::from("Paris"))]);
//! let person = graph.add_with(
//!     "Person",
//!     [("name", Value::from("Dima")), ("address", Value::from(address))],
//! );
//!
//! let text = encode(&graph, person).unwrap();
//! assert_eq!(text, "name = \"Dima\"\n\n[address]\ncity = \"Paris\"");
//! ```

use crate::{EntityId, Error, FieldMap, Result, Value};
use std::collections::HashSet;

/// One entity instance: a type name and its fields in declaration order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Record {
    name: String,
    fields: FieldMap<Value>,
}

impl Record {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            fields: FieldMap::new(),
        }
    }

    #[must_use]
    pub fn with_fields(name: impl Into<String>, fields: FieldMap<Value>) -> Self {
        Record {
            name: name.into(),
            fields,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &FieldMap<Value> {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Sets a field, appending it if new. Returns the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }
}

/// An arena of records addressed by [`EntityId`].
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Graph {
    records: Vec<Record>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Graph::default()
    }

    /// Adds an empty record and returns its id.
    pub fn add(&mut self, name: impl Into<String>) -> EntityId {
        self.push(Record::new(name))
    }

    /// Adds a record with the given fields, kept in iteration order.
    pub fn add_with<K, I>(&mut self, name: impl Into<String>, fields: I) -> EntityId
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let fields = fields
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        self.push(Record::with_fields(name, fields))
    }

    pub fn push(&mut self, record: Record) -> EntityId {
        self.records.push(record);
        EntityId::new(self.records.len() - 1)
    }

    /// Sets a field on an existing record. Linking a record to one of its
    /// ancestors is allowed here; the encoder rejects it later.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEntity`] if `id` is not in this graph.
    pub fn set(
        &mut self,
        id: EntityId,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let record = self
            .records
            .get_mut(id.index())
            .ok_or_else(|| Error::unknown_entity(id))?;
        Ok(record.insert(field, value.into()))
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Record> {
        self.records.get(id.index())
    }

    /// Like [`Graph::get`], but reports a missing record as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEntity`] if `id` is not in this graph.
    pub fn record(&self, id: EntityId) -> Result<&Record> {
        self.get(id).ok_or_else(|| Error::unknown_entity(id))
    }

    /// Shortcut for reading one field of one record.
    #[must_use]
    pub fn field(&self, id: EntityId, field: &str) -> Option<&Value> {
        self.get(id).and_then(|record| record.get(field))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Record)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (EntityId::new(index), record))
    }

    /// Compares the tree rooted at `a` in this graph with the tree rooted at
    /// `b` in `other`.
    ///
    /// Ids and field order do not matter; record names, field names and
    /// values do. Cyclic input compares unequal.
    ///
    /// ```rust
    /// use serde_tomlish::{Graph, Value};
    ///
    /// let mut left = Graph::new();
    /// let a = left.add_with("Point", [("x", Value::from(1)), ("y", Value::from(2))]);
    ///
    /// let mut right = Graph::new();
    /// right.add("Unused");
    /// let b = right.add_with("Point", [("y", Value::from(2)), ("x", Value::from(1))]);
    ///
    /// assert!(left.tree_eq(a, &right, b));
    /// ```
    #[must_use]
    pub fn tree_eq(&self, a: EntityId, other: &Graph, b: EntityId) -> bool {
        let mut visiting = HashSet::new();
        self.tree_eq_inner(a, other, b, &mut visiting)
    }

    fn tree_eq_inner(
        &self,
        a: EntityId,
        other: &Graph,
        b: EntityId,
        visiting: &mut HashSet<EntityId>,
    ) -> bool {
        let (Some(left), Some(right)) = (self.get(a), other.get(b)) else {
            return false;
        };
        if left.name() != right.name() || left.fields().len() != right.fields().len() {
            return false;
        }
        if !visiting.insert(a) {
            return false;
        }

        let equal = left.fields().iter().all(|(key, value)| {
            match (value, right.get(key)) {
                (Value::Entity(x), Some(Value::Entity(y))) => {
                    self.tree_eq_inner(*x, other, *y, visiting)
                }
                (value, Some(theirs)) => value == theirs,
                (_, None) => false,
            }
        });

        visiting.remove(&a);
        equal
    }
}

/// A graph together with the id of its root record.
///
/// Produced by [`decode`](crate::decode) and [`to_graph`](crate::to_graph).
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub graph: Graph,
    pub root: EntityId,
}

impl Document {
    #[must_use]
    pub fn new(graph: Graph, root: EntityId) -> Self {
        Document { graph, root }
    }

    /// The root record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEntity`] if the root id is not in the graph.
    pub fn root_record(&self) -> Result<&Record> {
        self.graph.record(self.root)
    }

    /// Structural equality of the two rooted trees, see [`Graph::tree_eq`].
    #[must_use]
    pub fn tree_eq(&self, other: &Document) -> bool {
        self.graph.tree_eq(self.root, &other.graph, other.root)
    }

    #[must_use]
    pub fn into_parts(self) -> (Graph, EntityId) {
        (self.graph, self.root)
    }
}
