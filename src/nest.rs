//! Nested reconstruction: flat dotted keys to a tree of maps.
//!
//! ```rust
//! use serde_tomlish::{nest, scan, CodecOptions, Literal, Node};
//!
//! let flat = scan("a = 1\n[b]\nc = 2\n[b.d]\ne = 3", &CodecOptions::default()).unwrap();
//! let nested = nest(flat).unwrap();
//!
//! let b = nested.get("b").and_then(Node::as_table).unwrap();
//! assert_eq!(b.get("c"), Some(&Node::Value(Literal::Integer(2))));
//! assert!(b.get("d").and_then(Node::as_table).is_some());
//! ```

use crate::scan::FlatMap;
use crate::tracing_macros::debug;
use crate::{Error, FieldMap, Literal, Result};

/// One node of the nested map: a scanned value or a sub-map.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Value(Literal),
    Table(NestedMap),
}

impl Node {
    #[must_use]
    pub fn as_table(&self) -> Option<&NestedMap> {
        match self {
            Node::Table(map) => Some(map),
            Node::Value(_) => None,
        }
    }

    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Value(literal) => Some(literal),
            Node::Table(_) => None,
        }
    }
}

/// Tree of maps keyed by path segment.
pub type NestedMap = FieldMap<Node>;

/// Splits every dotted key on `.` and inserts its value at that path,
/// creating intermediate tables as needed.
///
/// # Errors
///
/// Returns [`Error::StructuralConflict`] when a path runs through a segment
/// that already holds a value, or when a value would replace a table.
pub fn nest(flat: FlatMap) -> Result<NestedMap> {
    nest_with_sections(flat, &[])
}

/// Like [`nest`], then makes sure every path in `sections` is a table, so a
/// `[path]` header with no lines under it still yields an empty entity.
///
/// ```rust
/// use serde_tomlish::{nest_with_sections, scan_with_sections, CodecOptions, Node};
///
/// let (flat, sections) = scan_with_sections("id = 1\n\n[marker]", &CodecOptions::default()).unwrap();
/// let nested = nest_with_sections(flat, &sections).unwrap();
/// assert_eq!(nested.get("marker").and_then(Node::as_table).map(|t| t.len()), Some(0));
/// ```
///
/// # Errors
///
/// Same as [`nest`]; a section path that runs into a value is also a
/// [`Error::StructuralConflict`].
pub fn nest_with_sections(flat: FlatMap, sections: &[String]) -> Result<NestedMap> {
    let mut root = NestedMap::new();
    for (key, literal) in flat {
        let segments: Vec<&str> = key.split('.').collect();
        insert_at(&mut root, &segments, 0, literal)?;
    }
    for section in sections {
        let segments: Vec<&str> = section.split('.').collect();
        ensure_table(&mut root, &segments, 0)?;
    }
    Ok(root)
}

fn ensure_table(map: &mut NestedMap, segments: &[&str], depth: usize) -> Result<()> {
    let Some(segment) = segments.get(depth) else {
        return Ok(());
    };
    if !map.contains_key(segment) {
        map.insert(segment.to_string(), Node::Table(NestedMap::new()));
    }
    match map.get_mut(segment) {
        Some(Node::Table(child)) => ensure_table(child, segments, depth + 1),
        _ => Err(conflict(segments, depth)),
    }
}

fn insert_at(map: &mut NestedMap, segments: &[&str], depth: usize, literal: Literal) -> Result<()> {
    let segment = segments[depth];

    if depth + 1 == segments.len() {
        if let Some(Node::Table(_)) = map.get(segment) {
            return Err(conflict(segments, depth));
        }
        map.insert(segment.to_string(), Node::Value(literal));
        return Ok(());
    }

    if !map.contains_key(segment) {
        map.insert(segment.to_string(), Node::Table(NestedMap::new()));
    }
    match map.get_mut(segment) {
        Some(Node::Table(child)) => insert_at(child, segments, depth + 1, literal),
        _ => Err(conflict(segments, depth)),
    }
}

fn conflict(segments: &[&str], depth: usize) -> Error {
    let path = segments[..=depth].join(".");
    debug!(path = %path, "nest: structural conflict");
    Error::structural_conflict(&path)
}
