//! Schema-driven instantiation: nested map to a new [`Graph`].
//!
//! The instantiator walks a [`Schema`] and a [`NestedMap`] in lock-step.
//! Entity fields whose value is a section recurse into the nested schema;
//! everything else is coerced to the declared kind. Children are pushed
//! into the arena before their parent, so every record's nested entities
//! already exist when it is assembled.
//!
//! ## Coercion
//!
//! | declared | accepted |
//! |---|---|
//! | string | anything, stringified |
//! | integer | integers, floats (truncated), bare tokens that parse |
//! | float | floats, integers, bare tokens that parse (`NaN`, `1e5`) |
//! | boolean | `true`/`false` |
//! | any | anything, unchanged |
//!
//! Quoted strings are never re-parsed as numbers or booleans, and `null` is
//! accepted for every kind.
//!
//! ```rust
//! use serde_tomlish::{instantiate, nest, scan, CodecOptions, Field, FieldKind, Schema, Value};
//!
//! static COUNTER: Schema = Schema::new("Counter", &[
//!     Field::new("label", FieldKind::String),
//!     Field::new("hits", FieldKind::Integer),
//! ]);
//!
//! let flat = scan("hits = 7\nlabel = 12", &CodecOptions::default()).unwrap();
//! let doc = instantiate(&COUNTER, &nest(flat).unwrap()).unwrap();
//!
//! assert_eq!(doc.graph.field(doc.root, "hits"), Some(&Value::Integer(7)));
//! assert_eq!(doc.graph.field(doc.root, "label"), Some(&Value::from("12")));
//! ```

use crate::nest::{NestedMap, Node};
use crate::tracing_macros::{debug, trace};
use crate::{
    Document, EntityId, Error, FieldKind, FieldMap, Graph, Literal, Record, Result, ScalarKind,
    Schema, Value,
};

/// Builds a new graph for `schema` from `map` and returns it with its root.
///
/// Keys in `map` that the schema does not declare are ignored. Declared
/// fields missing from `map` are set to [`Value::Null`].
///
/// # Errors
///
/// Returns [`Error::TypeCoercion`] when a value does not fit its declared
/// kind, including a section where a primitive is declared and a primitive
/// where an entity is declared.
pub fn instantiate(schema: &'static Schema, map: &NestedMap) -> Result<Document> {
    let mut graph = Graph::new();
    let root = build(&mut graph, schema, map, "")?;
    Ok(Document::new(graph, root))
}

fn build(graph: &mut Graph, schema: &'static Schema, map: &NestedMap, prefix: &str) -> Result<EntityId> {
    for key in map.keys() {
        if schema.field(key).is_none() {
            trace!(entity = schema.name(), key = %key, "instantiate: ignoring undeclared key");
        }
    }

    let mut fields = FieldMap::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let path = join_path(prefix, field.name());
        let value = match map.get(field.name()) {
            Some(node) => field_value(graph, field.kind(), node, &path)?,
            None => Value::Null,
        };
        fields.insert(field.name().to_string(), value);
    }

    Ok(graph.push(Record::with_fields(schema.name(), fields)))
}

fn field_value(graph: &mut Graph, kind: &FieldKind, node: &Node, path: &str) -> Result<Value> {
    match (kind, node) {
        (FieldKind::Entity(schema), Node::Table(map)) => {
            build(graph, schema(), map, path).map(Value::Entity)
        }
        (_, Node::Value(Literal::Null)) => Ok(Value::Null),
        (_, Node::Table(_)) => Err(mismatch(path, &kind.to_string(), "a section")),
        (FieldKind::Entity(_), Node::Value(literal)) => {
            Err(mismatch(path, &kind.to_string(), &literal.describe()))
        }
        (FieldKind::List(element), Node::Value(Literal::List(items))) => items
            .iter()
            .enumerate()
            .map(|(i, item)| coerce(*element, item, &format!("{}[{}]", path, i)))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        (FieldKind::List(_), Node::Value(literal)) => {
            Err(mismatch(path, &kind.to_string(), &literal.describe()))
        }
        (kind, Node::Value(literal)) => {
            coerce(kind.as_scalar().unwrap_or(ScalarKind::Any), literal, path)
        }
    }
}

/// Converts one scanned literal to the declared scalar kind.
///
/// # Errors
///
/// Returns [`Error::TypeCoercion`] if the literal cannot represent `kind`.
pub fn coerce(kind: ScalarKind, literal: &Literal, path: &str) -> Result<Value> {
    let value = match (kind, literal) {
        (_, Literal::Null) => Some(Value::Null),
        (ScalarKind::Any, literal) => Some(literal_value(literal)),
        (ScalarKind::String, literal) => Some(Value::String(literal.to_string())),
        (ScalarKind::Integer, Literal::Integer(i)) => Some(Value::Integer(*i)),
        (ScalarKind::Integer, Literal::Float(f)) => truncate(*f).map(Value::Integer),
        (ScalarKind::Integer, Literal::Bare(s)) => s.parse().ok().map(Value::Integer),
        (ScalarKind::Float, Literal::Float(f)) => Some(Value::Float(*f)),
        (ScalarKind::Float, Literal::Integer(i)) => Some(Value::Float(*i as f64)),
        (ScalarKind::Float, Literal::Bare(s)) => s.parse().ok().map(Value::Float),
        (ScalarKind::Boolean, Literal::Bool(b)) => Some(Value::Bool(*b)),
        (ScalarKind::Boolean, Literal::Bare(s)) => s.parse().ok().map(Value::Bool),
        _ => None,
    };
    value.ok_or_else(|| mismatch(path, kind.name(), &literal.describe()))
}

fn truncate(f: f64) -> Option<i64> {
    let t = f.trunc();
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Integer(i) => Value::Integer(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::Str(s) | Literal::Bare(s) => Value::String(s.clone()),
        Literal::List(items) => Value::List(items.iter().map(literal_value).collect()),
    }
}

fn mismatch(path: &str, expected: &str, found: &str) -> Error {
    debug!(path, expected, found, "instantiate: coercion failed");
    Error::type_coercion(path, expected, found)
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nest, scan, CodecOptions, Entity, Field};

    struct Address;
    struct Person;

    impl Entity for Address {
        fn schema() -> &'static Schema {
            static SCHEMA: Schema = Schema::new(
                "Address",
                &[
                    Field::new("city", FieldKind::String),
                    Field::new("country", FieldKind::String),
                ],
            );
            &SCHEMA
        }
    }

    impl Entity for Person {
        fn schema() -> &'static Schema {
            static SCHEMA: Schema = Schema::new(
                "Person",
                &[
                    Field::new("name", FieldKind::String),
                    Field::new("age", FieldKind::Integer),
                    Field::new("score", FieldKind::Float),
                    Field::new("active", FieldKind::Boolean),
                    Field::new("tags", FieldKind::List(ScalarKind::String)),
                    Field::new("address", FieldKind::Entity(Address::schema)),
                ],
            );
            &SCHEMA
        }
    }

    fn decode(text: &str) -> Result<Document> {
        let flat = scan(text, &CodecOptions::default())?;
        instantiate(Person::schema(), &nest(flat)?)
    }

    #[test]
    fn test_builds_children_before_parent() {
        let doc = decode(
            "name = \"Dima\"\nage = 22\nscore = 1.5\nactive = true\ntags = [\"a\", \"b\"]\n\n[address]\ncity = \"Paris\"\ncountry = \"France\"",
        )
        .unwrap();

        assert_eq!(doc.graph.len(), 2);
        let address = doc.graph.field(doc.root, "address").and_then(Value::as_entity).unwrap();
        assert!(address < doc.root);
        assert_eq!(doc.graph.field(address, "city"), Some(&Value::from("Paris")));
        assert_eq!(
            doc.graph.field(doc.root, "tags"),
            Some(&Value::List(vec![Value::from("a"), Value::from("b")]))
        );
        assert_eq!(doc.root_record().unwrap().name(), "Person");
    }

    #[test]
    fn test_fields_follow_schema_order_not_wire_order() {
        let doc = decode("active = false\n[address]\ncity = \"X\"\n\nname = \"late\"").unwrap();
        let keys: Vec<_> = doc.root_record().unwrap().fields().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "age", "score", "active", "tags", "address"]);
        // `name` was scanned inside the [address] section
        assert_eq!(doc.graph.field(doc.root, "name"), Some(&Value::Null));
    }

    #[test]
    fn test_missing_fields_are_null() {
        let doc = decode("name = \"Solo\"").unwrap();
        assert_eq!(doc.graph.field(doc.root, "age"), Some(&Value::Null));
        assert_eq!(doc.graph.field(doc.root, "address"), Some(&Value::Null));
    }

    #[test]
    fn test_quoted_number_does_not_coerce_to_integer() {
        let err = decode("age = \"123\"").unwrap_err();
        assert_eq!(
            err,
            Error::type_coercion("age", "integer", "string \"123\"")
        );
        let doc = decode("age = 123").unwrap();
        assert_eq!(doc.graph.field(doc.root, "age"), Some(&Value::Integer(123)));
    }

    #[test]
    fn test_numeric_widening_and_truncation() {
        let doc = decode("age = 22.9\nscore = 3").unwrap();
        assert_eq!(doc.graph.field(doc.root, "age"), Some(&Value::Integer(22)));
        assert_eq!(doc.graph.field(doc.root, "score"), Some(&Value::Float(3.0)));
    }

    #[test]
    fn test_bare_tokens_parse_for_floats() {
        let doc = decode("score = NaN").unwrap();
        let score = doc.graph.field(doc.root, "score").and_then(Value::as_f64).unwrap();
        assert!(score.is_nan());
        assert!(decode("score = abc").is_err());
    }

    #[test]
    fn test_string_fields_stringify() {
        let doc = decode("name = 42").unwrap();
        assert_eq!(doc.graph.field(doc.root, "name"), Some(&Value::from("42")));
    }

    #[test]
    fn test_null_nested_entity() {
        let doc = decode("name = \"x\"\naddress = null").unwrap();
        assert_eq!(doc.graph.field(doc.root, "address"), Some(&Value::Null));
        assert_eq!(doc.graph.len(), 1);
    }

    #[test]
    fn test_structural_mismatches() {
        assert_eq!(
            decode("address = 5").unwrap_err(),
            Error::type_coercion("address", "entity Address", "integer 5")
        );
        assert_eq!(
            decode("[name]\nfirst = \"D\"").unwrap_err(),
            Error::type_coercion("name", "string", "a section")
        );
        assert_eq!(
            decode("tags = \"a\"").unwrap_err(),
            Error::type_coercion("tags", "list of string", "string \"a\"")
        );
    }

    #[test]
    fn test_nested_paths_in_errors() {
        static STRICT_ADDRESS: Schema =
            Schema::new("Geo", &[Field::new("lat", FieldKind::Float)]);
        static HOLDER: Schema = Schema::new("Holder", &[Field::new("geo", FieldKind::Entity(geo))]);
        fn geo() -> &'static Schema {
            &STRICT_ADDRESS
        }

        let flat = scan("[geo]\nlat = north", &CodecOptions::default()).unwrap();
        let err = instantiate(&HOLDER, &nest(flat).unwrap()).unwrap_err();
        assert_eq!(err, Error::type_coercion("geo.lat", "float", "bare token `north`"));
    }

    #[test]
    fn test_list_elements_are_coerced() {
        assert_eq!(
            coerce(ScalarKind::Boolean, &Literal::Bare("yes".to_string()), "flags[0]").unwrap_err(),
            Error::type_coercion("flags[0]", "boolean", "bare token `yes`")
        );
        assert_eq!(
            coerce(ScalarKind::Any, &Literal::Bare("x".to_string()), "v").unwrap(),
            Value::from("x")
        );
    }
}
