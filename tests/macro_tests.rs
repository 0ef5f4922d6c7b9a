use serde_tomlish::{
    decode, decode_named, entity, CodecOptions, Entity, Error, FieldKind, ScalarKind,
    SchemaRegistry, Value,
};

struct Engine;
struct Car;
struct Part;

entity!(Engine {
    power: integer,
    fuel: string,
});

entity!(Car {
    model: string,
    year: integer,
    price: float,
    electric: boolean,
    misc: any,
    owners: [string],
    mileage: [integer],
    engine: Engine,
});

entity!(Part {
    code: string,
    parent: Part,
});

#[test]
fn test_entity_macro_schema_name_and_order() {
    let schema = Car::schema();
    assert_eq!(schema.name(), "Car");
    let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec!["model", "year", "price", "electric", "misc", "owners", "mileage", "engine"]
    );
}

#[test]
fn test_entity_macro_field_kinds() {
    let schema = Car::schema();
    let kind = |name: &str| schema.field(name).map(|f| f.kind().to_string());
    assert_eq!(kind("model").as_deref(), Some("string"));
    assert_eq!(kind("year").as_deref(), Some("integer"));
    assert_eq!(kind("price").as_deref(), Some("float"));
    assert_eq!(kind("electric").as_deref(), Some("boolean"));
    assert_eq!(kind("misc").as_deref(), Some("any"));
    assert_eq!(kind("owners").as_deref(), Some("list of string"));
    assert_eq!(kind("engine").as_deref(), Some("entity Engine"));

    assert!(matches!(
        schema.field("mileage").map(|f| f.kind()),
        Some(FieldKind::List(ScalarKind::Integer))
    ));
    let engine = schema.field("engine").and_then(|f| f.kind().entity_schema());
    assert_eq!(engine.map(|s| s.name()), Some("Engine"));
    assert!(schema.field("wheels").is_none());
}

#[test]
fn test_entity_macro_schema_is_static() {
    assert!(std::ptr::eq(Car::schema(), Car::schema()));
}

#[test]
fn test_recursive_schema_decodes() {
    let text = "code = \"leaf\"\n\n[parent]\ncode = \"mid\"\n\n[parent.parent]\ncode = \"root\"\nparent = null";
    let doc = decode(text, Part::schema()).unwrap();
    assert_eq!(doc.graph.len(), 3);

    let mid = doc.graph.field(doc.root, "parent").and_then(Value::as_entity);
    let top = mid.and_then(|id| doc.graph.field(id, "parent")).and_then(Value::as_entity);
    let top_code = top.and_then(|id| doc.graph.field(id, "code"));
    assert_eq!(top_code, Some(&Value::from("root")));
    assert_eq!(
        top.and_then(|id| doc.graph.field(id, "parent")),
        Some(&Value::Null)
    );
}

#[test]
fn test_any_field_keeps_scanned_type() {
    let doc = decode("misc = 2.5\nmodel = \"T\"", Car::schema()).unwrap();
    assert_eq!(doc.graph.field(doc.root, "misc"), Some(&Value::Float(2.5)));

    let doc = decode("misc = [1, \"x\", true]", Car::schema()).unwrap();
    assert_eq!(
        doc.graph.field(doc.root, "misc"),
        Some(&Value::List(vec![
            Value::Integer(1),
            Value::from("x"),
            Value::Bool(true)
        ]))
    );
}

#[test]
fn test_registry_register_is_transitive() {
    let mut registry = SchemaRegistry::new();
    registry.register::<Car>();
    assert!(registry.contains("Car"));
    assert!(registry.contains("Engine"));
    assert_eq!(registry.len(), 2);

    let doc = decode_named(
        "power = 150\nfuel = \"diesel\"",
        "Engine",
        &registry,
        &CodecOptions::default(),
    )
    .unwrap();
    assert_eq!(doc.graph.field(doc.root, "power"), Some(&Value::Integer(150)));
}

#[test]
fn test_registry_missing_schema() {
    let mut registry = SchemaRegistry::new();
    registry.register::<Part>();
    assert_eq!(registry.len(), 1);

    let err = decode_named("code = \"x\"", "Car", &registry, &CodecOptions::default())
        .unwrap_err();
    assert_eq!(err, Error::missing_schema("Car"));
}
