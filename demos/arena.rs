//! Building graphs by hand: shared records and cycle detection.
//!
//! Run with: cargo run --example arena

use serde_tomlish::{decode, encode, entity, Entity, Error, Graph, Value};

struct Data;
struct User;

entity!(Data { text: string });
entity!(User { name: string, data: Data, backup: Data });

fn main() -> Result<(), Error> {
    let mut graph = Graph::new();
    let data = graph.add_with("Data", [("text", Value::from("shared"))]);
    let user = graph.add_with(
        "User",
        [
            ("name", Value::from("Ivan")),
            ("data", Value::from(data)),
            ("backup", Value::from(data)),
        ],
    );

    // One record under two sibling fields is written out twice
    let text = encode(&graph, user)?;
    println!("Shared record:\n{}\n", text);

    // Decoding builds a fresh graph, with one record per section
    let doc = decode(&text, User::schema())?;
    println!(
        "Decoded {} records, equal trees: {}\n",
        doc.graph.len(),
        doc.graph.tree_eq(doc.root, &graph, user)
    );

    // Linking a record back to its ancestor makes it unencodable
    graph.set(data, "owner", user)?;
    match encode(&graph, user) {
        Err(Error::CycleDetected { path }) => println!("✓ Cycle detected at `{}`", path),
        other => println!("unexpected: {:?}", other),
    }

    Ok(())
}
