//! Decoding by type name through a schema registry, with strict and
//! lenient parsing.
//!
//! Run with: cargo run --example registry

use serde_tomlish::{decode_named, entity, CodecOptions, SchemaRegistry};
use std::error::Error;

struct Engine;
struct Car;

entity!(Engine { power: integer, fuel: string });
entity!(Car { model: string, year: integer, engine: Engine });

fn main() -> Result<(), Box<dyn Error>> {
    let mut registry = SchemaRegistry::new();
    registry.register::<Car>();
    println!("Registered: {:?}\n", registry.names().collect::<Vec<_>>());

    let text = "model = \"Roadster\"\nyear = 2008\nnotes: hand built\n\n[engine]\npower = 248\nfuel = electric";

    let doc = decode_named(text, "Car", &registry, &CodecOptions::default())?;
    println!("Lenient decode: {:?}\n", doc.root_record()?);

    match decode_named(text, "Car", &registry, &CodecOptions::strict()) {
        Ok(_) => println!("strict decode unexpectedly succeeded"),
        Err(e) => println!("✓ Strict decode rejected input: {}", e),
    }

    match decode_named(text, "Truck", &registry, &CodecOptions::default()) {
        Ok(_) => println!("unknown type unexpectedly decoded"),
        Err(e) => println!("✓ {}", e),
    }

    Ok(())
}
