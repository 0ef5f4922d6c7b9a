//! Basic serialization and deserialization of a nested struct.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_tomlish::{entity, from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Address {
    city: String,
    country: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Person {
    name: String,
    age: u32,
    tags: Vec<String>,
    address: Address,
}

entity!(Address { city: string, country: string });
entity!(Person { name: string, age: integer, tags: [string], address: Address });

fn main() -> Result<(), Box<dyn Error>> {
    let person = Person {
        name: "Dima".to_string(),
        age: 22,
        tags: vec!["a".to_string(), "b".to_string()],
        address: Address {
            city: "Paris".to_string(),
            country: "France".to_string(),
        },
    };

    // Serialize
    let text = to_string(&person)?;
    println!("Output:\n{}\n", text);

    // Deserialize back to struct
    let person_back: Person = from_str(&text)?;
    assert_eq!(person, person_back);
    println!("✓ Round-trip successful");

    Ok(())
}
