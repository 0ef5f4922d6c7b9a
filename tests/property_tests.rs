//! Property-based tests for the round-trip and idempotence guarantees.
//!
//! Strings are drawn from letters, digits and spaces: the format has no
//! escapes, so quotes, commas and newlines are out of scope by construction.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_tomlish::{decode, encode, entity, from_str, to_graph, to_string, Entity};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
struct Inner {
    label: String,
    weight: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
struct Outer {
    id: i64,
    name: String,
    enabled: bool,
    ratio: f64,
    tags: Vec<String>,
    counts: Vec<i64>,
    nickname: Option<String>,
    inner: Inner,
    spare: Option<Inner>,
}

entity!(Inner { label: string, weight: float });
entity!(Outer {
    id: integer,
    name: string,
    enabled: boolean,
    ratio: float,
    tags: [string],
    counts: [integer],
    nickname: string,
    inner: Inner,
    spare: Inner,
});

fn roundtrip<T>(value: &T) -> bool
where
    T: Serialize + Entity + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,16}"
}

fn finite() -> impl Strategy<Value = f64> {
    -1.0e12..1.0e12f64
}

fn inner() -> impl Strategy<Value = Inner> {
    (text(), finite()).prop_map(|(label, weight)| Inner { label, weight })
}

prop_compose! {
    fn outer()(
        id in any::<i64>(),
        name in text(),
        enabled in any::<bool>(),
        ratio in finite(),
        tags in prop::collection::vec(text(), 0..6),
        counts in prop::collection::vec(any::<i64>(), 0..6),
        nickname in proptest::option::of(text()),
        inner in inner(),
        spare in proptest::option::of(inner()),
    ) -> Outer {
        Outer { id, name, enabled, ratio, tags, counts, nickname, inner, spare }
    }
}

proptest! {
    #[test]
    fn prop_inner_roundtrip(value in inner()) {
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_outer_roundtrip(value in outer()) {
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_encoding_is_idempotent(value in outer()) {
        let doc = to_graph(&value).unwrap();
        let first = encode(&doc.graph, doc.root).unwrap();
        let decoded = decode(&first, Outer::schema()).unwrap();
        prop_assert!(decoded.tree_eq(&doc));
        let second = encode(&decoded.graph, decoded.root).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_integer_strings_stay_strings(n in any::<i64>()) {
        let value = Inner { label: n.to_string(), weight: 0.5 };
        prop_assert!(roundtrip(&value));
    }
}
