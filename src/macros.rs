/// Implements [`Entity`](crate::Entity) for a type from a compact field list.
///
/// Field kinds are `string`, `integer`, `float`, `boolean`, `any`, a list of
/// one of those in brackets (`[string]`), or the name of another type that
/// implements `Entity`.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use serde_tomlish::{entity, from_str, to_string};
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Address {
///     city: String,
/// }
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Person {
///     name: String,
///     tags: Vec<String>,
///     address: Address,
/// }
///
/// entity!(Address { city: string });
/// entity!(Person { name: string, tags: [string], address: Address });
///
/// let person = Person {
///     name: "Dima".to_string(),
///     tags: vec!["a".to_string()],
///     address: Address { city: "Paris".to_string() },
/// };
/// let text = to_string(&person).unwrap();
/// assert_eq!(from_str::<Person>(&text).unwrap(), person);
/// ```
#[macro_export]
macro_rules! entity {
    ($ty:ident { $($field:ident : $kind:tt),* $(,)? }) => {
        impl $crate::Entity for $ty {
            fn schema() -> &'static $crate::Schema {
                static SCHEMA: $crate::Schema = $crate::Schema::new(
                    stringify!($ty),
                    &[$($crate::Field::new(stringify!($field), $crate::field_kind!($kind))),*],
                );
                &SCHEMA
            }
        }
    };
}

/// Expands one `entity!` field kind token to a [`FieldKind`](crate::FieldKind).
#[doc(hidden)]
#[macro_export]
macro_rules! field_kind {
    (string) => {
        $crate::FieldKind::String
    };
    (integer) => {
        $crate::FieldKind::Integer
    };
    (float) => {
        $crate::FieldKind::Float
    };
    (boolean) => {
        $crate::FieldKind::Boolean
    };
    (any) => {
        $crate::FieldKind::Any
    };
    ([$elem:tt]) => {
        $crate::FieldKind::List($crate::scalar_kind!($elem))
    };
    ($entity:ident) => {
        $crate::FieldKind::Entity(<$entity as $crate::Entity>::schema)
    };
}

/// Expands a list element kind token to a [`ScalarKind`](crate::ScalarKind).
#[doc(hidden)]
#[macro_export]
macro_rules! scalar_kind {
    (string) => {
        $crate::ScalarKind::String
    };
    (integer) => {
        $crate::ScalarKind::Integer
    };
    (float) => {
        $crate::ScalarKind::Float
    };
    (boolean) => {
        $crate::ScalarKind::Boolean
    };
    (any) => {
        $crate::ScalarKind::Any
    };
}
