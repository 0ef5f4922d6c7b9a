//! Ordered string-keyed map used throughout the codec.
//!
//! [`FieldMap`] wraps [`IndexMap`] so that record fields, the scanner's flat
//! map and the nested map all iterate in insertion order. Encoding relies on
//! this for declaration order; decoding never depends on it.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlish::{FieldMap, Value};
//!
//! let mut map = FieldMap::new();
//! map.insert("name".to_string(), Value::from("Dima"));
//! map.insert("age".to_string(), Value::from(22));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Dima"));
//! ```

use indexmap::IndexMap;

/// An insertion-ordered map from field names to values.
///
/// # Examples
///
/// ```rust
/// use serde_tomlish::FieldMap;
///
/// let mut map = FieldMap::new();
/// map.insert("first".to_string(), 1);
/// map.insert("second".to_string(), 2);
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap<V>(IndexMap<String, V>);

impl<V> FieldMap<V> {
    /// Creates an empty `FieldMap`.
    #[must_use]
    pub fn new() -> Self {
        FieldMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FieldMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlish::FieldMap;
    ///
    /// let mut map = FieldMap::new();
    /// assert!(map.insert("key".to_string(), 42).is_none());
    /// assert_eq!(map.insert("key".to_string(), 43), Some(42));
    /// ```
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, V> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, V> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.0.iter()
    }
}

impl<V> Default for FieldMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for FieldMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a FieldMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V> FromIterator<(String, V)> for FieldMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        FieldMap(IndexMap::from_iter(iter))
    }
}
