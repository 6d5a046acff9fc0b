//! Style tables and named style maps.
//!
//! Two map types show up throughout the crate:
//!
//! - [`StyleTable`]: the raw values a theme is made of (colors, spacing,
//!   anything). A theme has one table that flips with the mode and one
//!   that never does.
//! - [`NamedStyles`]: what a style generator produces from a theme, mapping
//!   logical names (`"box"`, `"title"`) to style declarations.
//!
//! Both are generic over their value type. The crate never looks inside
//! the values.

use std::fmt;
use std::ops::Index;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A shared, immutable mapping from names to theme values.
///
/// Cloning a table is cheap: clones share the same storage, and
/// [`ptr_eq`](StyleTable::ptr_eq) tells whether two tables are the same
/// instance without comparing their contents.
///
/// # Example
///
/// ```rust
/// use stylish::StyleTable;
///
/// let light: StyleTable<String> = StyleTable::new()
///     .add("background", "#FFFFFF")
///     .add("text", "#000000");
///
/// assert_eq!(light.get("text").map(String::as_str), Some("#000000"));
/// assert_eq!(light.len(), 2);
/// ```
pub struct StyleTable<V> {
    entries: Rc<IndexMap<String, V>>,
}

impl<V> StyleTable<V> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: Rc::new(IndexMap::new()),
        }
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    /// Returns true if a value is stored under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns true if both tables share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<V: Clone> StyleTable<V> {
    /// Adds a named value, returning the updated table for chaining.
    ///
    /// If other clones of this table exist, the entries are copied first so
    /// those clones keep seeing the old contents.
    pub fn add(mut self, name: &str, value: impl Into<V>) -> Self {
        Rc::make_mut(&mut self.entries).insert(name.to_string(), value.into());
        self
    }

    /// Merges `other` into this table. Entries from `other` win.
    pub fn merge(mut self, other: &StyleTable<V>) -> Self {
        let entries = Rc::make_mut(&mut self.entries);
        for (name, value) in other.entries.iter() {
            entries.insert(name.clone(), value.clone());
        }
        self
    }
}

impl<V> Clone for StyleTable<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<V> Default for StyleTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for StyleTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for StyleTable<V> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.entries == other.entries
    }
}

impl<V> From<IndexMap<String, V>> for StyleTable<V> {
    fn from(entries: IndexMap<String, V>) -> Self {
        Self {
            entries: Rc::new(entries),
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for StyleTable<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<IndexMap<String, V>>()
            .into()
    }
}

impl<V: Serialize> Serialize for StyleTable<V> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for StyleTable<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::<String, V>::deserialize(deserializer).map(StyleTable::from)
    }
}

/// Logical style names mapped to style declarations.
///
/// This is the output of a style generator and the input of a
/// [`StyleEngine`](crate::StyleEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedStyles<D> {
    styles: IndexMap<String, D>,
}

impl<D> NamedStyles<D> {
    pub fn new() -> Self {
        Self {
            styles: IndexMap::new(),
        }
    }

    /// Adds a named declaration, returning the updated map for chaining.
    pub fn add(mut self, name: &str, declaration: D) -> Self {
        self.styles.insert(name.to_string(), declaration);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, declaration: D) -> Option<D> {
        self.styles.insert(name.into(), declaration)
    }

    pub fn get(&self, name: &str) -> Option<&D> {
        self.styles.get(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &D)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Transforms every declaration, keeping names and order.
    pub fn map<O>(self, mut f: impl FnMut(&str, D) -> O) -> NamedStyles<O> {
        NamedStyles {
            styles: self
                .styles
                .into_iter()
                .map(|(name, decl)| {
                    let out = f(&name, decl);
                    (name, out)
                })
                .collect(),
        }
    }
}

impl<D> Default for NamedStyles<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Index<&str> for NamedStyles<D> {
    type Output = D;

    fn index(&self, name: &str) -> &D {
        match self.styles.get(name) {
            Some(decl) => decl,
            None => panic!("no style named '{}'", name),
        }
    }
}

impl<K: Into<String>, D> FromIterator<(K, D)> for NamedStyles<D> {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        Self {
            styles: iter.into_iter().map(|(k, d)| (k.into(), d)).collect(),
        }
    }
}

impl<D> IntoIterator for NamedStyles<D> {
    type Item = (String, D);
    type IntoIter = indexmap::map::IntoIter<String, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.styles.into_iter()
    }
}
