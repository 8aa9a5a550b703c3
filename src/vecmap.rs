//! A wrapper around a vector of tuples that packson uses to represent maps.
//!
//! Wire maps preserve the order in which keys were first written, so the
//! backing store is that order itself: entries sit in the `Vec` in insertion
//! order, keys stay unique, and inserting under an existing key replaces the
//! value without moving the entry.
//!
//! # Example
//!
//! ```
//! use packson::prelude::*;
//!
//! let mut vmap = VecMap::new();
//!
//! vmap.insert("b", 1);
//! vmap.insert("a", 2);
//! vmap.insert("b", 3);
//!
//! // "b" keeps its slot, with the replaced value
//! let entries: Vec<(&str, i32)> = vmap.into_iter().collect();
//! assert_eq!(entries, vec![("b", 3), ("a", 2)]);
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    hash::*,
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug, Default)]
/// A map implemented as a [`Vec`] of pairs in insertion order.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K: Eq, V>(Vec<(K, V)>);

impl<K: Eq, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(Vec::new()) }

    /// Creates an empty [`VecMap`] with room for `n` entries.
    pub fn with_capacity(n: usize) -> Self { VecMap(Vec::with_capacity(n)) }

    /// Inserts `v` under `k`.
    ///
    /// A new key is appended; an existing key keeps its position and the
    /// replaced value is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use packson::prelude::*;
    ///
    /// let mut vmap = VecMap::new();
    ///
    /// assert_eq!(vmap.insert("foo", 1), None);
    /// assert_eq!(vmap.insert("foo", 2), Some(1));
    /// ```
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        for (k0, v0) in self.0.iter_mut() {
            if *k0 == k {
                return Some(std::mem::replace(v0, v));
            }
        }

        self.0.push((k, v));
        None
    }

    /// The value stored under `k`, if any.
    pub fn get(&self, k: &K) -> Option<&V> {
        self.0.iter().find(|(k0, _)| k0 == k).map(|(_, v)| v)
    }

    /// Returns length.
    ///
    /// # Example
    ///
    /// ```
    /// use packson::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![("foo", "bar")]);
    ///
    /// assert_eq!(vmap.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an [`Iter`] of the key-value pairs, in insertion order.
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }
}

impl<K: Eq + Hash, V> VecMap<K, V> {
    /// Consumes a [`VecMap`], producing a [`HashMap`] from the entries.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use packson::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![(1, "foo"), (2, "bar")]);
    ///
    /// let hmap: HashMap<u8, &str> = vmap.into_hashmap();
    /// assert_eq!(hmap[&1], "foo");
    /// ```
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<K, V, S> {
        self.into_iter().collect()
    }
}

impl<K: Eq, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self {
        let mut out = VecMap::with_capacity(v.len());
        for (k, val) in v {
            out.insert(k, val);
        }
        out
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self {
        let v: Vec<(K, V)> = hm.into_iter().collect();
        v.into()
    }
}

impl<K: Eq, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<K: Eq, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        let mut out = VecMap::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl<K: Eq + Ord, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { Self::from_iter(bt) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let vmap = VecMap::from(vec![("z", 1), ("a", 2), ("m", 3)]);

        let keys: Vec<&str> = vmap.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn duplicate_keys_collapse() {
        let vmap = VecMap::from(vec![("a", 1), ("b", 2), ("a", 3)]);

        assert_eq!(vmap.len(), 2);
        assert_eq!(vmap.get(&"a"), Some(&3));

        let keys: Vec<&str> = vmap.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
