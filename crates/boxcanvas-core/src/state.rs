//! Shared state slices.
//!
//! An [`Atom`] is a single independently addressable value; an
//! [`AtomFamily`] is a keyed slice where every key that was never written
//! reads back as the family default. Both count their writes so the shell
//! can tell when anything changed since the last frame.

use std::collections::HashMap;
use std::hash::Hash;

/// A single shared value.
#[derive(Debug, Clone)]
pub struct Atom<T> {
    key: &'static str,
    value: T,
    revision: u64,
}

impl<T> Atom<T> {
    /// Create an atom holding its default value.
    pub fn new(key: &'static str, default: T) -> Self {
        Self {
            key,
            value: default,
            revision: 0,
        }
    }

    /// The atom's key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.revision += 1;
    }

    /// Update the value in place.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value);
        self.revision += 1;
        result
    }

    /// Number of writes since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// A keyed family of values sharing one default.
#[derive(Debug, Clone)]
pub struct AtomFamily<K, V> {
    key: &'static str,
    default: V,
    values: HashMap<K, V>,
    revision: u64,
}

impl<K: Eq + Hash, V: Clone> AtomFamily<K, V> {
    /// Create an empty family.
    pub fn new(key: &'static str, default: V) -> Self {
        Self {
            key,
            default,
            values: HashMap::new(),
            revision: 0,
        }
    }

    /// The family's key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Value for `key`, or the family default. Never inserts.
    pub fn get(&self, key: &K) -> V {
        self.values.get(key).cloned().unwrap_or_else(|| self.default.clone())
    }

    /// Write the value for `key`.
    pub fn set(&mut self, key: K, value: V) {
        self.values.insert(key, value);
        self.revision += 1;
    }

    /// Update the value for `key`, starting from the default if unwritten.
    pub fn update<R>(&mut self, key: K, f: impl FnOnce(&mut V) -> R) -> R {
        let default = &self.default;
        let value = self.values.entry(key).or_insert_with(|| default.clone());
        let result = f(value);
        self.revision += 1;
        result
    }

    /// Whether `key` has been written.
    pub fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Number of written keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no key has been written.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of writes since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
