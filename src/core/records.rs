// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Insertion-ordered record storage with first-wins duplicate handling
//!
//! Records are kept in a Vec (definition order) with a HashMap index from
//! key to position, so duplicate detection is O(1) on average.
//!
//! # Performance
//! - Insert: O(1) average case
//! - Lookup: O(1) average case
//! - Iterate: O(n) in definition order

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Ordered key/value map that never overwrites an existing key.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Records {
    /// Entries in order of first definition
    entries: Vec<(String, String)>,
    /// Maps key to its position in `entries`
    index: HashMap<String, usize>,
}

impl Records {
    /// Creates an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record unless the key is already defined.
    ///
    /// Returns `Err` with the retained value when the key exists; the
    /// stored value is left untouched.
    pub fn insert_first(&mut self, key: String, value: String) -> Result<(), &str> {
        if let Some(&pos) = self.index.get(&key) {
            return Err(self.entries[pos].1.as_str());
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        Ok(())
    }

    /// Looks up the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates `(key, value)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialised as a JSON object whose member order matches definition order
impl Serialize for Records {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
