//! Dense bidirectional value ↔ id table.
//!
//! Ids are handed out lazily in first-seen order starting at 0, so the
//! highest id is always `len - 1` and drives the storage tier choice.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::VolumeError;

/// Maps distinct values to dense `u32` ids and back.
#[derive(Clone, Debug)]
pub struct Palette<V> {
    /// Dense array where `index == id`.
    values: Vec<V>,
    /// Reverse lookup: value → id.
    ids: FxHashMap<V, u32>,
}

impl<V: Clone + Eq + Hash> Palette<V> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            ids: FxHashMap::default(),
        }
    }

    /// Returns the id of `value`, assigning the next free id on first sight.
    pub fn get_or_assign(&mut self, value: &V) -> u32 {
        if let Some(&id) = self.ids.get(value) {
            return id;
        }
        let id = self.values.len() as u32;
        self.values.push(value.clone());
        self.ids.insert(value.clone(), id);
        id
    }

    /// Returns the id of `value` without assigning one.
    pub fn id_of(&self, value: &V) -> Option<u32> {
        self.ids.get(value).copied()
    }

    /// Decodes `id` back to its value.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::UnknownPaletteId`] if `id` was never assigned.
    pub fn value_of(&self, id: u32) -> Result<&V, VolumeError> {
        self.values
            .get(id as usize)
            .ok_or(VolumeError::UnknownPaletteId(id))
    }

    /// Highest id issued so far. An empty palette reports 0, which is also
    /// the id its first value will receive.
    pub fn highest_id(&self) -> u32 {
        self.values.len().saturating_sub(1) as u32
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(id, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &V)> {
        self.values.iter().enumerate().map(|(i, v)| (i as u32, v))
    }
}

impl<V: Clone + Eq + Hash> Default for Palette<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Eq + Hash> FromIterator<V> for Palette<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut palette = Palette::new();
        for value in iter {
            palette.get_or_assign(&value);
        }
        palette
    }
}
