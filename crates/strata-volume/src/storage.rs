//! Storage kinds and the width-tiered cell arrays behind every buffer.
//!
//! A buffer stores one palette id per cell. The id width is picked from the
//! palette's highest id: one byte while it fits in `0xFF`, two bytes while it
//! fits in `0xFFFF`, four bytes otherwise.

use serde::{Deserialize, Serialize};

use crate::error::VolumeError;

/// Backing strategy requested for a copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Plain single-owner arrays.
    #[default]
    Standard,
    /// Recognised for API compatibility, never implemented. Requesting it
    /// always fails with [`VolumeError::UnsupportedStorageKind`].
    ThreadSafe,
}

impl StorageKind {
    /// Fails for every kind that has no implementation.
    pub fn ensure_supported(self) -> Result<(), VolumeError> {
        match self {
            StorageKind::Standard => Ok(()),
            StorageKind::ThreadSafe => {
                tracing::warn!("rejected unsupported storage kind {:?}", self);
                Err(VolumeError::UnsupportedStorageKind(self))
            }
        }
    }
}

/// Element width of a [`CellArray`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageTier {
    /// 8-bit ids.
    Byte,
    /// 16-bit ids.
    Char,
    /// 32-bit ids.
    Int,
}

impl StorageTier {
    /// Smallest tier able to hold every id up to and including `highest_id`.
    pub fn for_highest_id(highest_id: u32) -> Self {
        if highest_id <= 0xFF {
            StorageTier::Byte
        } else if highest_id <= 0xFFFF {
            StorageTier::Char
        } else {
            StorageTier::Int
        }
    }

    /// Largest id representable in this tier.
    pub fn max_id(self) -> u32 {
        match self {
            StorageTier::Byte => 0xFF,
            StorageTier::Char => 0xFFFF,
            StorageTier::Int => u32::MAX,
        }
    }

    pub fn bytes_per_cell(self) -> usize {
        match self {
            StorageTier::Byte => 1,
            StorageTier::Char => 2,
            StorageTier::Int => 4,
        }
    }
}

/// Fixed-length array of palette ids at one of three widths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellArray {
    Byte(Box<[u8]>),
    Char(Box<[u16]>),
    Int(Box<[u32]>),
}

impl CellArray {
    /// Creates `len` zeroed cells (all referencing palette id 0).
    pub fn new(tier: StorageTier, len: usize) -> Self {
        match tier {
            StorageTier::Byte => CellArray::Byte(vec![0; len].into_boxed_slice()),
            StorageTier::Char => CellArray::Char(vec![0; len].into_boxed_slice()),
            StorageTier::Int => CellArray::Int(vec![0; len].into_boxed_slice()),
        }
    }

    /// Packs `ids` into the narrowest tier that holds their maximum.
    pub fn pack(ids: &[u32]) -> Self {
        let highest = ids.iter().copied().max().unwrap_or(0);
        match StorageTier::for_highest_id(highest) {
            StorageTier::Byte => CellArray::Byte(ids.iter().map(|&id| id as u8).collect()),
            StorageTier::Char => CellArray::Char(ids.iter().map(|&id| id as u16).collect()),
            StorageTier::Int => CellArray::Int(ids.into()),
        }
    }

    pub fn tier(&self) -> StorageTier {
        match self {
            CellArray::Byte(_) => StorageTier::Byte,
            CellArray::Char(_) => StorageTier::Char,
            CellArray::Int(_) => StorageTier::Int,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CellArray::Byte(cells) => cells.len(),
            CellArray::Char(cells) => cells.len(),
            CellArray::Int(cells) => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the id at `index`. The caller guarantees `index < len()`.
    pub fn get(&self, index: usize) -> u32 {
        match self {
            CellArray::Byte(cells) => u32::from(cells[index]),
            CellArray::Char(cells) => u32::from(cells[index]),
            CellArray::Int(cells) => cells[index],
        }
    }

    /// Writes `id` at `index`, widening the array first if `id` does not fit
    /// the current tier. The caller guarantees `index < len()`.
    pub fn set(&mut self, index: usize, id: u32) {
        if id > self.tier().max_id() {
            self.promote(StorageTier::for_highest_id(id));
        }
        match self {
            CellArray::Byte(cells) => cells[index] = id as u8,
            CellArray::Char(cells) => cells[index] = id as u16,
            CellArray::Int(cells) => cells[index] = id,
        }
    }

    /// Re-encodes every cell at a wider tier. Narrower or equal tiers are
    /// ignored.
    pub fn promote(&mut self, tier: StorageTier) {
        if tier <= self.tier() {
            return;
        }
        tracing::debug!(
            "promoting cell storage {:?} -> {:?} ({} cells)",
            self.tier(),
            tier,
            self.len()
        );
        let ids: Vec<u32> = self.iter().collect();
        // Byte is the narrowest tier, so the target is Char or Int here.
        *self = if tier == StorageTier::Char {
            CellArray::Char(ids.iter().map(|&id| id as u16).collect())
        } else {
            CellArray::Int(ids.into_boxed_slice())
        };
    }

    /// Iterates every id in index order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Approximate memory used by the cells, in bytes.
    pub fn storage_bytes(&self) -> usize {
        self.len() * self.tier().bytes_per_cell()
    }
}
