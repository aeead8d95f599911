//! Flat single-component labelmap buffer

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{IVec3, Result};
use super::dimensions::Dimensions;

/// Element width of the labelmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    #[default]
    #[serde(alias = "Uint8Array")]
    U8,
    #[serde(alias = "Uint16Array")]
    U16,
    #[serde(alias = "Uint32Array")]
    U32,
}

impl ElementType {
    /// Size of one element in bytes
    pub fn byte_width(self) -> usize {
        match self {
            ElementType::U8 => 1,
            ElementType::U16 => 2,
            ElementType::U32 => 4,
        }
    }
}

/// Backing storage of a labelmap, one element per voxel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelStorage {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

/// Run `$body` with `$v` bound to the typed vector and `$one` to a painted label
macro_rules! with_labels {
    ($storage:expr, $v:ident, $one:ident => $body:expr) => {
        match $storage {
            LabelStorage::U8($v) => { let $one = 1u8; $body }
            LabelStorage::U16($v) => { let $one = 1u16; $body }
            LabelStorage::U32($v) => { let $one = 1u32; $body }
        }
    };
}

impl LabelStorage {
    /// Zero-filled storage of `len` elements. Fails instead of aborting when
    /// the allocator refuses the request.
    pub fn zeroed(
        element_type: ElementType,
        len: usize,
    ) -> std::result::Result<Self, TryReserveError> {
        Ok(match element_type {
            ElementType::U8 => LabelStorage::U8(zeroed_vec(len)?),
            ElementType::U16 => LabelStorage::U16(zeroed_vec(len)?),
            ElementType::U32 => LabelStorage::U32(zeroed_vec(len)?),
        })
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            LabelStorage::U8(_) => ElementType::U8,
            LabelStorage::U16(_) => ElementType::U16,
            LabelStorage::U32(_) => ElementType::U32,
        }
    }

    pub fn len(&self) -> usize {
        with_labels!(self, v, _one => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label at `index`, widened to u32
    pub fn get(&self, index: usize) -> Option<u32> {
        with_labels!(self, v, _one => v.get(index).map(|&x| x as u32))
    }

    /// Raw bytes in native endianness, without copying
    pub fn as_bytes(&self) -> &[u8] {
        with_labels!(self, v, _one => bytemuck::cast_slice(v.as_slice()))
    }

    /// Number of non-zero labels
    pub fn count_painted(&self) -> usize {
        with_labels!(self, v, _one => v.iter().filter(|&&x| x != 0).count())
    }

    fn mark(&mut self, index: usize) {
        with_labels!(self, v, one => v[index] = one)
    }

    fn mark_range(&mut self, range: std::ops::Range<usize>) {
        with_labels!(self, v, one => v[range].fill(one))
    }
}

fn zeroed_vec<T: Copy + Default>(len: usize) -> std::result::Result<Vec<T>, TryReserveError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, T::default());
    Ok(v)
}

/// Labelmap handed back to the caller at the end of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintedLabelmap {
    pub dimensions: Dimensions,
    pub storage: LabelStorage,
}

impl PaintedLabelmap {
    /// Check if voxel is painted; false outside the volume
    pub fn is_painted(&self, p: IVec3) -> bool {
        self.dimensions
            .index(p)
            .and_then(|i| self.storage.get(i))
            .is_some_and(|label| label != 0)
    }

    /// Coordinates of all painted voxels in index order
    pub fn painted_voxels(&self) -> Vec<IVec3> {
        (0..self.storage.len())
            .filter(|&i| self.storage.get(i).is_some_and(|label| label != 0))
            .map(|i| self.dimensions.coord(i))
            .collect()
    }
}

/// Binary labelmap owned by a paint session
#[derive(Debug, Clone)]
pub struct VoxelBuffer {
    dimensions: Dimensions,
    storage: LabelStorage,
}

impl VoxelBuffer {
    /// Allocate a zero-initialized buffer
    pub fn allocate(dimensions: Dimensions, element_type: ElementType) -> Result<Self> {
        let storage = LabelStorage::zeroed(element_type, dimensions.voxel_count())
            .map_err(|e| {
                log::warn!("Labelmap allocation of {:?} failed: {}", dimensions.to_array(), e);
                Error::VolumeTooLarge(dimensions.to_array())
            })?;
        Ok(Self { dimensions, storage })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn storage(&self) -> &LabelStorage {
        &self.storage
    }

    /// Check if voxel is painted; false outside the volume
    pub fn is_painted(&self, p: IVec3) -> bool {
        self.dimensions
            .index(p)
            .and_then(|i| self.storage.get(i))
            .is_some_and(|label| label != 0)
    }

    /// Paint one voxel. Returns false (and writes nothing) outside the volume.
    pub fn set(&mut self, p: IVec3) -> bool {
        match self.dimensions.index(p) {
            Some(index) => {
                self.storage.mark(index);
                true
            }
            None => false,
        }
    }

    /// Paint the row `i0..=i1` at fixed `j`, `k`, clipped to the volume.
    /// Returns the number of voxels in the clipped row.
    pub fn fill_range(&mut self, i0: i32, i1: i32, j: i32, k: i32) -> usize {
        let dims = self.dimensions.as_uvec3();
        let lo = i0.max(0);
        let hi = i1.min(dims.x as i32 - 1);
        if lo > hi {
            return 0;
        }
        let Some(start) = self.dimensions.index(IVec3::new(lo, j, k)) else {
            return 0;
        };
        let len = (hi - lo + 1) as usize;
        self.storage.mark_range(start..start + len);
        len
    }

    /// Give up the storage. Consumes the buffer, so this happens at most once.
    pub fn take_ownership(self) -> PaintedLabelmap {
        PaintedLabelmap {
            dimensions: self.dimensions,
            storage: self.storage,
        }
    }
}
