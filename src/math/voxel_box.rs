//! Integer, inclusive, axis-aligned voxel boxes

use crate::core::types::{IVec3, UVec3, Vec3};

/// Inclusive box of voxel indices. Empty when `min > max` on any axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl VoxelBox {
    /// Create box from inclusive min and max corners
    pub fn new(min: IVec3, max: IVec3) -> Self {
        Self { min, max }
    }

    /// Smallest box holding the ellipsoid at `center` with per-axis `radius`,
    /// clamped to `[0, dims - 1]` on every axis.
    ///
    /// A negative radius yields an empty range on that axis.
    pub fn around_ellipsoid(center: Vec3, radius: Vec3, dims: UVec3) -> Self {
        let upper = (dims.as_vec3() - Vec3::ONE).max(Vec3::ZERO);
        let lo = (center - radius).clamp(Vec3::ZERO, upper).floor();
        let hi = (center + radius).clamp(Vec3::ZERO, upper).floor();
        let mut result = Self::new(lo.as_ivec3(), hi.as_ivec3());
        // clamp() lets an inverted range through unchanged when both ends pin
        // to the same bound; keep it empty.
        for axis in 0..3 {
            if radius[axis] < 0.0 {
                result.min[axis] = 1;
                result.max[axis] = 0;
            }
        }
        result
    }

    /// Box spanned by two real-valued corners in any order: `floor(min)` to
    /// `floor(max)` per axis, clipped to `[0, dims - 1]`.
    ///
    /// A box lying wholly outside the volume comes back empty.
    pub fn from_corners(a: Vec3, b: Vec3, dims: UVec3) -> Self {
        let lo = a.min(b).floor().as_ivec3().max(IVec3::ZERO);
        let hi = a.max(b).floor().as_ivec3().min(dims.as_ivec3() - IVec3::ONE);
        Self::new(lo, hi)
    }

    /// Collapse one axis to a single coordinate
    pub fn collapse_axis(mut self, axis: usize, coord: i32) -> Self {
        self.min[axis] = coord;
        self.max[axis] = coord;
        self
    }

    /// Check if the box holds no voxels
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Number of voxels in the box
    pub fn voxel_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let size = (self.max - self.min + IVec3::ONE).as_uvec3();
        size.x as usize * size.y as usize * size.z as usize
    }

    /// Check if voxel is inside the box
    pub fn contains(&self, p: IVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Iterate voxels, x fastest, then y, then z
    pub fn iter(&self) -> impl Iterator<Item = IVec3> + use<> {
        let (min, max) = (self.min, self.max);
        (min.z..=max.z).flat_map(move |k| {
            (min.y..=max.y).flat_map(move |j| (min.x..=max.x).map(move |i| IVec3::new(i, j, k)))
        })
    }
}
