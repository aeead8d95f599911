use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, UVec3, Vec3};
use crate::math::VoxelBox;

/// Principal axis a session can lock painting to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlicingAxis {
    X,
    Y,
    Z,
}

impl SlicingAxis {
    /// Component index of this axis
    pub fn index(self) -> usize {
        match self {
            SlicingAxis::X => 0,
            SlicingAxis::Y => 1,
            SlicingAxis::Z => 2,
        }
    }

    /// Axis for a numeric slicing mode code
    /// (`-1` none, `0..=2` I/J/K, `3..=5` X/Y/Z).
    ///
    /// Only the X/Y/Z modes lock painting; the others, and unknown codes,
    /// give `None`.
    pub fn from_mode_code(code: i64) -> Option<Self> {
        match code {
            3 => Some(SlicingAxis::X),
            4 => Some(SlicingAxis::Y),
            5 => Some(SlicingAxis::Z),
            _ => None,
        }
    }
}

/// Axis-aligned ellipsoid in voxel-index space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidBrush {
    pub center: Vec3,
    /// Per-axis radius
    pub radius: Vec3,
}

impl EllipsoidBrush {
    pub fn new(center: Vec3, radius: Vec3) -> Self {
        Self { center, radius }
    }

    /// Voxel box holding the brush, clamped to the volume.
    ///
    /// With a locked axis that axis collapses to `floor(center)`, whatever the
    /// radius along it. The collapsed coordinate is not clamped.
    pub fn bounds(&self, dims: UVec3, slicing: Option<SlicingAxis>) -> VoxelBox {
        let bounds = VoxelBox::around_ellipsoid(self.center, self.radius, dims);
        match slicing {
            Some(axis) => {
                let a = axis.index();
                bounds.collapse_axis(a, self.center[a].floor() as i32)
            }
            None => bounds,
        }
    }

    /// True when a radius on an unlocked axis is not positive, so no voxel can
    /// pass [`EllipsoidBrush::contains_voxel`].
    pub fn is_degenerate(&self, slicing: Option<SlicingAxis>) -> bool {
        let locked = slicing.map(SlicingAxis::index);
        (0..3).any(|a| Some(a) != locked && (self.radius[a] <= 0.0 || self.radius[a].is_nan()))
    }

    /// `((i-x)/rx)² + ((j-y)/ry)² + ((k-z)/rz)² <= 1`, with the locked axis
    /// left out of the sum.
    pub fn contains_voxel(&self, voxel: IVec3, slicing: Option<SlicingAxis>) -> bool {
        if self.is_degenerate(slicing) {
            return false;
        }
        let locked = slicing.map(SlicingAxis::index);
        let rel = (voxel.as_vec3() - self.center) / self.radius;
        let sum: f32 = (0..3)
            .filter(|&a| Some(a) != locked)
            .map(|a| rel[a] * rel[a])
            .sum();
        sum <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_voxel() {
        let brush = EllipsoidBrush::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(brush.contains_voxel(IVec3::new(2, 2, 2), None));
        assert!(brush.contains_voxel(IVec3::new(4, 2, 2), None));
        assert!(brush.contains_voxel(IVec3::new(2, 3, 2), None));
        assert!(!brush.contains_voxel(IVec3::new(2, 4, 2), None));
        assert!(!brush.contains_voxel(IVec3::new(3, 3, 2), None));
    }

    #[test]
    fn test_zero_radius_unlocked_is_empty() {
        let brush = EllipsoidBrush::new(Vec3::splat(1.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(brush.is_degenerate(None));
        assert!(!brush.contains_voxel(IVec3::splat(1), None));
    }

    #[test]
    fn test_zero_radius_on_locked_axis() {
        let brush = EllipsoidBrush::new(Vec3::new(1.0, 1.0, 2.6), Vec3::new(1.0, 1.0, 0.0));
        let slicing = Some(SlicingAxis::Z);
        assert!(!brush.is_degenerate(slicing));
        // z offset of the voxel does not count toward the sum
        assert!(brush.contains_voxel(IVec3::new(1, 1, 2), slicing));
        assert!(brush.contains_voxel(IVec3::new(2, 1, 2), slicing));
    }

    #[test]
    fn test_bounds_collapse_locked_axis() {
        let brush = EllipsoidBrush::new(Vec3::new(4.0, 4.0, 3.7), Vec3::splat(2.0));
        let bounds = brush.bounds(UVec3::splat(8), Some(SlicingAxis::Z));
        assert_eq!(bounds.min, IVec3::new(2, 2, 3));
        assert_eq!(bounds.max, IVec3::new(6, 6, 3));
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(SlicingAxis::from_mode_code(3), Some(SlicingAxis::X));
        assert_eq!(SlicingAxis::from_mode_code(5), Some(SlicingAxis::Z));
        assert_eq!(SlicingAxis::from_mode_code(-1), None);
        assert_eq!(SlicingAxis::from_mode_code(2), None);
    }

    #[test]
    fn test_slicing_axis_names() {
        let axis: SlicingAxis = serde_json::from_str("\"y\"").unwrap();
        assert_eq!(axis, SlicingAxis::Y);
        assert_eq!(axis.index(), 1);
    }
}
