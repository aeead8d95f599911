//! Axis-aligned box fill

use crate::core::types::Vec3;
use crate::math::VoxelBox;
use crate::voxel::buffer::VoxelBuffer;

/// Paint the box spanned by two inclusive corners, row by row.
///
/// Corner order does not matter and the parts of the box outside the volume
/// are clipped. Returns the number of voxels covered by the clipped box.
pub fn fill_rectangle(buffer: &mut VoxelBuffer, point1: Vec3, point2: Vec3) -> usize {
    let region = VoxelBox::from_corners(point1, point2, buffer.dimensions().as_uvec3());
    if region.is_empty() {
        log::debug!("Rectangle {:?}..{:?} misses the volume", point1, point2);
        return 0;
    }

    let mut filled = 0;
    for k in region.min.z..=region.max.z {
        for j in region.min.y..=region.max.y {
            filled += buffer.fill_range(region.min.x, region.max.x, j, k);
        }
    }
    filled
}
