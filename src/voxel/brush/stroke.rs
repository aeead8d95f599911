//! Stroke rasterization: ellipsoid stamps swept along a digital line

use crate::core::types::Vec3;
use crate::math::LineWalk;
use crate::voxel::buffer::VoxelBuffer;
use super::primitive::{EllipsoidBrush, SlicingAxis};

/// Paints consecutive brush samples of one stroke into a buffer.
///
/// Each call stamps the ellipsoid at the new sample and sweeps every brush
/// voxel back along the line to the previous sample, so fast strokes stay
/// continuous even when samples are further apart than the brush.
#[derive(Debug, Clone, Default)]
pub struct StrokeRasterizer {
    /// Previous sample, `None` before the first paint of a session
    prev_point: Option<Vec3>,
}

impl StrokeRasterizer {
    pub fn new() -> Self {
        Self { prev_point: None }
    }

    pub fn prev_point(&self) -> Option<Vec3> {
        self.prev_point
    }

    /// Forget the previous sample; the next paint starts a new stroke
    pub fn reset(&mut self) {
        self.prev_point = None;
    }

    /// Paint one stroke sample. Returns the number of in-volume writes,
    /// counting voxels written more than once.
    pub fn paint(
        &mut self,
        buffer: &mut VoxelBuffer,
        brush: &EllipsoidBrush,
        slicing: Option<SlicingAxis>,
    ) -> usize {
        let point = brush.center;
        let prev = *self.prev_point.get_or_insert(point);
        let mut written = 0;

        if brush.is_degenerate(slicing) {
            log::debug!("Degenerate brush radius {:?}, nothing painted", brush.radius);
        } else {
            let dims = buffer.dimensions().as_uvec3();
            let bounds = brush.bounds(dims, slicing);
            for voxel in bounds.iter().filter(|v| brush.contains_voxel(*v, slicing)) {
                // Replay the brush offset from the previous sample up to this voxel.
                // Clipping keeps the cost bounded by the volume, not the distance.
                let offset = voxel.as_vec3() - point;
                let start = (prev + offset).round().as_ivec3();
                for p in LineWalk::clipped(start, voxel, dims) {
                    if buffer.set(p) {
                        written += 1;
                    }
                }
            }
        }

        log::trace!("Stroke {:?} -> {:?}: {} writes", prev, point, written);
        self.prev_point = Some(point);
        written
    }
}
