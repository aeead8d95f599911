//! Voxel-space geometry: integer boxes and digital line walks

pub mod voxel_box;
pub mod dda;

pub use voxel_box::VoxelBox;
pub use dda::LineWalk;
