//! Labelmap storage and painting

pub mod dimensions;
pub mod buffer;
pub mod brush;

pub use dimensions::Dimensions;
pub use buffer::{ElementType, LabelStorage, PaintedLabelmap, VoxelBuffer};
