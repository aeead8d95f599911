//! Voxpaint - Volumetric freehand painting into binary labelmaps
//!
//! A [`PaintSession`](voxel::brush::PaintSession) owns a flat labelmap buffer and
//! paints ellipsoid brush strokes and rectangles into it. A
//! [`PaintWorker`](worker::PaintWorker) runs a session on a dedicated thread and
//! answers `start` / `paint` / `paintRectangle` / `end` requests in order.

pub mod core;
pub mod math;
pub mod voxel;
pub mod worker;

pub use crate::core::{Error, Result};
pub use voxel::brush::{EllipsoidBrush, PaintSession, SessionState, SlicingAxis};
pub use voxel::{Dimensions, ElementType, LabelStorage, PaintedLabelmap, VoxelBuffer};
pub use worker::{PaintRequest, PaintResponse, PaintWorker, WorkerConfig};
