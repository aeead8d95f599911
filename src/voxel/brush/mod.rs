//! Brush painting into a labelmap
//!
//! Ellipsoid strokes swept between consecutive samples, rectangle fills, and
//! the session that owns the buffer between `start` and `end`.

pub mod primitive;
pub mod stroke;
pub mod rectangle;
pub mod session;

// Re-exports
pub use primitive::{EllipsoidBrush, SlicingAxis};
pub use stroke::StrokeRasterizer;
pub use rectangle::fill_rectangle;
pub use session::{PaintSession, SessionState};
