//! Paint session: owns the labelmap between `start` and `end`

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::voxel::buffer::{ElementType, PaintedLabelmap, VoxelBuffer};
use crate::voxel::dimensions::Dimensions;
use super::primitive::{EllipsoidBrush, SlicingAxis};
use super::rectangle::fill_rectangle;
use super::stroke::StrokeRasterizer;

/// Lifecycle of a [`PaintSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Active,
    Ended,
}

/// One painting session over a single labelmap.
///
/// `start` allocates the buffer, `paint` and `paint_rectangle` mutate it, and
/// `end` hands the storage back to the caller without copying.
#[derive(Debug, Default)]
pub struct PaintSession {
    buffer: Option<VoxelBuffer>,
    stroke: StrokeRasterizer,
    slicing: Option<SlicingAxis>,
    state: SessionState,
}

impl PaintSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Locked axis of the current session
    pub fn slicing(&self) -> Option<SlicingAxis> {
        self.slicing
    }

    /// The labelmap being painted, while Active
    pub fn buffer(&self) -> Option<&VoxelBuffer> {
        self.buffer.as_ref()
    }

    /// Begin a session with a fresh zeroed buffer.
    ///
    /// Starting while Active discards the previous buffer. If the new buffer
    /// cannot be allocated the session is left as it was.
    pub fn start(
        &mut self,
        dimensions: Dimensions,
        element_type: ElementType,
        slicing: Option<SlicingAxis>,
    ) -> Result<()> {
        let buffer = VoxelBuffer::allocate(dimensions, element_type)?;
        if self.buffer.is_some() {
            log::debug!("Restarting active session, discarding previous buffer");
        }
        self.buffer = Some(buffer);
        self.stroke.reset();
        self.slicing = slicing;
        self.state = SessionState::Active;
        log::info!(
            "Paint session started: dims {:?}, {:?} labels, slicing {:?}",
            dimensions.to_array(),
            element_type,
            slicing
        );
        Ok(())
    }

    /// Paint one stroke sample. Returns the number of in-volume writes.
    pub fn paint(&mut self, point: Vec3, radius: Vec3) -> Result<usize> {
        let buffer = self.buffer.as_mut().ok_or(Error::NoActiveSession { op: "paint" })?;
        let brush = EllipsoidBrush::new(point, radius);
        Ok(self.stroke.paint(buffer, &brush, self.slicing))
    }

    /// Fill the box between two corners. Returns the number of voxels covered.
    pub fn paint_rectangle(&mut self, point1: Vec3, point2: Vec3) -> Result<usize> {
        let buffer = self
            .buffer
            .as_mut()
            .ok_or(Error::NoActiveSession { op: "paintRectangle" })?;
        let filled = fill_rectangle(buffer, point1, point2);
        log::debug!("Rectangle {:?}..{:?}: {} voxels", point1, point2, filled);
        Ok(filled)
    }

    /// Finish the session and take the labelmap
    pub fn end(&mut self) -> Result<PaintedLabelmap> {
        let buffer = self.buffer.take().ok_or(Error::NoActiveSession { op: "end" })?;
        self.stroke.reset();
        self.slicing = None;
        self.state = SessionState::Ended;

        let labelmap = buffer.take_ownership();
        log::info!(
            "Paint session ended: {} painted voxels",
            labelmap.storage.count_painted()
        );
        Ok(labelmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IVec3;

    fn dims() -> Dimensions {
        Dimensions::new(4, 4, 4).unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = PaintSession::new();
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(session.buffer().is_none());
    }

    #[test]
    fn test_requires_start() {
        let mut session = PaintSession::new();
        assert!(matches!(
            session.paint(Vec3::ZERO, Vec3::ONE),
            Err(Error::NoActiveSession { op: "paint" })
        ));
        assert!(matches!(
            session.paint_rectangle(Vec3::ZERO, Vec3::ONE),
            Err(Error::NoActiveSession { op: "paintRectangle" })
        ));
        assert!(matches!(session.end(), Err(Error::NoActiveSession { op: "end" })));
    }

    #[test]
    fn test_stroke_scenario() {
        let mut session = PaintSession::new();
        session.start(dims(), ElementType::U8, None).unwrap();

        let radius = Vec3::splat(0.5);
        session.paint(Vec3::ZERO, radius).unwrap();
        assert_eq!(session.buffer().unwrap().storage().count_painted(), 1);
        session.paint(Vec3::new(3.0, 0.0, 0.0), radius).unwrap();

        let map = session.end().unwrap();
        let expected: Vec<_> = (0..4).map(|i| IVec3::new(i, 0, 0)).collect();
        assert_eq!(map.painted_voxels(), expected);
    }

    #[test]
    fn test_end_returns_union_of_effects() {
        let mut session = PaintSession::new();
        session.start(dims(), ElementType::U32, None).unwrap();
        session.paint_rectangle(Vec3::splat(1.0), Vec3::splat(2.0)).unwrap();
        session.paint(Vec3::new(0.0, 3.0, 3.0), Vec3::splat(0.5)).unwrap();

        let map = session.end().unwrap();
        assert_eq!(map.storage.element_type(), ElementType::U32);
        assert_eq!(map.storage.count_painted(), 9);
        assert!(map.is_painted(IVec3::new(0, 3, 3)));
        assert_eq!(session.state(), SessionState::Ended);
    }

    #[test]
    fn test_failed_start_keeps_state() {
        let mut session = PaintSession::new();
        let huge = Dimensions::new(u32::MAX, u32::MAX, 1).unwrap();
        assert!(matches!(
            session.start(huge, ElementType::U32, None),
            Err(Error::VolumeTooLarge(_))
        ));
        assert_eq!(session.state(), SessionState::Uninitialized);

        session.start(dims(), ElementType::U8, None).unwrap();
        session.paint(Vec3::ZERO, Vec3::splat(0.5)).unwrap();
        assert!(session.start(huge, ElementType::U8, None).is_err());
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.buffer().unwrap().storage().count_painted(), 1);
    }

    #[test]
    fn test_paint_after_end_fails() {
        let mut session = PaintSession::new();
        session.start(dims(), ElementType::U8, None).unwrap();
        session.end().unwrap();

        assert!(session.paint(Vec3::ZERO, Vec3::ONE).is_err());
        assert!(session.end().is_err());
    }

    #[test]
    fn test_restart_resets_buffer_and_stroke() {
        let mut session = PaintSession::new();
        session.start(dims(), ElementType::U8, None).unwrap();
        session.paint(Vec3::ZERO, Vec3::splat(0.5)).unwrap();

        session.start(dims(), ElementType::U16, Some(SlicingAxis::Y)).unwrap();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.slicing(), Some(SlicingAxis::Y));
        assert_eq!(session.buffer().unwrap().storage().count_painted(), 0);

        // No connecting line back to the sample from the discarded session
        session.paint(Vec3::new(3.0, 0.0, 0.0), Vec3::splat(0.5)).unwrap();
        let map = session.end().unwrap();
        assert_eq!(map.painted_voxels(), vec![IVec3::new(3, 0, 0)]);
    }
}
