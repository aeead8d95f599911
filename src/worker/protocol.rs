//! Paint protocol - request/response definitions

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::types::{Result, Vec3};
use crate::voxel::brush::{PaintSession, SlicingAxis};
use crate::voxel::buffer::{ElementType, PaintedLabelmap};
use crate::voxel::dimensions::Dimensions;

/// Requests sent from the caller to the paint worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "params", rename_all = "camelCase")]
pub enum PaintRequest {
    /// Allocate a fresh labelmap and begin a session
    #[serde(rename_all = "camelCase")]
    Start {
        dimensions: [u32; 3],
        /// Falls back to the worker's configured default when absent
        #[serde(default, alias = "bufferType", skip_serializing_if = "Option::is_none")]
        element_type: Option<ElementType>,
        /// Axis name, or a numeric slicing mode code
        #[serde(
            default,
            alias = "slicingMode",
            deserialize_with = "deserialize_slicing",
            skip_serializing_if = "Option::is_none"
        )]
        slicing_axis: Option<SlicingAxis>,
    },
    /// Paint one stroke sample
    Paint { point: [f32; 3], radius: [f32; 3] },
    /// Fill the box between two corners
    PaintRectangle { point1: [f32; 3], point2: [f32; 3] },
    /// End the session and hand back the labelmap
    End,
}

/// Responses from the paint worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintResponse {
    /// `start`, `paint` and `paintRectangle` completed
    Done,
    /// `end` completed; the labelmap storage now belongs to the caller
    Labelmap(PaintedLabelmap),
}

/// Slicing axis as sent on the wire: `"x"`/`"y"`/`"z"` or a mode code
#[derive(Deserialize)]
#[serde(untagged)]
enum SlicingRepr {
    Name(SlicingAxis),
    Code(i64),
}

fn deserialize_slicing<'de, D>(deserializer: D) -> std::result::Result<Option<SlicingAxis>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<SlicingRepr>::deserialize(deserializer)? {
        Some(SlicingRepr::Name(axis)) => Some(axis),
        Some(SlicingRepr::Code(code)) => SlicingAxis::from_mode_code(code),
        None => None,
    })
}

impl PaintRequest {
    /// Wire name of the operation
    pub fn op_name(&self) -> &'static str {
        match self {
            PaintRequest::Start { .. } => "start",
            PaintRequest::Paint { .. } => "paint",
            PaintRequest::PaintRectangle { .. } => "paintRectangle",
            PaintRequest::End => "end",
        }
    }
}

impl PaintSession {
    /// Apply one protocol request to this session
    pub fn handle_request(
        &mut self,
        request: PaintRequest,
        default_element_type: ElementType,
    ) -> Result<PaintResponse> {
        match request {
            PaintRequest::Start { dimensions, element_type, slicing_axis } => {
                let dimensions = Dimensions::from_array(dimensions)?;
                self.start(
                    dimensions,
                    element_type.unwrap_or(default_element_type),
                    slicing_axis,
                )?;
                Ok(PaintResponse::Done)
            }
            PaintRequest::Paint { point, radius } => {
                self.paint(Vec3::from(point), Vec3::from(radius))?;
                Ok(PaintResponse::Done)
            }
            PaintRequest::PaintRectangle { point1, point2 } => {
                self.paint_rectangle(Vec3::from(point1), Vec3::from(point2))?;
                Ok(PaintResponse::Done)
            }
            PaintRequest::End => self.end().map(PaintResponse::Labelmap),
        }
    }
}
