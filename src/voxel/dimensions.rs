//! Volume dimensions and linear voxel indexing

use crate::core::error::Error;
use crate::core::types::{IVec3, Result, UVec3};

/// Voxel counts along x, y and z. Every axis is at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions(UVec3);

impl Dimensions {
    /// Validate and create dimensions
    pub fn new(x: u32, y: u32, z: u32) -> Result<Self> {
        Self::from_array([x, y, z])
    }

    pub fn from_array(dims: [u32; 3]) -> Result<Self> {
        if dims.contains(&0) {
            return Err(Error::InvalidDimensions(dims));
        }
        let count = (dims[0] as usize)
            .checked_mul(dims[1] as usize)
            .and_then(|n| n.checked_mul(dims[2] as usize));
        if count.is_none() {
            return Err(Error::VolumeTooLarge(dims));
        }
        Ok(Self(UVec3::from(dims)))
    }

    pub fn as_uvec3(&self) -> UVec3 {
        self.0
    }

    pub fn to_array(&self) -> [u32; 3] {
        self.0.to_array()
    }

    /// Total number of voxels
    pub fn voxel_count(&self) -> usize {
        self.0.x as usize * self.0.y as usize * self.0.z as usize
    }

    /// Check if voxel lies inside the volume
    pub fn contains(&self, p: IVec3) -> bool {
        p.cmpge(IVec3::ZERO).all() && p.as_uvec3().cmplt(self.0).all()
    }

    /// Linear index `i + j*dimX + k*dimX*dimY`, or `None` outside the volume
    pub fn index(&self, p: IVec3) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let (x, y) = (self.0.x as usize, self.0.y as usize);
        Some(p.x as usize + p.y as usize * x + p.z as usize * x * y)
    }

    /// Inverse of [`Dimensions::index`]
    pub fn coord(&self, index: usize) -> IVec3 {
        let (x, y) = (self.0.x as usize, self.0.y as usize);
        IVec3::new(
            (index % x) as i32,
            (index / x % y) as i32,
            (index / (x * y)) as i32,
        )
    }
}
