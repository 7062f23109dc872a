use bytemuck::{Pod, Zeroable};
use std::fmt;

include!("generated_data_types.rs");

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Logical operators a graph node can carry.
///
/// The set is closed: every backend keys its kernels on one of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpType {
    /// Insert size-1 dimensions at the given axes
    Unsqueeze,
    /// Remove size-1 dimensions
    Squeeze,
}

impl OpType {
    pub fn name(self) -> &'static str {
        match self {
            OpType::Unsqueeze => "unsqueeze",
            OpType::Squeeze => "squeeze",
        }
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maximum number of dimensions for a view descriptor
pub const MAX_DIMS: usize = 8; // (B, C, H, W, D, T) + 2 should be enough

/// Descriptor for a view into a buffer
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq, Eq)]
pub struct ViewDescriptor {
    pub offset:  u32,
    pub ndim:    u32,
    pub shape:   [u32; MAX_DIMS],
    pub strides: [u32; MAX_DIMS],
}

impl ViewDescriptor {
    /// Declared extents, without the unused trailing slots
    pub fn dims(&self) -> &[u32] {
        &self.shape[..self.ndim as usize]
    }

    /// Number of elements addressed by the view
    pub fn element_count(&self) -> usize {
        self.dims().iter().map(|&d| d as usize).product()
    }
}
