//! Reference kernels for the shape-only operators.
//!
//! They never touch element values: the output gets the input's elements
//! under the shape the graph layer (or `reshape`) declared for it.

mod copy;
mod shape;
pub mod squeeze;
pub mod unsqueeze;

pub use copy::{COPY_TYPES, copy_tensor};
pub use shape::{squeeze_shape, unsqueeze_shape};
pub use squeeze::SqueezeRef;
pub use unsqueeze::UnsqueezeRef;
