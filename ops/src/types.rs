use core_types::{DataType, Element, OpType, ViewDescriptor};
use derive_more::From;
use std::fmt;
use tensor::{Tensor, TensorError};
use thiserror::Error;

include!("generated_tensor_any.rs");

/// Suitability of a kernel for one node. Higher is preferred.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(pub i32);

impl Score {
    /// Unconditional preference: always correct for every instance of the op
    pub const BEST:        Score = Score(i32::MAX);
    /// Specialised path that matches this node well
    pub const PREFER:      Score = Score(6000);
    /// Can execute the node, nothing more
    pub const CAN_DO:      Score = Score(4000);
    /// Declines the node; never selected
    pub const UNSUPPORTED: Score = Score(0);

    pub fn is_supported(self) -> bool {
        self > Score::UNSUPPORTED
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Score::BEST {
            f.write_str("BEST")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Family of implementation a kernel belongs to.
/// Ordering is the inventory collection order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Backend {
    Reference,
    Vectorized,
    Accelerator,
}

/// Operator parameters carried by a node
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum OpParams {
    #[default]
    None,
    /// Axes to insert, negative values count from the end of the output rank
    Unsqueeze { axes: Vec<i32> },
    /// Axes to drop; empty drops every size-1 dimension
    Squeeze { axes: Vec<i32> },
}

/// Failures reported by a kernel callback
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("unsupported data types: input {input}, output {output}")]
    UnsupportedDataType { input: DataType, output: DataType },

    #[error("element count mismatch: input has {input}, output has {output}")]
    ElementCountMismatch { input: usize, output: usize },

    #[error("expected {expected_in} input(s) and {expected_out} output(s), found {found_in} and {found_out}")]
    ArityMismatch { expected_in: usize, expected_out: usize, found_in: usize, found_out: usize },

    #[error("{op} node carries parameters of another operator: {found:?}")]
    InvalidParams { op: OpType, found: OpParams },

    #[error("axis {axis} is invalid for rank {rank}")]
    InvalidAxis { axis: i32, rank: usize },

    #[error(transparent)]
    Tensor(#[from] TensorError),

    #[error("{0}")]
    Failed(String),
}

/// Failures of the registry and of kernel selection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("kernel '{kernel}' is already registered for {op}")]
    AlreadyRegistered { op: OpType, kernel: &'static str },

    #[error("kernel '{kernel}' is not registered for {op}")]
    NotFound { op: OpType, kernel: &'static str },

    #[error("no kernel can execute {op} node '{node}'")]
    NoCandidate { op: OpType, node: String },
}

/// Trait to implement for each kernel to work with inventory
pub trait RegistrationInfo {
    /// Unique kernel name within its operator
    const NAME: &'static str;
    const OP_TYPE: OpType;
    const BACKEND: Backend;
}
