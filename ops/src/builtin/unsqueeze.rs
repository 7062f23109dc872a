use core_types::OpType;

use crate::node::Node;
use crate::op::Kernel;
use crate::register_kernel;
use crate::types::{Backend, KernelError, OpParams, RegistrationInfo, Score};

use super::copy::{copy_tensor, single_io};
use super::shape::unsqueeze_shape;


/// Reference unsqueeze: element-wise copy of the input into the
/// higher-rank output. Holds no state, so init and release are no-ops.
#[derive(Debug, Default)]
pub struct UnsqueezeRef;

impl UnsqueezeRef {
    pub fn new() -> Self {
        Self
    }
}

impl RegistrationInfo for UnsqueezeRef {
    const NAME: &'static str = "unsqueeze_ref";
    const OP_TYPE: OpType = OpType::Unsqueeze;
    const BACKEND: Backend = Backend::Reference;
}

impl Kernel for UnsqueezeRef {
    fn name(&self) -> &'static str { Self::NAME }

    fn score(&self, _node: &Node) -> Score {
        Score::BEST
    }

    fn run(&self, node: &mut Node) -> Result<(), KernelError> {
        let (input, output) = single_io(node)?;
        copy_tensor(input, output)
    }

    fn handles_reshape(&self) -> bool { true }

    /// Re-infer the output shape from the input shape and the node's axes.
    fn reshape(&self, node: &mut Node) -> Result<(), KernelError> {
        let axes = match node.params() {
            OpParams::Unsqueeze { axes } => axes.clone(),
            other => return Err(KernelError::InvalidParams {
                op:    OpType::Unsqueeze,
                found: other.clone(),
            }),
        };
        let (input, output) = single_io(node)?;
        let shape = unsqueeze_shape(&input.shape(), &axes)?;
        output.resize(&shape)?;
        Ok(())
    }
}

register_kernel!(UnsqueezeRef);
