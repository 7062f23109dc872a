use core_types::OpType;

use crate::node::Node;
use crate::op::Kernel;
use crate::register_kernel;
use crate::types::{Backend, KernelError, OpParams, RegistrationInfo, Score};

use super::copy::{copy_tensor, single_io};
use super::shape::squeeze_shape;


/// Reference squeeze, the inverse of `UnsqueezeRef`.
#[derive(Debug, Default)]
pub struct SqueezeRef;

impl SqueezeRef {
    pub fn new() -> Self {
        Self
    }
}

impl RegistrationInfo for SqueezeRef {
    const NAME: &'static str = "squeeze_ref";
    const OP_TYPE: OpType = OpType::Squeeze;
    const BACKEND: Backend = Backend::Reference;
}

impl Kernel for SqueezeRef {
    fn name(&self) -> &'static str { Self::NAME }

    fn score(&self, _node: &Node) -> Score {
        Score::BEST
    }

    fn run(&self, node: &mut Node) -> Result<(), KernelError> {
        let (input, output) = single_io(node)?;
        copy_tensor(input, output)
    }

    fn handles_reshape(&self) -> bool { true }

    fn reshape(&self, node: &mut Node) -> Result<(), KernelError> {
        let axes = match node.params() {
            OpParams::Squeeze { axes } => axes.clone(),
            other => return Err(KernelError::InvalidParams {
                op:    OpType::Squeeze,
                found: other.clone(),
            }),
        };
        let (input, output) = single_io(node)?;
        let shape = squeeze_shape(&input.shape(), &axes)?;
        output.resize(&shape)?;
        Ok(())
    }
}

register_kernel!(SqueezeRef);
