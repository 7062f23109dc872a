use std::sync::Arc;

use core_types::OpType;

use crate::node::Node;
use crate::types::{Backend, KernelError, Score};


/// One backend's implementation of one operator.
///
/// Every callback has a default so a kernel only overrides what it needs;
/// a missing callback is a successful no-op. `run` takes `&self`: state that
/// must survive between calls belongs in the node, not the kernel.
pub trait Kernel: Send + Sync {
    /// Name used in logs and for inventory de-duplication
    fn name(&self) -> &'static str;

    fn backend(&self) -> Backend {
        Backend::Reference
    }

    /// How well this kernel fits `node`
    fn score(&self, _node: &Node) -> Score {
        Score::CAN_DO
    }

    /// Called once after selection, before the first run
    fn init(&self, _node: &mut Node) -> Result<(), KernelError> {
        Ok(())
    }

    /// Compute the node's outputs from its inputs
    fn run(&self, _node: &mut Node) -> Result<(), KernelError> {
        Ok(())
    }

    /// Whether `reshape` actually reacts to shape changes.
    /// When false the engine applies its own reshape policy.
    fn handles_reshape(&self) -> bool {
        false
    }

    /// React to a change of the input shapes
    fn reshape(&self, _node: &mut Node) -> Result<(), KernelError> {
        Ok(())
    }

    /// Called once when the node is torn down
    fn release(&self, _node: &mut Node) -> Result<(), KernelError> {
        Ok(())
    }
}


/// Wrapper for kernel factory functions
pub struct KernelFactory {
    pub op_type: OpType,
    pub name:    &'static str,
    pub backend: Backend,
    pub factory: fn() -> Arc<dyn Kernel>,
}

// Collect all registered kernels
inventory::collect!(KernelFactory);
