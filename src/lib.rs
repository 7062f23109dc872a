//! Operator kernel registry and dispatch for graph nodes.
//!
//! ```no_run
//! use nodeops::{EngineConfig, Node, Runtime, Tensor};
//!
//! let runtime = Runtime::new(EngineConfig::default());
//! let mut node = Node::unsqueeze(
//!     "unsqueeze0",
//!     vec![0],
//!     Tensor::from_vec(vec![1.0f32, 2.0], &[2]).unwrap(),
//!     Tensor::<f32>::zeros(&[1, 2]).unwrap(),
//! );
//! let mut binding = runtime.engine().prepare(&mut node).unwrap();
//! binding.run(&mut node).unwrap();
//! binding.release(&mut node).unwrap();
//! ```

use std::sync::Arc;

pub use core_types::{DataType, Element, OpType};
pub use execution::{Binding, BindingState, EngineConfig, ExecError, ExecutionEngine, ReshapePolicy};
pub use nodeops_ops::{
    builtin, register_kernel, Backend, Kernel, KernelError, KernelRegistry, Node, OpParams,
    RegistrationInfo, RegistryError, Score, TensorAny,
};
pub use tensor::{Tensor, TensorError};

/// Process-level setup: one registry filled from the kernel inventory and
/// the engine that dispatches against it.
pub struct Runtime {
    registry: Arc<KernelRegistry>,
    engine:   ExecutionEngine,
}

impl Runtime {
    pub fn new(config: EngineConfig) -> Self {
        let registry = Arc::new(KernelRegistry::new());
        let added = registry.collect_inventory();
        tracing::info!(
            kernels = added,
            ops = ?registry.op_types(),
            "kernel registry ready"
        );

        let engine = ExecutionEngine::with_config(registry.clone(), config);
        Self { registry, engine }
    }

    /// Shared handle for modules that register their own kernels
    pub fn registry(&self) -> &Arc<KernelRegistry> {
        &self.registry
    }

    pub fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }
}
