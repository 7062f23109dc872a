pub mod op;
pub mod types;
pub mod node;
pub mod dispatch;
pub mod builtin;

use std::collections::HashMap;
use std::sync::Arc;

use core_types::OpType;
use parking_lot::RwLock;

pub use node::Node;
pub use op::{Kernel, KernelFactory};
pub use types::{
    AnyElement, Backend, KernelError, OpParams, RegistrationInfo, RegistryError, Score, TensorAny,
};

#[doc(hidden)]
pub use inventory;


/// Submit a kernel type to the inventory; picked up by
/// [`KernelRegistry::collect_inventory`].
#[macro_export]
macro_rules! register_kernel {
    ($kernel:ty) => {
        $crate::inventory::submit! {
            $crate::KernelFactory {
                op_type: <$kernel as $crate::RegistrationInfo>::OP_TYPE,
                name:    <$kernel as $crate::RegistrationInfo>::NAME,
                backend: <$kernel as $crate::RegistrationInfo>::BACKEND,
                factory: || ::std::sync::Arc::new(<$kernel>::new()),
            }
        }
    };
}


/// Same kernel instance, compared by address
fn same_kernel(a: &Arc<dyn Kernel>, b: &Arc<dyn Kernel>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Kernels registered per operator, in registration order.
///
/// Built once at startup and shared by reference. The map lock is held only
/// for a single insert, remove or lookup; lookups hand out snapshots so a
/// concurrent (un)registration never disturbs a dispatch in flight.
#[derive(Default)]
pub struct KernelRegistry {
    map: RwLock<HashMap<OpType, Vec<Arc<dyn Kernel>>>>,
}

impl KernelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every kernel submitted with [`register_kernel!`].
    ///
    /// Factories are sorted by backend, then name, so the resulting order
    /// does not depend on link order. A factory whose kernel name is already
    /// present for its operator is skipped, which makes repeated (or
    /// concurrent) calls harmless: the name check and the insert happen under
    /// the same write lock. Returns how many kernels were added.
    pub fn collect_inventory(&self) -> usize {
        let mut factories: Vec<&KernelFactory> = inventory::iter::<KernelFactory>.into_iter().collect();
        factories.sort_by_key(|f| (f.backend, f.name, f.op_type));

        let mut added = 0;
        for factory in factories {
            let mut map = self.map.write();
            let kernels = map.entry(factory.op_type).or_default();
            if kernels.iter().any(|k| k.name() == factory.name) {
                tracing::debug!(op = %factory.op_type, kernel = factory.name, "already collected");
                continue;
            }

            tracing::debug!(op = %factory.op_type, kernel = factory.name, backend = ?factory.backend, "kernel registered");
            kernels.push((factory.factory)());
            added += 1;
        }
        added
    }

    /// Add `kernel` to the candidates of `op`.
    pub fn register(&self, op: OpType, kernel: Arc<dyn Kernel>) -> Result<(), RegistryError> {
        let mut map = self.map.write();
        let kernels = map.entry(op).or_default();
        if kernels.iter().any(|k| same_kernel(k, &kernel)) {
            tracing::warn!(op = %op, kernel = kernel.name(), "kernel registered twice");
            return Err(RegistryError::AlreadyRegistered { op, kernel: kernel.name() });
        }

        tracing::debug!(op = %op, kernel = kernel.name(), backend = ?kernel.backend(), "kernel registered");
        kernels.push(kernel);
        Ok(())
    }

    /// Remove `kernel` from the candidates of `op`.
    pub fn unregister(&self, op: OpType, kernel: &Arc<dyn Kernel>) -> Result<(), RegistryError> {
        let mut map = self.map.write();

        let emptied = map.get_mut(&op).and_then(|kernels| {
            let pos = kernels.iter().position(|k| same_kernel(k, kernel))?;
            kernels.remove(pos);
            Some(kernels.is_empty())
        });

        match emptied {
            Some(emptied) => {
                if emptied {
                    map.remove(&op);
                }
                tracing::debug!(op = %op, kernel = kernel.name(), "kernel unregistered");
                Ok(())
            }
            None => {
                tracing::warn!(op = %op, kernel = kernel.name(), "kernel to unregister not found");
                Err(RegistryError::NotFound { op, kernel: kernel.name() })
            }
        }
    }

    /// Snapshot of the candidates for `op`, in registration order
    pub fn lookup(&self, op: OpType) -> Vec<Arc<dyn Kernel>> {
        self.map.read().get(&op).cloned().unwrap_or_default()
    }

    /// Choose the kernel that will execute `node`
    pub fn select(&self, node: &Node) -> Result<Arc<dyn Kernel>, RegistryError> {
        let op = node.op_type();
        let candidates = self.lookup(op);

        let (index, score) = dispatch::select_candidate(&candidates, node)
            .ok_or_else(|| RegistryError::NoCandidate { op, node: node.name().to_string() })?;

        let kernel = candidates[index].clone();
        tracing::debug!(
            node = node.name(),
            op = %op,
            kernel = kernel.name(),
            %score,
            candidates = candidates.len(),
            "kernel selected"
        );
        Ok(kernel)
    }

    /// Operators with at least one kernel
    pub fn op_types(&self) -> Vec<OpType> {
        let mut ops: Vec<OpType> = self.map.read().keys().copied().collect();
        ops.sort();
        ops
    }

    /// Total number of registered kernels
    pub fn len(&self) -> usize {
        self.map.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
