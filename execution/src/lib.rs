mod binding;
mod error;

use std::collections::HashSet;
use std::sync::Arc;

use nodeops_ops::{KernelRegistry, Node};

pub use binding::{Binding, BindingState};
pub use error::ExecError;


/// What to do when a node's input shapes change and its kernel does not
/// handle reshapes itself
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ReshapePolicy {
    /// Keep the binding; the kernel copes with any shape
    #[default]
    Tolerate,
    /// Release the binding and select + init a kernel again
    Redispatch,
}

/// Engine settings
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    pub reshape_policy: ReshapePolicy,
}

/// Binds nodes to kernels and drives them through their lifecycle.
pub struct ExecutionEngine {
    registry: Arc<KernelRegistry>,
    config:   EngineConfig,
}

impl ExecutionEngine {
    pub fn new(registry: Arc<KernelRegistry>) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    pub fn with_config(registry: Arc<KernelRegistry>, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &KernelRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Choose a kernel for `node`; the binding starts Unbound.
    pub fn select(&self, node: &Node) -> Result<Binding, ExecError> {
        let kernel = self.registry.select(node)?;
        Ok(Binding::new(node, kernel))
    }

    /// Select a kernel for `node` and initialise it.
    pub fn prepare(&self, node: &mut Node) -> Result<Binding, ExecError> {
        let mut binding = self.select(node)?;
        binding.init(node)?;
        Ok(binding)
    }

    /// Prepare every node of a graph.
    ///
    /// Node names must be unique, each node gets exactly one binding. The
    /// graph is ready only if all of them succeed: on the first failure the
    /// nodes prepared so far are released and the error is returned.
    pub fn prepare_all(&self, nodes: &mut [Node]) -> Result<Vec<Binding>, ExecError> {
        check_unique(nodes)?;
        let mut bindings = Vec::with_capacity(nodes.len());

        for i in 0..nodes.len() {
            match self.prepare(&mut nodes[i]) {
                Ok(b) => bindings.push(b),
                Err(e) => {
                    tracing::debug!(node = nodes[i].name(), error = %e, "graph preparation aborted");
                    for (b, node) in bindings.iter_mut().zip(nodes.iter_mut()) {
                        // bindings here are all Initialized, release cannot fail
                        let _ = b.release(node);
                    }
                    return Err(e);
                }
            }
        }
        Ok(bindings)
    }

    /// React to a change of `node`'s input shapes.
    ///
    /// Kernels that handle reshapes get their `reshape` callback; for the
    /// others the configured `ReshapePolicy` applies.
    pub fn reshape(&self, binding: &mut Binding, node: &mut Node) -> Result<(), ExecError> {
        binding.expect_state(node, BindingState::Initialized, "reshape")?;

        if binding.kernel().handles_reshape() {
            return binding.reshape(node);
        }

        match self.config.reshape_policy {
            ReshapePolicy::Tolerate => {
                tracing::debug!(node = node.name(), kernel = binding.kernel_name(), "shape change tolerated");
                Ok(())
            }
            ReshapePolicy::Redispatch => {
                binding.release(node)?;
                *binding = self.prepare(node)?;
                tracing::debug!(node = node.name(), kernel = binding.kernel_name(), "node re-dispatched");
                Ok(())
            }
        }
    }

    /// Run every binding once, in order, stopping at the first failure.
    pub fn run_all(&self, bindings: &mut [Binding], nodes: &mut [Node]) -> Result<(), ExecError> {
        check_plan(bindings, nodes)?;
        for (b, node) in bindings.iter_mut().zip(nodes.iter_mut()) {
            b.run(node)?;
        }
        Ok(())
    }

    /// Release every binding that is still live
    pub fn release_all(&self, bindings: &mut [Binding], nodes: &mut [Node]) -> Result<(), ExecError> {
        check_plan(bindings, nodes)?;
        for (b, node) in bindings.iter_mut().zip(nodes.iter_mut()) {
            if b.state() != BindingState::Released {
                b.release(node)?;
            }
        }
        Ok(())
    }
}

fn check_unique(nodes: &[Node]) -> Result<(), ExecError> {
    let mut seen = HashSet::with_capacity(nodes.len());
    match nodes.iter().map(Node::name).find(|&name| !seen.insert(name)) {
        Some(dup) => Err(ExecError::DuplicateNode(dup.to_string())),
        None => Ok(()),
    }
}

fn check_plan(bindings: &[Binding], nodes: &[Node]) -> Result<(), ExecError> {
    if bindings.len() != nodes.len() {
        return Err(ExecError::PlanMismatch { bindings: bindings.len(), nodes: nodes.len() });
    }
    Ok(())
}


/* ------------------------------------------------------------------------- */
/*                                  Tests                                    */
/* ------------------------------------------------------------------------- */
