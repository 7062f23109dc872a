use std::fmt;
use std::sync::Arc;

use nodeops_ops::{Kernel, Node};

use crate::error::ExecError;

/// Where a binding is in its lifecycle
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindingState {
    /// Kernel chosen, `init` not (successfully) called yet
    Unbound,
    /// Ready to run
    Initialized,
    /// Torn down; a fresh selection is needed to run the node again
    Released,
}

/// The kernel selected for one node, valid until the node is released.
///
/// Every call must be given the node the binding was selected for, matched by
/// name; any other node is refused with `NodeMismatch` before the kernel is
/// called. A node should have a single live binding. `run` takes `&mut self`,
/// so one binding never has two runs in flight.
pub struct Binding {
    node:   String,
    kernel: Arc<dyn Kernel>,
    state:  BindingState,
}

impl Binding {
    pub(crate) fn new(node: &Node, kernel: Arc<dyn Kernel>) -> Self {
        Self { node: node.name().to_string(), kernel, state: BindingState::Unbound }
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    pub fn kernel(&self) -> &Arc<dyn Kernel> {
        &self.kernel
    }

    pub fn kernel_name(&self) -> &'static str {
        self.kernel.name()
    }

    pub fn node_name(&self) -> &str {
        &self.node
    }

    fn expect_node(&self, node: &Node, action: &'static str) -> Result<(), ExecError> {
        if node.name() != self.node {
            return Err(ExecError::NodeMismatch {
                bound: self.node.clone(),
                node:  node.name().to_string(),
                action,
            });
        }
        Ok(())
    }

    pub(crate) fn expect_state(&self, node: &Node, wanted: BindingState, action: &'static str) -> Result<(), ExecError> {
        self.expect_node(node, action)?;
        if self.state != wanted {
            return Err(ExecError::LifecycleViolation {
                node:   self.node.clone(),
                action,
                state:  self.state,
            });
        }
        Ok(())
    }

    /// Unbound → Initialized. On failure the binding stays Unbound.
    pub fn init(&mut self, node: &mut Node) -> Result<(), ExecError> {
        self.expect_state(node, BindingState::Unbound, "init")?;

        self.kernel.init(node).map_err(|source| ExecError::InitFailed {
            node:   self.node.clone(),
            kernel: self.kernel.name(),
            source,
        })?;

        tracing::debug!(node = %self.node, kernel = self.kernel.name(), "node initialised");
        self.state = BindingState::Initialized;
        Ok(())
    }

    /// Run the kernel once. A failed run leaves the binding Initialized.
    pub fn run(&mut self, node: &mut Node) -> Result<(), ExecError> {
        self.expect_state(node, BindingState::Initialized, "run")?;

        tracing::trace!(node = %self.node, kernel = self.kernel.name(), "run");
        self.kernel.run(node).map_err(|source| ExecError::RunFailed {
            node:   self.node.clone(),
            kernel: self.kernel.name(),
            source,
        })
    }

    /// Forward a shape change to the kernel
    pub fn reshape(&mut self, node: &mut Node) -> Result<(), ExecError> {
        self.expect_state(node, BindingState::Initialized, "reshape")?;

        self.kernel.reshape(node).map_err(|source| ExecError::ReshapeFailed {
            node:   self.node.clone(),
            kernel: self.kernel.name(),
            source,
        })
    }

    /// Tear the binding down.
    ///
    /// A kernel that fails to release is logged and the binding is discarded
    /// anyway. An Unbound binding is released without calling the kernel.
    pub fn release(&mut self, node: &mut Node) -> Result<(), ExecError> {
        self.expect_node(node, "release")?;
        if self.state == BindingState::Released {
            return Err(ExecError::LifecycleViolation {
                node:   self.node.clone(),
                action: "release",
                state:  self.state,
            });
        }

        if self.state == BindingState::Initialized {
            if let Err(e) = self.kernel.release(node) {
                tracing::warn!(
                    node = %self.node,
                    kernel = self.kernel.name(),
                    error = %e,
                    "kernel release failed, binding discarded"
                );
            }
        }

        tracing::debug!(node = %self.node, kernel = self.kernel.name(), "node released");
        self.state = BindingState::Released;
        Ok(())
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("node", &self.node)
            .field("kernel", &self.kernel.name())
            .field("state", &self.state)
            .finish()
    }
}
