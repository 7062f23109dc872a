use nodeops_ops::{KernelError, RegistryError};
use thiserror::Error;

use crate::binding::BindingState;

/// Failures surfaced to whoever drives the graph.
///
/// Nothing here is retried internally; the caller decides whether a failure
/// aborts the graph or is attempted again.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Registry refusal, most often `NoCandidate` for the node
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("kernel '{kernel}' failed to initialise node '{node}'")]
    InitFailed { node: String, kernel: &'static str, #[source] source: KernelError },

    #[error("kernel '{kernel}' failed to run node '{node}'")]
    RunFailed { node: String, kernel: &'static str, #[source] source: KernelError },

    #[error("kernel '{kernel}' failed to reshape node '{node}'")]
    ReshapeFailed { node: String, kernel: &'static str, #[source] source: KernelError },

    #[error("cannot {action} node '{node}' while its binding is {state:?}")]
    LifecycleViolation { node: String, action: &'static str, state: BindingState },

    #[error("binding for node '{bound}' cannot {action} node '{node}'")]
    NodeMismatch { bound: String, node: String, action: &'static str },

    #[error("node '{0}' appears more than once in the graph")]
    DuplicateNode(String),

    #[error("{bindings} bindings given for {nodes} nodes")]
    PlanMismatch { bindings: usize, nodes: usize },
}

impl ExecError {
    /// Whether no registered kernel accepted the node
    pub fn is_no_candidate(&self) -> bool {
        matches!(self, ExecError::Registry(RegistryError::NoCandidate { .. }))
    }
}
