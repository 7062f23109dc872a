use core_types::OpType;

use crate::types::{OpParams, TensorAny};

/// One operator instance of a graph with its bound tensors.
///
/// Inputs and outputs are pre-allocated by the graph layer; kernels read the
/// inputs and write the outputs in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    name:    String,
    op_type: OpType,
    params:  OpParams,
    inputs:  Vec<TensorAny>,
    outputs: Vec<TensorAny>,
}

impl Node {
    pub fn new(
        name:    impl Into<String>,
        op_type: OpType,
        params:  OpParams,
        inputs:  Vec<TensorAny>,
        outputs: Vec<TensorAny>,
    ) -> Self {
        Self { name: name.into(), op_type, params, inputs, outputs }
    }

    /// Single-input unsqueeze node
    pub fn unsqueeze(
        name:   impl Into<String>,
        axes:   Vec<i32>,
        input:  impl Into<TensorAny>,
        output: impl Into<TensorAny>,
    ) -> Self {
        Self::new(
            name,
            OpType::Unsqueeze,
            OpParams::Unsqueeze { axes },
            vec![input.into()],
            vec![output.into()],
        )
    }

    /// Single-input squeeze node
    pub fn squeeze(
        name:   impl Into<String>,
        axes:   Vec<i32>,
        input:  impl Into<TensorAny>,
        output: impl Into<TensorAny>,
    ) -> Self {
        Self::new(
            name,
            OpType::Squeeze,
            OpParams::Squeeze { axes },
            vec![input.into()],
            vec![output.into()],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn op_type(&self) -> OpType {
        self.op_type
    }

    pub fn params(&self) -> &OpParams {
        &self.params
    }

    pub fn inputs(&self) -> &[TensorAny] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TensorAny] {
        &self.outputs
    }

    /// Replace an input, e.g. after the upstream node changed its shape
    pub fn set_input(&mut self, index: usize, tensor: impl Into<TensorAny>) -> Option<TensorAny> {
        self.inputs
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, tensor.into()))
    }

    /// Inputs for reading and outputs for writing, borrowed together
    pub fn io_mut(&mut self) -> (&[TensorAny], &mut [TensorAny]) {
        (&self.inputs, &mut self.outputs)
    }
}
