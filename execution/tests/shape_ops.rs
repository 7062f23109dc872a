use std::sync::Arc;

use core_types::{DataType, OpType};
use execution::{BindingState, ExecError, ExecutionEngine};
use nodeops_ops::builtin::{SqueezeRef, UnsqueezeRef};
use nodeops_ops::{
    Backend, Kernel, KernelError, KernelRegistry, Node, RegistrationInfo, Score, register_kernel,
};
use tensor::Tensor;

/// Plugin kernel: a vectorised unsqueeze that only claims f32 nodes
struct BulkUnsqueeze;

impl BulkUnsqueeze {
    fn new() -> Self {
        BulkUnsqueeze
    }
}

impl RegistrationInfo for BulkUnsqueeze {
    const NAME: &'static str = "unsqueeze_bulk";
    const OP_TYPE: OpType = OpType::Unsqueeze;
    const BACKEND: Backend = Backend::Vectorized;
}

impl Kernel for BulkUnsqueeze {
    fn name(&self) -> &'static str { Self::NAME }

    fn backend(&self) -> Backend { Backend::Vectorized }

    fn score(&self, node: &Node) -> Score {
        match node.inputs().first().map(|t| t.dtype()) {
            Some(DataType::F32) => Score::BEST,
            _ => Score::UNSUPPORTED,
        }
    }

    fn run(&self, _node: &mut Node) -> Result<(), KernelError> {
        Err(KernelError::Failed("never selected over the reference kernel".into()))
    }
}

register_kernel!(BulkUnsqueeze);


fn engine() -> ExecutionEngine {
    let registry = KernelRegistry::new();
    registry.collect_inventory();
    ExecutionEngine::new(Arc::new(registry))
}

fn unsqueeze_f32(data: Vec<f32>, shape: &[usize], axes: Vec<i32>, out_shape: &[usize]) -> Node {
    Node::unsqueeze(
        "unsqueeze0",
        axes,
        Tensor::from_vec(data, shape).unwrap(),
        Tensor::<f32>::zeros(out_shape).unwrap(),
    )
}

#[test]
fn plugins_are_collected_after_reference_kernels() {
    let engine = engine();
    let names: Vec<_> = engine
        .registry()
        .lookup(OpType::Unsqueeze)
        .iter()
        .map(|k| k.name())
        .collect();

    assert_eq!(names, vec![UnsqueezeRef::NAME, BulkUnsqueeze::NAME]);
}

#[test]
fn reference_kernel_wins_best_tie() {
    let engine = engine();
    let node = unsqueeze_f32(vec![1.0, 2.0], &[2], vec![0], &[1, 2]);

    for _ in 0..4 {
        let binding = engine.select(&node).unwrap();
        assert_eq!(binding.kernel_name(), UnsqueezeRef::NAME);
    }
}

#[test]
fn unsqueeze_runs_end_to_end() {
    let engine = engine();
    let mut node = unsqueeze_f32(vec![1.0, 2.0, 3.0, 4.0], &[2, 2], vec![1], &[2, 1, 2]);

    let mut binding = engine.prepare(&mut node).unwrap();
    binding.run(&mut node).unwrap();
    let first = node.outputs()[0].clone();
    binding.run(&mut node).unwrap();

    assert_eq!(node.outputs()[0], first);
    assert_eq!(node.outputs()[0].as_bytes(), node.inputs()[0].as_bytes());
    assert_eq!(node.outputs()[0].shape(), vec![2, 1, 2]);

    binding.release(&mut node).unwrap();
    assert_eq!(binding.state(), BindingState::Released);
}

#[test]
fn u8_and_empty_tensors_copy() {
    let engine = engine();

    let mut bytes = Node::unsqueeze(
        "bytes",
        vec![0],
        Tensor::from_vec(vec![0u8, 127, 255], &[3]).unwrap(),
        Tensor::<u8>::zeros(&[1, 3]).unwrap(),
    );
    let mut empty = unsqueeze_f32(vec![], &[0], vec![0], &[1, 0]);

    for node in [&mut bytes, &mut empty] {
        let mut binding = engine.prepare(node).unwrap();
        binding.run(node).unwrap();
        assert_eq!(node.outputs()[0].as_bytes(), node.inputs()[0].as_bytes());
    }
    assert_eq!(bytes.outputs()[0].downcast_ref::<u8>().unwrap().data(), &[0, 127, 255]);
}

#[test]
fn type_mismatch_surfaces_as_run_failure() {
    let engine = engine();
    let mut node = Node::unsqueeze(
        "mixed",
        vec![0],
        Tensor::from_vec(vec![1u8, 2], &[2]).unwrap(),
        Tensor::<f32>::zeros(&[1, 2]).unwrap(),
    );

    let mut binding = engine.prepare(&mut node).unwrap();
    match binding.run(&mut node) {
        Err(ExecError::RunFailed { source, .. }) => assert_eq!(
            source,
            KernelError::UnsupportedDataType { input: DataType::U8, output: DataType::F32 }
        ),
        other => panic!("expected RunFailed, got {other:?}"),
    }
    assert_eq!(binding.state(), BindingState::Initialized);
    assert!(node.outputs()[0].as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn unsupported_type_is_declined_by_plugin_only() {
    let engine = engine();
    let mut node = Node::unsqueeze(
        "ints",
        vec![0],
        Tensor::from_vec(vec![1i32, 2], &[2]).unwrap(),
        Tensor::<i32>::zeros(&[1, 2]).unwrap(),
    );

    // the reference kernel still claims the node, then refuses the type
    let mut binding = engine.prepare(&mut node).unwrap();
    assert_eq!(binding.kernel_name(), UnsqueezeRef::NAME);
    assert!(matches!(
        binding.run(&mut node),
        Err(ExecError::RunFailed { source: KernelError::UnsupportedDataType { .. }, .. })
    ));
}

#[test]
fn reshape_reinfers_output_through_engine() {
    let engine = engine();
    let mut node = unsqueeze_f32(vec![1.0, 2.0], &[2], vec![0], &[1, 2]);
    let mut binding = engine.prepare(&mut node).unwrap();

    node.set_input(0, Tensor::from_vec(vec![1.0f32, 2.0, 3.0], &[3]).unwrap());
    engine.reshape(&mut binding, &mut node).unwrap();
    assert_eq!(node.outputs()[0].shape(), vec![1, 3]);

    binding.run(&mut node).unwrap();
    assert_eq!(node.outputs()[0].downcast_ref::<f32>().unwrap().data(), &[1.0, 2.0, 3.0]);
}

#[test]
fn squeeze_undoes_unsqueeze() {
    let engine = engine();
    let data: Vec<f32> = (0..6).map(|i| i as f32 * 0.5).collect();

    let mut nodes = vec![
        unsqueeze_f32(data.clone(), &[2, 3], vec![0, -1], &[1, 2, 3, 1]),
        Node::squeeze(
            "squeeze0",
            vec![],
            Tensor::<f32>::zeros(&[1, 2, 3, 1]).unwrap(),
            Tensor::<f32>::zeros(&[2, 3]).unwrap(),
        ),
    ];

    let mut bindings = engine.prepare_all(&mut nodes).unwrap();
    assert_eq!(bindings[1].kernel_name(), SqueezeRef::NAME);

    bindings[0].run(&mut nodes[0]).unwrap();
    let mid = nodes[0].outputs()[0].clone();
    nodes[1].set_input(0, mid);
    bindings[1].run(&mut nodes[1]).unwrap();

    assert_eq!(nodes[1].outputs()[0].downcast_ref::<f32>().unwrap().data(), data.as_slice());
    engine.release_all(&mut bindings, &mut nodes).unwrap();
    assert!(bindings.iter().all(|b| b.state() == BindingState::Released));
}

#[test]
fn unregistered_reference_leaves_no_candidate_for_ints() {
    let registry = KernelRegistry::new();
    registry.collect_inventory();
    let reference = registry.lookup(OpType::Unsqueeze)[0].clone();
    registry.unregister(OpType::Unsqueeze, &reference).unwrap();
    let engine = ExecutionEngine::new(Arc::new(registry));

    // the plugin declines non-f32 nodes, so nothing is left
    let mut node = Node::unsqueeze(
        "ints",
        vec![0],
        Tensor::from_vec(vec![1i32], &[1]).unwrap(),
        Tensor::<i32>::zeros(&[1, 1]).unwrap(),
    );
    assert!(matches!(engine.prepare(&mut node), Err(e) if e.is_no_candidate()));
}

#[test]
fn unsqueeze_binding_does_not_run_a_squeeze_node() {
    let engine = engine();
    let mut unsqueeze = unsqueeze_f32(vec![1.0, 2.0], &[2], vec![0], &[1, 2]);
    let mut squeeze = Node::squeeze(
        "squeeze0",
        vec![0],
        Tensor::from_vec(vec![5.0f32, 6.0], &[1, 2]).unwrap(),
        Tensor::<f32>::zeros(&[2]).unwrap(),
    );

    let mut binding = engine.prepare(&mut unsqueeze).unwrap();
    assert!(matches!(binding.run(&mut squeeze), Err(ExecError::NodeMismatch { .. })));
    assert_eq!(squeeze.outputs()[0].downcast_ref::<f32>().unwrap().data(), &[0.0, 0.0]);

    binding.run(&mut unsqueeze).unwrap();
    assert_eq!(unsqueeze.outputs()[0].downcast_ref::<f32>().unwrap().data(), &[1.0, 2.0]);
}

#[test]
fn registry_errors_keep_their_kind() {
    let registry = KernelRegistry::new();
    let kernel: Arc<dyn Kernel> = Arc::new(UnsqueezeRef::new());

    let err: ExecError = registry.unregister(OpType::Unsqueeze, &kernel).unwrap_err().into();
    assert!(matches!(err, ExecError::Registry(nodeops_ops::RegistryError::NotFound { .. })));
    assert!(!err.is_no_candidate());
}
