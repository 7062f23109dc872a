use anyhow::{Context, Result};
use nodeops::{EngineConfig, Node, Runtime, Tensor};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let runtime = Runtime::new(EngineConfig::default());
    let engine = runtime.engine();

    let input = Tensor::from_vec((0..6).map(|i| i as f32).collect(), &[2, 3])?;
    let output = Tensor::<f32>::zeros(&[2, 1, 3])?;
    let mut node = Node::unsqueeze("unsqueeze0", vec![1], input, output);

    let mut binding = engine.prepare(&mut node).context("preparing unsqueeze0")?;
    binding.run(&mut node).context("running unsqueeze0")?;

    let out = &node.outputs()[0];
    tracing::info!(
        kernel = binding.kernel_name(),
        input_shape = ?node.inputs()[0].shape(),
        output_shape = ?out.shape(),
        identical = out.as_bytes() == node.inputs()[0].as_bytes(),
        "unsqueeze done"
    );

    binding.release(&mut node)?;
    Ok(())
}
