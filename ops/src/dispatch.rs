use std::sync::Arc;

use crate::node::Node;
use crate::op::Kernel;
use crate::types::Score;

/// Pick the best of `candidates` for `node`.
///
/// Returns the index and score of the first candidate holding the strictly
/// greatest score. Candidates scoring `Score::UNSUPPORTED` or lower are
/// skipped; `None` when nothing accepts the node. A `BEST` score ends the
/// scan since no later candidate can beat it.
pub fn select_candidate(candidates: &[Arc<dyn Kernel>], node: &Node) -> Option<(usize, Score)> {
    let mut best: Option<(usize, Score)> = None;

    for (i, kernel) in candidates.iter().enumerate() {
        let score = kernel.score(node);
        if !score.is_supported() {
            tracing::debug!(node = node.name(), kernel = kernel.name(), "kernel declined node");
            continue;
        }

        if best.is_none_or(|(_, s)| score > s) {
            best = Some((i, score));
            if score == Score::BEST {
                break;
            }
        }
    }
    best
}
