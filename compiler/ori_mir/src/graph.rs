//! CFG queries over a [`BlockMap`].
//!
//! Edges come from each block's terminator. Labels that name no block
//! are skipped by traversals and reported by [`dangling_targets`].
//! Everything here is read-only and returns labels in block-map order
//! where an order is not otherwise implied.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::body::BlockMap;
use crate::keys::BlockLabel;

/// Successor labels of `label`'s terminator. Empty for unknown labels.
pub fn successors<'a>(blocks: &'a BlockMap, label: &BlockLabel) -> SmallVec<[&'a BlockLabel; 2]> {
    blocks
        .get(label)
        .map(|block| block.successors())
        .unwrap_or_default()
}

/// Successor positions of the block at `idx`, skipping dangling labels.
fn successor_indices(blocks: &BlockMap, idx: usize) -> SmallVec<[usize; 2]> {
    blocks
        .get_index(idx)
        .map(|block| {
            block
                .successors()
                .into_iter()
                .filter_map(|succ| blocks.index_of(succ))
                .collect()
        })
        .unwrap_or_default()
}

/// Distinct predecessors of every block.
///
/// Every block has an entry, possibly empty. Predecessor lists follow
/// block-map order.
pub fn predecessors(blocks: &BlockMap) -> FxHashMap<BlockLabel, Vec<BlockLabel>> {
    let mut preds: FxHashMap<BlockLabel, Vec<BlockLabel>> = blocks
        .labels()
        .map(|label| (label.clone(), Vec::new()))
        .collect();

    for block in blocks {
        let mut seen = FxHashSet::default();
        for succ in block.successors() {
            if !seen.insert(succ) {
                continue;
            }
            if let Some(list) = preds.get_mut(succ) {
                list.push(block.label().clone());
            }
        }
    }

    preds
}

/// Labels reachable from `start`, including `start` itself if present.
pub fn reachable_from(blocks: &BlockMap, start: &BlockLabel) -> FxHashSet<BlockLabel> {
    let mut reached = FxHashSet::default();
    let Some(start_idx) = blocks.index_of(start) else {
        return reached;
    };

    let mut visited = vec![false; blocks.len()];
    let mut worklist = vec![start_idx];
    visited[start_idx] = true;

    while let Some(idx) = worklist.pop() {
        if let Some(block) = blocks.get_index(idx) {
            reached.insert(block.label().clone());
        }
        for succ in successor_indices(blocks, idx) {
            if !visited[succ] {
                visited[succ] = true;
                worklist.push(succ);
            }
        }
    }

    reached
}

/// Blocks not reachable from `entry`, in block-map order.
///
/// If `entry` is absent, every block is unreachable.
pub fn unreachable_blocks(blocks: &BlockMap, entry: &BlockLabel) -> Vec<BlockLabel> {
    let reached = reachable_from(blocks, entry);
    blocks
        .labels()
        .filter(|label| !reached.contains(*label))
        .cloned()
        .collect()
}

/// Postorder of the blocks reachable from `entry`.
///
/// Iterative DFS with an explicit stack, so deep CFGs cannot overflow.
/// Reverse it for a reverse-postorder dataflow schedule.
pub fn postorder(blocks: &BlockMap, entry: &BlockLabel) -> Vec<BlockLabel> {
    let Some(entry_idx) = blocks.index_of(entry) else {
        return Vec::new();
    };

    let num_blocks = blocks.len();
    let mut visited = vec![false; num_blocks];
    let mut order = Vec::with_capacity(num_blocks);

    // (block index, successors already pushed)
    let mut stack: Vec<(usize, bool)> = vec![(entry_idx, false)];

    while let Some(&mut (idx, ref mut expanded)) = stack.last_mut() {
        if *expanded {
            order.push(idx);
            stack.pop();
            continue;
        }
        *expanded = true;

        if visited[idx] {
            stack.pop();
            continue;
        }
        visited[idx] = true;

        // Pushed in reverse so the first successor is explored first.
        for succ in successor_indices(blocks, idx).into_iter().rev() {
            if !visited[succ] {
                stack.push((succ, false));
            }
        }
    }

    order
        .into_iter()
        .filter_map(|idx| blocks.get_index(idx).map(|block| block.label().clone()))
        .collect()
}

/// Every `(block, target)` pair where a jump names a missing block.
///
/// Scans every instruction, not just terminators, so a misplaced jump
/// with a bad target is still reported.
pub fn dangling_targets(blocks: &BlockMap) -> Vec<(BlockLabel, BlockLabel)> {
    let mut dangling = Vec::new();
    for block in blocks {
        for instr in &block.ops {
            for target in instr.op.successors() {
                if !blocks.contains(target) {
                    dangling.push((block.label().clone(), target.clone()));
                }
            }
        }
    }
    dangling
}
