// SPDX-License-Identifier: Apache-2.0
//! Aspect traversal driver: one pre-order pass over a subtree.
//!
//! Traversal is iterative with an explicit stack (no recursion, so depth is
//! bounded only by heap). Each node is visited exactly once; a node's
//! children are resolved *after* the aspect has run on it, so an aspect may
//! add children below the node it is currently visiting and they will be
//! visited in the same pass.
//!
//! Traversal never stops early. Whatever an aspect does at one node —
//! including deciding that the node is not in a rewritable shape — has no
//! effect on whether the rest of the subtree is visited. A tree may contain
//! several independent rewrite targets and each must get its chance.

use crate::graph::ResourceGraph;
use crate::ident::NodePath;

/// A transformation applied to every node of a subtree.
///
/// `visit` is called exactly once per node, parent before children, siblings
/// in insertion order. Implementations may mutate the visited node's
/// property bag and metadata freely, and may add children below it.
///
/// Contract: an implementation must not detach the subtree currently being
/// traversed (the driver resolves child paths from nodes it has already
/// visited).
pub trait Aspect {
    /// Visits one node of the graph.
    fn visit(&mut self, graph: &mut ResourceGraph, path: &NodePath);
}

/// Applies `aspect` to every node of the subtree rooted at `root`, in
/// pre-order, and returns the number of nodes visited.
///
/// When `root` does not name a node in `graph`, nothing is visited and the
/// count is 0.
pub fn walk(graph: &mut ResourceGraph, root: &NodePath, aspect: &mut dyn Aspect) -> usize {
    if !graph.contains(root) {
        return 0;
    }

    let mut visited = 0_usize;
    let mut stack = vec![root.clone()];
    while let Some(path) = stack.pop() {
        aspect.visit(graph, &path);
        visited += 1;

        // Children are read after the visit so additions below `path` are
        // picked up. Reverse push keeps sibling order = insertion order.
        let children = graph.child_paths(&path);
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    visited
}
