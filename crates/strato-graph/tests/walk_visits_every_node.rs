// SPDX-License-Identifier: Apache-2.0
//! Traversal invariant: one pass visits every node of the subtree exactly
//! once, for any tree shape, regardless of what the aspect does to the
//! visited nodes' property bags.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use strato_graph::{walk, Aspect, NodeId, NodePath, PropValue, ResourceGraph, ResourceKind};

/// Aspect that records every visited path and scribbles on the bag, to show
/// bag mutation does not perturb traversal.
struct Counter {
    seen: Vec<NodePath>,
}

impl Aspect for Counter {
    fn visit(&mut self, graph: &mut ResourceGraph, path: &NodePath) {
        self.seen.push(path.clone());
        if let Some(node) = graph.node_mut(path) {
            node.set_prop("visited", PropValue::from(true));
        }
    }
}

/// Builds a tree where node `i` (1-based) hangs under the existing node
/// chosen by `parent_picks[i - 1]` (modulo the number of nodes built so
/// far). Covers chains, stars, and everything between.
fn build_tree(parent_picks: &[usize]) -> (ResourceGraph, NodePath) {
    let (mut graph, root) = ResourceGraph::new(NodeId::new("Root"), ResourceKind::new("Stack"));
    let mut paths = vec![root.clone()];
    for (i, pick) in parent_picks.iter().enumerate() {
        let parent = paths[pick % paths.len()].clone();
        let child = graph
            .add_child(&parent, NodeId::new(format!("N{i}")), ResourceKind::new("X"))
            .unwrap();
        paths.push(child);
    }
    (graph, root)
}

proptest! {
    #[test]
    fn every_node_visited_exactly_once(parent_picks in prop::collection::vec(0_usize..512, 0..64)) {
        let (mut graph, root) = build_tree(&parent_picks);
        let expected = graph.len();

        let mut counter = Counter { seen: Vec::new() };
        let visited = walk(&mut graph, &root, &mut counter);

        prop_assert_eq!(visited, expected);
        prop_assert_eq!(counter.seen.len(), expected);

        let distinct: BTreeSet<&NodePath> = counter.seen.iter().collect();
        prop_assert_eq!(distinct.len(), expected, "no path may be visited twice");
    }
}

#[test]
fn deep_chain_does_not_recurse() {
    // 10k-deep chain: an explicit-stack driver handles this without
    // exhausting the call stack.
    let picks: Vec<usize> = (0..10_000).collect();
    let (mut graph, root) = build_tree(&picks);

    let mut counter = Counter { seen: Vec::new() };
    assert_eq!(walk(&mut graph, &root, &mut counter), 10_001);
}
