// SPDX-License-Identifier: Apache-2.0
//! The aspect: match predicate plus per-match outcome records.
//!
//! Matching is identifier-based, not type-only. The upstream provisioning
//! pattern is the sole producer of the sentinel construct id within its
//! subtree, so `id == "ASG" && kind == auto-scaling-group` identifies
//! exactly the groups that pattern built — other auto-scaling groups in
//! the same graph carry different ids and are never touched, and an
//! unrelated node that happens to reuse the id fails the kind check.

use strato_graph::{Aspect, NodePath, ResourceGraph, ResourceNode};
use tracing::warn;

use crate::options::SpotOptions;
use crate::rewrite::{rewrite, RewriteOutcome};
use crate::schema::{ASG_CONSTRUCT_ID, AUTO_SCALING_GROUP_KIND};

/// One rewrite attempt and its outcome, in visit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRecord {
    /// Path of the matched node.
    pub path: NodePath,
    /// What the rewriter did there.
    pub outcome: RewriteOutcome,
}

/// Aspect that converts every auto-scaling group created by the upstream
/// provisioning pattern from fixed-price to spot capacity.
///
/// Register against a subtree root via [`strato_graph::walk`]. Every node
/// of the subtree is visited exactly once; each match is rewritten
/// independently, and a skip at one match never prevents rewriting the
/// others (one tree may hold several instances of the pattern, e.g. one
/// per availability zone).
#[derive(Debug, Clone)]
pub struct SpotCapacityAspect {
    options: SpotOptions,
    records: Vec<RewriteRecord>,
}

impl SpotCapacityAspect {
    /// Creates the aspect with the given rewrite configuration.
    #[must_use]
    pub fn new(options: SpotOptions) -> Self {
        Self {
            options,
            records: Vec::new(),
        }
    }

    /// Returns the per-match outcome records accumulated so far, in visit
    /// order.
    #[must_use]
    pub fn records(&self) -> &[RewriteRecord] {
        &self.records
    }

    fn is_match(node: &ResourceNode) -> bool {
        node.id().as_str() == ASG_CONSTRUCT_ID
            && node.kind().as_str() == AUTO_SCALING_GROUP_KIND
    }
}

impl Aspect for SpotCapacityAspect {
    fn visit(&mut self, graph: &mut ResourceGraph, path: &NodePath) {
        let Some(node) = graph.node(path) else {
            return;
        };
        if !Self::is_match(node) {
            return;
        }

        match rewrite(graph, path, &self.options) {
            Ok(outcome) => self.records.push(RewriteRecord {
                path: path.clone(),
                outcome,
            }),
            // Unreachable through `walk` (the path was just visited); kept
            // non-fatal so a direct caller's stale path cannot end the pass.
            Err(err) => warn!(path = %path, error = %err, "spot rewrite failed"),
        }
    }
}
