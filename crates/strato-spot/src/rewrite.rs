// SPDX-License-Identifier: Apache-2.0
//! The excise-and-install mutation applied to one matched node.
//!
//! `launchTemplate` and `mixedInstancesPolicy` are contractually mutually
//! exclusive in the downstream schema, so the rewrite removes the former
//! and installs the latter back to back, with no fallible operation in
//! between: no reader of the graph (a later pass, or synthesis itself)
//! ever observes a node carrying both.

use strato_graph::{GraphError, NodePath, ResourceGraph, ResourceNode};
use tracing::{debug, warn};

use crate::options::SpotOptions;
use crate::schema::{
    InstanceOverride, InstancesDistribution, LaunchTemplateSpec, MixedInstancesPolicy,
    INSTANCE_TYPE, LAUNCH_TEMPLATE, MIXED_INSTANCES_POLICY, REWRITE_MARKER_APPLIED,
    REWRITE_MARKER_KEY,
};

/// Capability of a node to offer an instance-type hint.
///
/// The matched node's parent is a loosely-shaped collaborator whose exact
/// properties are not guaranteed by contract. The probe is best effort: a
/// parent without a string `instanceType` property simply yields `None`,
/// and the rewrite degrades to emitting no per-pool overrides (the
/// template's own default instance type then applies downstream). Absence
/// is never an error.
pub trait ProvidesInstanceTypeHint {
    /// Returns the instance type this node advertises, if any.
    fn instance_type_hint(&self) -> Option<&str>;
}

impl ProvidesInstanceTypeHint for ResourceNode {
    fn instance_type_hint(&self) -> Option<&str> {
        self.prop(INSTANCE_TYPE).and_then(|v| v.as_str())
    }
}

/// Why a matched node was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The node carries no parseable launch-template reference; it is not
    /// in the expected pre-rewrite shape (possibly already rewritten).
    NoLaunchTemplate,
}

/// Result of one rewrite attempt.
///
/// A skip is a normal outcome, not a failure: repeated application of the
/// rewrite yields `Skipped` for previously mutated nodes and must never
/// abort traversal of other matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The node was mutated; carries the installed policy.
    Mutated(MixedInstancesPolicy),
    /// The node was left untouched.
    Skipped(SkipReason),
}

/// Rewrites one matched auto-scaling-group node from the fixed-price
/// launch-template shape to a spot mixed-instances policy.
///
/// Steps: read the existing template reference (absent or malformed ⇒
/// [`RewriteOutcome::Skipped`], bag untouched); derive a best-effort
/// instance-type hint from the parent; excise `launchTemplate`; install
/// the constructed policy under `mixedInstancesPolicy`; annotate the node
/// with the rewrite marker.
///
/// # Errors
/// Returns [`GraphError::NodeNotFound`] when `path` does not name a node.
/// Callers going through the traversal driver never hit this; it exists
/// for direct invocation with a stale path.
pub fn rewrite(
    graph: &mut ResourceGraph,
    path: &NodePath,
    options: &SpotOptions,
) -> Result<RewriteOutcome, GraphError> {
    let node = graph
        .node(path)
        .ok_or_else(|| GraphError::NodeNotFound(path.clone()))?;

    let Some(spec) = node.prop(LAUNCH_TEMPLATE).and_then(LaunchTemplateSpec::from_prop) else {
        warn!(
            path = %path,
            "no launch template found on node; skipping spot rewrite"
        );
        return Ok(RewriteOutcome::Skipped(SkipReason::NoLaunchTemplate));
    };

    let hint = node
        .parent()
        .and_then(|parent| graph.node(parent))
        .and_then(|parent| parent.instance_type_hint().map(str::to_owned));

    let policy = MixedInstancesPolicy {
        launch_template: spec,
        overrides: hint
            .into_iter()
            .map(|instance_type| InstanceOverride { instance_type })
            .collect(),
        distribution: InstancesDistribution {
            on_demand_percentage_above_base: 0,
            allocation_strategy: options.allocation_strategy(),
            max_price: options.max_price().cloned(),
        },
    };

    // Excise and install back to back: both keys must never coexist.
    let node = graph
        .node_mut(path)
        .ok_or_else(|| GraphError::NodeNotFound(path.clone()))?;
    node.take_prop(LAUNCH_TEMPLATE);
    node.set_prop(MIXED_INSTANCES_POLICY, policy.to_prop());
    node.annotate(REWRITE_MARKER_KEY, REWRITE_MARKER_APPLIED);

    debug!(
        path = %path,
        template_id = %policy.launch_template.template_id,
        strategy = %policy.distribution.allocation_strategy,
        "installed spot mixed-instances policy"
    );
    Ok(RewriteOutcome::Mutated(policy))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use strato_graph::{NodeId, PropValue, ResourceKind};

    #[test]
    fn hint_probe_requires_a_string_shape() {
        let (mut graph, root) =
            ResourceGraph::new(NodeId::new("Root"), ResourceKind::new("Stack"));
        let node = graph.node_mut(&root).unwrap();

        assert_eq!(node.instance_type_hint(), None, "no property, no hint");

        node.set_prop(INSTANCE_TYPE, PropValue::Int(42));
        assert_eq!(node.instance_type_hint(), None, "non-string shape, no hint");

        node.set_prop(INSTANCE_TYPE, PropValue::from("t4g.nano"));
        assert_eq!(node.instance_type_hint(), Some("t4g.nano"));
    }

    #[test]
    fn rewrite_of_a_stale_path_is_an_error() {
        let (mut graph, root) =
            ResourceGraph::new(NodeId::new("Root"), ResourceKind::new("Stack"));
        let ghost = root.child(NodeId::new("Ghost"));

        let err = rewrite(&mut graph, &ghost, &SpotOptions::new()).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(_)));
    }
}
