// SPDX-License-Identifier: Apache-2.0
//! In-memory resource graph: the arena owning every declared resource node.
//!
//! The graph is a tree of resource declarations under construction, owned
//! exclusively by the building process until it is handed to a synthesizer.
//! Nodes are stored flat in a `BTreeMap` keyed by [`NodePath`], so ownership
//! lives in the arena and parent "back-references" are plain paths rather
//! than shared pointers. Child order is insertion order and is preserved
//! independently of map ordering.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::ident::{NodeId, NodePath, ResourceKind};
use crate::value::{PropBag, PropValue};

/// Error returned by graph mutation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The referenced path does not name a node in this graph.
    #[error("node not found: {0}")]
    NodeNotFound(NodePath),
    /// The parent already has an immediate child with this identifier.
    #[error("duplicate child id {id} under {parent}")]
    DuplicateChildId {
        /// Parent whose child list already contains the identifier.
        parent: NodePath,
        /// The colliding identifier.
        id: NodeId,
    },
}

/// A single resource declaration in the graph.
///
/// Holds the node's identifier, declared kind, a non-owning back-reference
/// to its parent (as a path into the owning [`ResourceGraph`]), the settable
/// property bag consumed by synthesis, free-form metadata annotations, and
/// the insertion-ordered list of child identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceNode {
    id: NodeId,
    kind: ResourceKind,
    parent: Option<NodePath>,
    props: PropBag,
    metadata: BTreeMap<String, String>,
    children: Vec<NodeId>,
}

impl ResourceNode {
    fn new(id: NodeId, kind: ResourceKind, parent: Option<NodePath>) -> Self {
        Self {
            id,
            kind,
            parent,
            props: PropBag::new(),
            metadata: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Returns the node's identifier (unique among its siblings only).
    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the node's declared resource kind.
    #[must_use]
    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    /// Returns the parent path, or `None` for the root node.
    #[must_use]
    pub fn parent(&self) -> Option<&NodePath> {
        self.parent.as_ref()
    }

    /// Returns the property bag.
    #[must_use]
    pub fn props(&self) -> &PropBag {
        &self.props
    }

    /// Returns the property stored under `key` (if any).
    #[must_use]
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    /// Sets the property `key`, replacing any previous value.
    pub fn set_prop(&mut self, key: impl Into<String>, value: PropValue) {
        self.props.insert(key.into(), value);
    }

    /// Removes and returns the property stored under `key`.
    pub fn take_prop(&mut self, key: &str) -> Option<PropValue> {
        self.props.remove(key)
    }

    /// Attaches a metadata annotation under `key`.
    ///
    /// Annotations are discoverable key/value markers outside the property
    /// bag; synthesis ignores them, tooling reads them.
    pub fn annotate(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Returns the metadata annotation stored under `key` (if any).
    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Returns the child identifiers in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena owning every node of one resource graph.
///
/// The graph is single-owner for the duration of construction and
/// traversal; there is no interior locking. All mutation goes through
/// `&mut self`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceGraph {
    root: NodePath,
    nodes: BTreeMap<NodePath, ResourceNode>,
}

impl ResourceGraph {
    /// Creates a graph containing only a root node; returns the graph and
    /// the root's path.
    #[must_use]
    pub fn new(root_id: NodeId, kind: ResourceKind) -> (Self, NodePath) {
        let root = NodePath::root(root_id.clone());
        let mut nodes = BTreeMap::new();
        nodes.insert(root.clone(), ResourceNode::new(root_id, kind, None));
        (
            Self {
                root: root.clone(),
                nodes,
            },
            root,
        )
    }

    /// Returns the root path.
    #[must_use]
    pub fn root(&self) -> &NodePath {
        &self.root
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the graph has no nodes.
    ///
    /// A constructed graph always contains its root; this exists for API
    /// completeness alongside [`ResourceGraph::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` when `path` names a node in this graph.
    #[must_use]
    pub fn contains(&self, path: &NodePath) -> bool {
        self.nodes.contains_key(path)
    }

    /// Returns a shared reference to the node at `path` when it exists.
    #[must_use]
    pub fn node(&self, path: &NodePath) -> Option<&ResourceNode> {
        self.nodes.get(path)
    }

    /// Returns a mutable reference to the node at `path` when it exists.
    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut ResourceNode> {
        self.nodes.get_mut(path)
    }

    /// Adds a child node under `parent` and returns the child's path.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] when `parent` does not name a
    /// node, and [`GraphError::DuplicateChildId`] when the parent already
    /// has an immediate child with identifier `id` (ids are sibling-unique
    /// by construction; the same id under a different parent is fine).
    pub fn add_child(
        &mut self,
        parent: &NodePath,
        id: NodeId,
        kind: ResourceKind,
    ) -> Result<NodePath, GraphError> {
        let parent_node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| GraphError::NodeNotFound(parent.clone()))?;
        if parent_node.children.contains(&id) {
            return Err(GraphError::DuplicateChildId {
                parent: parent.clone(),
                id,
            });
        }
        parent_node.children.push(id.clone());

        let path = parent.child(id.clone());
        let node = ResourceNode::new(id, kind, Some(parent.clone()));
        self.nodes.insert(path.clone(), node);
        Ok(path)
    }

    /// Returns the paths of the node's immediate children in insertion
    /// order, or an empty vector when `path` does not name a node.
    #[must_use]
    pub fn child_paths(&self, path: &NodePath) -> Vec<NodePath> {
        self.nodes.get(path).map_or_else(Vec::new, |node| {
            node.children
                .iter()
                .map(|id| path.child(id.clone()))
                .collect()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kind(tag: &str) -> ResourceKind {
        ResourceKind::new(tag)
    }

    #[test]
    fn add_child_enforces_sibling_unique_ids() {
        let (mut graph, root) = ResourceGraph::new(NodeId::new("Stack"), kind("Stack"));
        graph
            .add_child(&root, NodeId::new("ASG"), kind("AWS::AutoScaling::AutoScalingGroup"))
            .unwrap();

        let err = graph
            .add_child(&root, NodeId::new("ASG"), kind("AWS::AutoScaling::AutoScalingGroup"))
            .unwrap_err();
        assert!(
            matches!(err, GraphError::DuplicateChildId { .. }),
            "second ASG under the same parent must be rejected"
        );
    }

    #[test]
    fn same_id_under_different_parents_is_allowed() {
        let (mut graph, root) = ResourceGraph::new(NodeId::new("Stack"), kind("Stack"));
        let a = graph.add_child(&root, NodeId::new("ZoneA"), kind("Zone")).unwrap();
        let b = graph.add_child(&root, NodeId::new("ZoneB"), kind("Zone")).unwrap();

        let asg_a = graph.add_child(&a, NodeId::new("ASG"), kind("Asg")).unwrap();
        let asg_b = graph.add_child(&b, NodeId::new("ASG"), kind("Asg")).unwrap();

        assert_ne!(asg_a, asg_b);
        assert_eq!(graph.len(), 5);
    }

    #[test]
    fn add_child_to_missing_parent_is_an_error() {
        let (mut graph, root) = ResourceGraph::new(NodeId::new("Stack"), kind("Stack"));
        let ghost = root.child(NodeId::new("Ghost"));

        let err = graph
            .add_child(&ghost, NodeId::new("Child"), kind("X"))
            .unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(_)));
    }

    #[test]
    fn parent_back_reference_is_set() {
        let (mut graph, root) = ResourceGraph::new(NodeId::new("Stack"), kind("Stack"));
        let child = graph.add_child(&root, NodeId::new("Provider"), kind("Provider")).unwrap();

        assert_eq!(graph.node(&child).unwrap().parent(), Some(&root));
        assert_eq!(graph.node(&root).unwrap().parent(), None);
    }

    #[test]
    fn take_prop_removes_and_returns() {
        let (mut graph, root) = ResourceGraph::new(NodeId::new("Stack"), kind("Stack"));
        let node = graph.node_mut(&root).unwrap();
        node.set_prop("instanceType", PropValue::from("t4g.nano"));

        assert_eq!(
            node.take_prop("instanceType"),
            Some(PropValue::from("t4g.nano"))
        );
        assert_eq!(node.prop("instanceType"), None);
        assert_eq!(node.take_prop("instanceType"), None);
    }

    #[test]
    fn annotations_live_outside_the_property_bag() {
        let (mut graph, root) = ResourceGraph::new(NodeId::new("Stack"), kind("Stack"));
        let node = graph.node_mut(&root).unwrap();
        node.annotate("tool:marker", "applied");

        assert_eq!(node.annotation("tool:marker"), Some("applied"));
        assert!(node.props().is_empty(), "metadata must not leak into props");
    }
}
