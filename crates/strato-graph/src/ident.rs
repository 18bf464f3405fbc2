// SPDX-License-Identifier: Apache-2.0
//! Identifier types for resource-graph addressing.

use std::fmt;

/// Identifier for a node, unique among one parent's immediate children.
///
/// `NodeId` is a caller-chosen, human-readable label (for example the
/// construct id assigned by an upstream graph builder). Uniqueness is a
/// *sibling-level* invariant enforced by
/// [`ResourceGraph::add_child`](crate::ResourceGraph::add_child); two nodes
/// under different parents may legitimately share the same id. Global
/// addressing uses [`NodePath`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(String);

impl NodeId {
    /// Constructs a node identifier from a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Declared resource kind of a node (for example
/// `"AWS::AutoScaling::AutoScalingGroup"`).
///
/// A dedicated wrapper prevents accidental mixing of kind tags with node
/// identifiers; matching logic compares kinds, never raw strings against ids.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceKind(String);

impl ResourceKind {
    /// Constructs a resource kind from its tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the kind tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceKind {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Chain of identifiers from the graph root down to a node.
///
/// Paths are the globally unique addressing key for the whole graph: node
/// ids are only sibling-unique, so every store lookup and every parent
/// back-reference is expressed as a `NodePath`. Paths order lexicographically
/// by segment, which keeps `BTreeMap<NodePath, _>` storage deterministic.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodePath(Vec<NodeId>);

impl NodePath {
    /// Constructs the path of a root node.
    #[must_use]
    pub fn root(id: NodeId) -> Self {
        Self(vec![id])
    }

    /// Returns the path obtained by descending into child `id`.
    #[must_use]
    pub fn child(&self, id: NodeId) -> Self {
        let mut segments = self.0.clone();
        segments.push(id);
        Self(segments)
    }

    /// Returns the parent path, or `None` for a root path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Returns the final segment: the node's own identifier.
    ///
    /// A path always has at least one segment, so this never fails.
    #[must_use]
    pub fn last(&self) -> &NodeId {
        // Invariant: constructed paths are never empty.
        debug_assert!(!self.0.is_empty());
        &self.0[self.0.len() - 1]
    }

    /// Returns the path segments from root to node.
    #[must_use]
    pub fn segments(&self) -> &[NodeId] {
        &self.0
    }

    /// Returns the number of segments (depth + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the path has no segments.
    ///
    /// Constructed paths always have at least one segment; this exists for
    /// API completeness alongside [`NodePath::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}
