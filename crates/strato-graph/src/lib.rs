// SPDX-License-Identifier: Apache-2.0
//! strato-graph: in-memory resource graph and aspect traversal driver.
//!
//! A resource graph is a tree of declared infrastructure resources under
//! construction, prior to manifest synthesis. Each node carries a
//! sibling-unique identifier, a declared resource kind, a parent
//! back-reference, a string-keyed property bag of heterogeneous values, and
//! an insertion-ordered child list. Post-processing layers (see
//! `strato-spot`) locate nodes by structural identity and rewrite their
//! property bags in place; this crate supplies the data model and the
//! single-pass traversal driver they run on.
//!
//! Design constraints:
//! - **Determinism**: node storage and map-shaped values use `BTreeMap`;
//!   traversal order is pre-order with siblings in insertion order.
//! - **Single owner**: the graph is exclusively owned during construction
//!   and traversal. There is no locking; all mutation is `&mut self`.
//! - **Paths over pointers**: nodes reference their parent by [`NodePath`]
//!   into the owning arena, never by shared pointer.

mod graph;
mod ident;
mod value;
mod visit;

pub use graph::{GraphError, ResourceGraph, ResourceNode};
pub use ident::{NodeId, NodePath, ResourceKind};
pub use value::{PropBag, PropValue};
pub use visit::{walk, Aspect};
