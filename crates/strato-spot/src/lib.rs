// SPDX-License-Identifier: Apache-2.0
//! strato-spot: post-hoc spot-capacity rewrite for resource graphs.
//!
//! Given a resource graph already built by an upstream provisioning
//! pattern, this crate locates the auto-scaling groups that pattern
//! created and swaps their fixed-price launch-template configuration for a
//! spot mixed-instances policy — without the original declarations having
//! been authored with that substitution in mind.
//!
//! Usage: construct [`SpotOptions`] (invalid configuration fails here,
//! before any traversal), wrap them in a [`SpotCapacityAspect`], and run
//! it over a subtree with [`strato_graph::walk`]:
//!
//! ```
//! use strato_graph::{walk, NodeId, PropValue, ResourceGraph, ResourceKind};
//! use strato_spot::{schema, SpotCapacityAspect, SpotOptions};
//!
//! let (mut graph, root) =
//!     ResourceGraph::new(NodeId::new("Stack"), ResourceKind::new("Stack"));
//! // ... upstream pattern builds its subtree, including the ASG ...
//! # let _asg = graph
//! #     .add_child(
//! #         &root,
//! #         NodeId::new(schema::ASG_CONSTRUCT_ID),
//! #         ResourceKind::new(schema::AUTO_SCALING_GROUP_KIND),
//! #     )
//! #     .unwrap();
//!
//! let mut aspect = SpotCapacityAspect::new(SpotOptions::new());
//! walk(&mut graph, &root, &mut aspect);
//! // graph is now ready for synthesis; aspect.records() says what changed.
//! ```
//!
//! This crate decides *how* to perform the structural substitution, never
//! *whether* spot capacity is the right call — that is caller policy,
//! expressed through [`SpotOptions`]. No cost estimation, no quota checks,
//! no I/O.

mod aspect;
mod options;
mod rewrite;
pub mod schema;

pub use aspect::{RewriteRecord, SpotCapacityAspect};
pub use options::{AllocationStrategy, ConfigError, MaxPrice, SpotOptions};
pub use rewrite::{rewrite, ProvidesInstanceTypeHint, RewriteOutcome, SkipReason};
