// SPDX-License-Identifier: Apache-2.0
//! Property-bag schema shared with the downstream synthesizer.
//!
//! The rewrite core and the synthesizer evolve independently and share no
//! compile-time types; what they share is this schema — the property keys
//! the rewrite excises and installs, and the shape of the values under
//! them. Every key lives here as a named constant (never as a string
//! literal at a use site) so the contract has exactly one definition, and
//! the test suite asserts against these same constants.
//!
//! [`SCHEMA_VERSION`] is bumped whenever a key or value shape changes;
//! tooling that inspects rewritten graphs can pin against it.

use std::collections::BTreeMap;

use strato_graph::PropValue;

use crate::options::{AllocationStrategy, MaxPrice};

/// Version of the excise/install contract described by this module.
pub const SCHEMA_VERSION: u32 = 1;

/// ASG property holding the plain launch-template reference
/// (the pre-rewrite shape; mutually exclusive with
/// [`MIXED_INSTANCES_POLICY`]).
pub const LAUNCH_TEMPLATE: &str = "launchTemplate";
/// ASG property holding the mixed-instances policy (the post-rewrite
/// shape; mutually exclusive with [`LAUNCH_TEMPLATE`]).
pub const MIXED_INSTANCES_POLICY: &str = "mixedInstancesPolicy";

/// Launch-template id inside a template reference.
pub const LAUNCH_TEMPLATE_ID: &str = "launchTemplateId";
/// Launch-template version inside a template reference.
pub const VERSION: &str = "version";
/// Template reference nested inside a mixed-instances policy.
pub const LAUNCH_TEMPLATE_SPECIFICATION: &str = "launchTemplateSpecification";
/// Per-pool override list inside a mixed-instances policy.
pub const OVERRIDES: &str = "overrides";
/// Instance type, both in override entries and as the hint property probed
/// on the matched node's parent.
pub const INSTANCE_TYPE: &str = "instanceType";
/// Distribution record inside a mixed-instances policy.
pub const INSTANCES_DISTRIBUTION: &str = "instancesDistribution";
/// Steady-state share that stays on-demand (this rewrite always emits 0).
pub const ON_DEMAND_PERCENTAGE_ABOVE_BASE_CAPACITY: &str = "onDemandPercentageAboveBaseCapacity";
/// Spot allocation strategy wire key.
pub const SPOT_ALLOCATION_STRATEGY: &str = "spotAllocationStrategy";
/// Spot max price wire key (omitted entirely when no ceiling is set).
pub const SPOT_MAX_PRICE: &str = "spotMaxPrice";

/// Sibling-level identifier the upstream provisioning pattern gives the
/// auto-scaling group it creates. Identifier-based matching keys on this;
/// unrelated auto-scaling groups in the same graph use other ids and are
/// never touched.
pub const ASG_CONSTRUCT_ID: &str = "ASG";
/// Resource kind tag of an auto-scaling group declaration.
pub const AUTO_SCALING_GROUP_KIND: &str = "AWS::AutoScaling::AutoScalingGroup";

/// Metadata key marking a node this rewrite has mutated.
pub const REWRITE_MARKER_KEY: &str = "strato:spot-capacity";
/// Metadata value stored under [`REWRITE_MARKER_KEY`].
pub const REWRITE_MARKER_APPLIED: &str = "applied";

/// Launch-template reference: template id plus version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTemplateSpec {
    /// Launch-template identifier.
    pub template_id: String,
    /// Launch-template version.
    pub version: String,
}

impl LaunchTemplateSpec {
    /// Parses a template reference out of a property value.
    ///
    /// Returns `None` when the value is not a record carrying string
    /// [`LAUNCH_TEMPLATE_ID`] and [`VERSION`] entries. A malformed fragment
    /// reads the same as an absent one: the node is not in the expected
    /// pre-rewrite shape.
    #[must_use]
    pub fn from_prop(value: &PropValue) -> Option<Self> {
        let record = value.as_map()?;
        let template_id = record.get(LAUNCH_TEMPLATE_ID)?.as_str()?.to_owned();
        let version = record.get(VERSION)?.as_str()?.to_owned();
        Some(Self {
            template_id,
            version,
        })
    }

    /// Emits the template reference in its wire shape.
    #[must_use]
    pub fn to_prop(&self) -> PropValue {
        let mut record = BTreeMap::new();
        record.insert(
            LAUNCH_TEMPLATE_ID.to_owned(),
            PropValue::Str(self.template_id.clone()),
        );
        record.insert(VERSION.to_owned(), PropValue::Str(self.version.clone()));
        PropValue::Map(record)
    }
}

/// One per-pool override entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceOverride {
    /// Instance type this pool provisions.
    pub instance_type: String,
}

/// How capacity is split between on-demand and spot pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstancesDistribution {
    /// Percentage of above-baseline capacity that stays on-demand.
    /// This rewrite always emits 0 (fully interruptible fleet).
    pub on_demand_percentage_above_base: u8,
    /// Pool-selection strategy.
    pub allocation_strategy: AllocationStrategy,
    /// Optional price ceiling; `None` leaves the key out entirely and the
    /// provider defaults to the on-demand price.
    pub max_price: Option<MaxPrice>,
}

/// The post-rewrite provisioning shape installed under
/// [`MIXED_INSTANCES_POLICY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedInstancesPolicy {
    /// Template reference carried over from the excised fragment.
    pub launch_template: LaunchTemplateSpec,
    /// Per-pool overrides; empty means "use the template's own default
    /// instance type" and the key is omitted from the wire shape.
    pub overrides: Vec<InstanceOverride>,
    /// Capacity distribution.
    pub distribution: InstancesDistribution,
}

impl MixedInstancesPolicy {
    /// Emits the policy in its wire shape.
    ///
    /// Optional pieces (`overrides`, `spotMaxPrice`) are omitted rather
    /// than emitted empty, matching what the synthesizer expects.
    #[must_use]
    pub fn to_prop(&self) -> PropValue {
        let mut launch_template = BTreeMap::new();
        launch_template.insert(
            LAUNCH_TEMPLATE_SPECIFICATION.to_owned(),
            self.launch_template.to_prop(),
        );
        if !self.overrides.is_empty() {
            let entries = self
                .overrides
                .iter()
                .map(|o| {
                    let mut entry = BTreeMap::new();
                    entry.insert(
                        INSTANCE_TYPE.to_owned(),
                        PropValue::Str(o.instance_type.clone()),
                    );
                    PropValue::Map(entry)
                })
                .collect();
            launch_template.insert(OVERRIDES.to_owned(), PropValue::List(entries));
        }

        let mut distribution = BTreeMap::new();
        distribution.insert(
            ON_DEMAND_PERCENTAGE_ABOVE_BASE_CAPACITY.to_owned(),
            PropValue::Int(i64::from(self.distribution.on_demand_percentage_above_base)),
        );
        distribution.insert(
            SPOT_ALLOCATION_STRATEGY.to_owned(),
            PropValue::Str(self.distribution.allocation_strategy.as_wire_str().to_owned()),
        );
        if let Some(price) = &self.distribution.max_price {
            distribution.insert(
                SPOT_MAX_PRICE.to_owned(),
                PropValue::Str(price.as_str().to_owned()),
            );
        }

        let mut policy = BTreeMap::new();
        policy.insert(LAUNCH_TEMPLATE.to_owned(), PropValue::Map(launch_template));
        policy.insert(
            INSTANCES_DISTRIBUTION.to_owned(),
            PropValue::Map(distribution),
        );
        PropValue::Map(policy)
    }
}
