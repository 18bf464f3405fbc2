// SPDX-License-Identifier: Apache-2.0
//! Heterogeneous property values carried by resource nodes.
//!
//! Downstream synthesizers consume property bags keyed by string with
//! semi-structured values (scalars, nested records, ordered lists). The bag
//! is a first-class enum rather than a third-party JSON value so that map
//! iteration stays deterministic (`BTreeMap`) and the core carries no
//! serializer dependency on its hot path; serde derives are feature-gated
//! for tooling layers that want them.

use std::collections::BTreeMap;

/// A node's property bag: property name to semi-structured value.
pub type PropBag = BTreeMap<String, PropValue>;

/// Semi-structured property value.
///
/// Maps use `BTreeMap` so iteration (and therefore any canonical encoding a
/// synthesizer derives from it) is deterministic. Lists preserve caller
/// order.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropValue {
    /// UTF-8 string scalar.
    Str(String),
    /// Signed integer scalar.
    Int(i64),
    /// Boolean scalar.
    Bool(bool),
    /// Ordered list of values.
    List(Vec<PropValue>),
    /// Nested record keyed by string.
    Map(BTreeMap<String, PropValue>),
}

impl PropValue {
    /// Returns the string slice when the value is [`PropValue::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer when the value is [`PropValue::Int`].
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the nested record when the value is [`PropValue::Map`].
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, PropValue>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the list when the value is [`PropValue::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(items: Vec<PropValue>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, PropValue>> for PropValue {
    fn from(map: BTreeMap<String, PropValue>) -> Self {
        Self::Map(map)
    }
}
