// SPDX-License-Identifier: Apache-2.0
//! Caller-facing rewrite configuration and its fail-fast validation.
//!
//! Misconfiguration is a programming error, not a runtime condition: an
//! allocation strategy outside the closed enumeration or a max price that
//! is not a positive decimal is rejected here, at construction time, before
//! any traversal begins.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when rewrite configuration is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The supplied allocation-strategy string is not one of the closed
    /// enumeration's wire values.
    #[error("unknown spot allocation strategy: {0:?}")]
    UnknownAllocationStrategy(String),
    /// The supplied max price does not parse as a finite decimal > 0.
    #[error("invalid spot max price: {0:?}")]
    InvalidMaxPrice(String),
}

/// Policy governing which interruptible-capacity pools are drawn from.
///
/// Closed enumeration; the wire values are the ones the downstream
/// synthesizer recognizes for `spotAllocationStrategy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocationStrategy {
    /// Draw from the cheapest pools first.
    LowestPrice,
    /// Draw from the pools with the most spare capacity (default).
    #[default]
    CapacityOptimized,
    /// Capacity-optimized, honoring the override list's priority order.
    CapacityOptimizedPrioritized,
}

impl AllocationStrategy {
    /// Returns the wire value emitted into the synthesized configuration.
    #[must_use]
    pub fn as_wire_str(self) -> &'static str {
        match self {
            Self::LowestPrice => "lowest-price",
            Self::CapacityOptimized => "capacity-optimized",
            Self::CapacityOptimizedPrioritized => "capacity-optimized-prioritized",
        }
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for AllocationStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowest-price" => Ok(Self::LowestPrice),
            "capacity-optimized" => Ok(Self::CapacityOptimized),
            "capacity-optimized-prioritized" => Ok(Self::CapacityOptimizedPrioritized),
            other => Err(ConfigError::UnknownAllocationStrategy(other.to_owned())),
        }
    }
}

/// Validated maximum spot price, preserved verbatim.
///
/// The synthesizer consumes the price as a string, so the exact characters
/// the caller supplied are what gets emitted (`"0.0472"` stays `"0.0472"`,
/// never `"0.047200"`). Validation only establishes that the string reads
/// as a finite decimal greater than zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxPrice(String);

impl MaxPrice {
    /// Validates and wraps a max-price string.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidMaxPrice`] when the string does not
    /// parse as a finite decimal greater than zero.
    pub fn new(price: impl Into<String>) -> Result<Self, ConfigError> {
        let price = price.into();
        match price.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(Self(price)),
            _ => Err(ConfigError::InvalidMaxPrice(price)),
        }
    }

    /// Returns the verbatim price string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaxPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Configuration for one spot-capacity rewrite pass.
///
/// `max_price` absent means "use the on-demand price as the ceiling" — a
/// downstream default this component neither computes nor emits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpotOptions {
    max_price: Option<MaxPrice>,
    allocation_strategy: AllocationStrategy,
}

impl SpotOptions {
    /// Returns the default options: capacity-optimized, no price ceiling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum spot price.
    #[must_use]
    pub fn with_max_price(mut self, price: MaxPrice) -> Self {
        self.max_price = Some(price);
        self
    }

    /// Sets the allocation strategy.
    #[must_use]
    pub fn with_allocation_strategy(mut self, strategy: AllocationStrategy) -> Self {
        self.allocation_strategy = strategy;
        self
    }

    /// Returns the configured max price (if any).
    #[must_use]
    pub fn max_price(&self) -> Option<&MaxPrice> {
        self.max_price.as_ref()
    }

    /// Returns the configured allocation strategy.
    #[must_use]
    pub fn allocation_strategy(&self) -> AllocationStrategy {
        self.allocation_strategy
    }
}
