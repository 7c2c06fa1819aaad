//! Shadowcast configuration

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShadowcastError};

/// Work stack sizing for a cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowcastConfig {
    /// Records allocated up front (default: 1)
    pub initial_capacity: usize,

    /// Capacity multiplier when the stack is full (default: 2)
    pub growth_factor: usize,
}

impl Default for ShadowcastConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1,
            growth_factor: 2,
        }
    }
}

impl ShadowcastConfig {
    /// Create a configuration that reserves room for `records` up front
    pub fn preallocated(records: usize) -> Self {
        Self {
            initial_capacity: records,
            ..Default::default()
        }
    }

    /// Set initial capacity
    pub fn with_initial_capacity(mut self, records: usize) -> Self {
        self.initial_capacity = records;
        self
    }

    /// Set growth factor
    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    /// Reject values that would stall or shrink the work stack
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(ShadowcastError::InvalidConfig(
                "initial_capacity must be at least 1".into(),
            ));
        }
        if self.growth_factor < 2 {
            return Err(ShadowcastError::InvalidConfig(format!(
                "growth_factor must be at least 2, got {}",
                self.growth_factor
            )));
        }
        Ok(())
    }
}
