//! Octant driver - runs the eight octant passes of one cast

use umbra_memory::{Allocator, StackError, SystemAllocator};

use crate::config::ShadowcastConfig;
use crate::error::{Result, ShadowcastError};
use crate::octant::OCTANTS;
use crate::scan::{scan_octant, PassStats, ScanState, WorkStack};
use crate::visibility::{Callbacks, Visibility};

/// Field-of-view caster
///
/// Holds the allocation strategy and stack sizing; every cast allocates its
/// own work stack from the allocator and releases it before returning.
#[derive(Debug, Clone, Default)]
pub struct Shadowcaster<A: Allocator = SystemAllocator> {
    allocator: A,
    config: ShadowcastConfig,
}

impl Shadowcaster<SystemAllocator> {
    /// Create a caster on the system heap with default sizing
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: Allocator> Shadowcaster<A> {
    /// Create a caster that allocates through `allocator`
    pub fn with_allocator(allocator: A) -> Self {
        Self {
            allocator,
            config: ShadowcastConfig::default(),
        }
    }

    /// Replace the stack sizing
    pub fn with_config(mut self, config: ShadowcastConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the allocator
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Get the configuration
    pub fn config(&self) -> &ShadowcastConfig {
        &self.config
    }

    /// Compute visibility from `(x0, y0)` out to `power`
    ///
    /// The origin is always reported first and is never asked to absorb.
    /// A `power` of 1 or less reports only the origin. On error, cells
    /// already reported are not retracted.
    pub fn cast<V>(&self, x0: i32, y0: i32, power: i32, visibility: &mut V) -> Result<()>
    where
        V: Visibility + ?Sized,
    {
        self.config.validate()?;

        let mut stack = WorkStack::with_capacity_in(self.config.initial_capacity, &self.allocator)
            .map_err(|e| {
                log::warn!("Shadowcast from ({}, {}) could not start: {}", x0, y0, e);
                ShadowcastError::from(e)
            })?
            .with_growth_factor(self.config.growth_factor);

        log::debug!("Shadowcast from ({}, {}) with power {}", x0, y0, power);

        visibility.update(x0, y0);

        match Self::run_octants(x0, y0, power, &mut stack, visibility) {
            Ok(total) => {
                log::debug!(
                    "Shadowcast from ({}, {}) done: {} cells, {} continuations, stack capacity {}",
                    x0,
                    y0,
                    total.cells_visited + 1,
                    total.continuations,
                    stack.capacity()
                );
                stack.release();
                Ok(())
            }
            Err(e) => {
                log::warn!("Shadowcast from ({}, {}) aborted: {}", x0, y0, e);
                stack.release();
                Err(e.into())
            }
        }
    }

    fn run_octants<V>(
        x0: i32,
        y0: i32,
        power: i32,
        stack: &mut WorkStack<'_, A>,
        visibility: &mut V,
    ) -> std::result::Result<PassStats, StackError>
    where
        V: Visibility + ?Sized,
    {
        let mut total = PassStats::default();

        for (index, octant) in OCTANTS.iter().enumerate() {
            stack.reset();
            stack.push(ScanState::SEED)?;
            let stats = scan_octant(x0, y0, power, octant, stack, visibility)?;

            log::trace!(
                "Octant {}: {} states, {} cells, {} continuations",
                index,
                stats.states_processed,
                stats.cells_visited,
                stats.continuations
            );
            total.merge(&stats);
        }

        Ok(total)
    }

    /// Compute visibility through a callback record and user data
    ///
    /// A missing record, or a record lacking either function, fails with
    /// `BadArguments` before any allocation or callback.
    pub fn cast_with<U>(
        &self,
        x0: i32,
        y0: i32,
        power: i32,
        callbacks: Option<&Callbacks<U>>,
        userdata: &mut U,
    ) -> Result<()> {
        let callbacks = callbacks
            .ok_or_else(|| ShadowcastError::BadArguments("callbacks record is missing".into()))?;
        let mut bound = callbacks.bind(userdata)?;
        self.cast(x0, y0, power, &mut bound)
    }
}

/// Compute visibility with the system heap and default sizing
pub fn shadowcast<V>(x0: i32, y0: i32, power: i32, visibility: &mut V) -> Result<()>
where
    V: Visibility + ?Sized,
{
    Shadowcaster::new().cast(x0, y0, power, visibility)
}
