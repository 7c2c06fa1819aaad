//! Caller-side visibility hooks
//!
//! The scan never touches grid contents. It reports each visible cell through
//! `update` and asks `absorb` whether that cell blocks sight beyond itself.

use crate::error::{Result, ShadowcastError};

/// Receiver of visibility results for one cast
///
/// The implementing value is the caller's context: it owns whatever map or
/// light buffer the results are written to.
pub trait Visibility {
    /// Cell `(x, y)` is visible from the origin
    fn update(&mut self, x: i32, y: i32);

    /// Whether cell `(x, y)` blocks propagation past itself
    fn absorb(&mut self, x: i32, y: i32) -> bool;
}

impl<V: Visibility + ?Sized> Visibility for &mut V {
    #[inline]
    fn update(&mut self, x: i32, y: i32) {
        (**self).update(x, y)
    }

    #[inline]
    fn absorb(&mut self, x: i32, y: i32) -> bool {
        (**self).absorb(x, y)
    }
}

/// Visitor notified of a visible cell
pub type UpdateFn<U> = fn(i32, i32, &mut U);

/// Predicate reporting whether a cell blocks sight
pub type AbsorbFn<U> = fn(i32, i32, &mut U) -> bool;

/// Callback record paired with explicit user data at cast time
///
/// Both functions must be present; a record missing either is rejected with
/// `BadArguments` before anything is visited.
pub struct Callbacks<U> {
    pub update: Option<UpdateFn<U>>,
    pub absorb: Option<AbsorbFn<U>>,
}

impl<U> Callbacks<U> {
    /// Create a complete record
    pub const fn new(update: UpdateFn<U>, absorb: AbsorbFn<U>) -> Self {
        Self {
            update: Some(update),
            absorb: Some(absorb),
        }
    }

    /// Create a record with no functions set
    pub const fn empty() -> Self {
        Self {
            update: None,
            absorb: None,
        }
    }

    /// Attach user data, producing a `Visibility`
    pub fn bind<'u>(&self, userdata: &'u mut U) -> Result<BoundCallbacks<'u, U>> {
        let update = self.update.ok_or_else(|| {
            ShadowcastError::BadArguments("callbacks record has no update function".into())
        })?;
        let absorb = self.absorb.ok_or_else(|| {
            ShadowcastError::BadArguments("callbacks record has no absorb function".into())
        })?;

        Ok(BoundCallbacks {
            update,
            absorb,
            userdata,
        })
    }
}

impl<U> Clone for Callbacks<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for Callbacks<U> {}

impl<U> Default for Callbacks<U> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<U> core::fmt::Debug for Callbacks<U> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Callbacks")
            .field("update", &self.update.is_some())
            .field("absorb", &self.absorb.is_some())
            .finish()
    }
}

/// Callback record bound to its user data
pub struct BoundCallbacks<'u, U> {
    update: UpdateFn<U>,
    absorb: AbsorbFn<U>,
    userdata: &'u mut U,
}

impl<U> Visibility for BoundCallbacks<'_, U> {
    #[inline]
    fn update(&mut self, x: i32, y: i32) {
        (self.update)(x, y, self.userdata)
    }

    #[inline]
    fn absorb(&mut self, x: i32, y: i32) -> bool {
        (self.absorb)(x, y, self.userdata)
    }
}

/// Closure pair adapter
///
/// The two closures borrow independently, so `update` can write to one
/// buffer while `absorb` reads another.
pub struct FnVisibility<F, G> {
    update: F,
    absorb: G,
}

/// Build a `Visibility` from an update closure and an absorb closure
pub fn from_fns<F, G>(update: F, absorb: G) -> FnVisibility<F, G>
where
    F: FnMut(i32, i32),
    G: FnMut(i32, i32) -> bool,
{
    FnVisibility { update, absorb }
}

impl<F, G> Visibility for FnVisibility<F, G>
where
    F: FnMut(i32, i32),
    G: FnMut(i32, i32) -> bool,
{
    #[inline]
    fn update(&mut self, x: i32, y: i32) {
        (self.update)(x, y)
    }

    #[inline]
    fn absorb(&mut self, x: i32, y: i32) -> bool {
        (self.absorb)(x, y)
    }
}
