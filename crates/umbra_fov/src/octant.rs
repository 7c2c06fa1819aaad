//! Octant transforms
//!
//! Each octant is scanned in a local frame where depth runs along `dy < 0`
//! and the column offset `dx` runs from `dy` up to `0`. The transform maps
//! that frame onto grid axes.

/// Axis transform for one octant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Octant {
    pub xx: i32,
    pub xy: i32,
    pub yx: i32,
    pub yy: i32,
}

/// The eight octants, in scan order
pub const OCTANTS: [Octant; 8] = [
    Octant::new(0, -1, -1, 0),
    Octant::new(-1, 0, 0, -1),
    Octant::new(0, 1, -1, 0),
    Octant::new(1, 0, 0, -1),
    Octant::new(0, -1, 1, 0),
    Octant::new(-1, 0, 0, 1),
    Octant::new(0, 1, 1, 0),
    Octant::new(1, 0, 0, 1),
];

impl Octant {
    /// Create a transform from its four coefficients
    pub const fn new(xx: i32, xy: i32, yx: i32, yy: i32) -> Self {
        Self { xx, xy, yx, yy }
    }

    /// Map a local `(dx, dy)` offset to absolute grid coordinates
    ///
    /// Wraps on `i32` overflow, so origins near the integer limits never
    /// panic; clipping to a real map is the caller's job.
    #[inline]
    pub fn to_grid(&self, x0: i32, y0: i32, dx: i32, dy: i32) -> (i32, i32) {
        let x = x0
            .wrapping_add(dx.wrapping_mul(self.xx))
            .wrapping_add(self.xy.wrapping_mul(dy));
        let y = y0
            .wrapping_add(self.yx.wrapping_mul(dx))
            .wrapping_add(self.yy.wrapping_mul(dy));
        (x, y)
    }
}
