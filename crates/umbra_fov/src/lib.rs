//! Umbra FOV - Octant Shadowcasting
//!
//! Computes the cells visible from an origin on an integer grid, out to a
//! radius, where some cells absorb sight and shade the cells behind them.
//! The grid itself stays with the caller: the scan only reports visible
//! cells and asks which of them absorb.
//!
//! # Features
//!
//! - Eight-octant slope scan with integer slope bounds
//! - Explicit heap work stack instead of recursion
//! - Pluggable allocation through `umbra_memory::Allocator`
//! - Allocation failure reported as an error, never an abort
//!
//! # Architecture
//!
//! ```text
//!   Shadowcaster::cast
//!          │  update(origin)
//!          ▼
//!   ┌─────────────┐   reset + seed    ┌──────────────┐
//!   │ 8 × Octant  │ ────────────────▶ │  WorkStack   │
//!   └─────────────┘                   └──────────────┘
//!          │                            ▲        │
//!          ▼                    push    │        │ pop
//!   ┌─────────────┐  continuations      │        ▼
//!   │ scan_octant │ ────────────────────┘   ScanState
//!   └─────────────┘
//!          │ update / absorb
//!          ▼
//!     Visibility (caller)
//! ```
//!
//! # Example
//!
//! ```
//! use umbra_fov::prelude::*;
//!
//! let walls = [(2, 0), (2, 1)];
//! let mut lit = Vec::new();
//! let mut vis = from_fns(|x, y| lit.push((x, y)), |x, y| walls.contains(&(x, y)));
//!
//! shadowcast(0, 0, 4, &mut vis).unwrap();
//! drop(vis);
//! assert_eq!(lit[0], (0, 0));
//! ```

pub mod caster;
pub mod config;
pub mod error;
pub mod octant;
pub mod scan;
pub mod visibility;

pub mod prelude {
    //! Common imports for field-of-view computation
    pub use crate::caster::{shadowcast, Shadowcaster};
    pub use crate::config::ShadowcastConfig;
    pub use crate::error::{Result, ShadowcastError, Status};
    pub use crate::octant::{Octant, OCTANTS};
    pub use crate::scan::{PassStats, ScanState};
    pub use crate::visibility::{
        from_fns, AbsorbFn, BoundCallbacks, Callbacks, FnVisibility, UpdateFn, Visibility,
    };
    pub use umbra_memory::{Allocator, SystemAllocator, TrackingAllocator};
}

pub use prelude::*;
