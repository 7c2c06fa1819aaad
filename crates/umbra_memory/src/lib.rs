//! # umbra_memory - Pluggable Allocation
//!
//! Allocation strategies for scan state storage:
//! - SystemAllocator: the default heap strategy
//! - TrackingAllocator: counts live blocks and injects failures
//! - GrowableStack: LIFO storage that grows through any allocator
//!
//! Allocation failure is always reported as a value, never an abort.

use core::ptr::NonNull;

pub mod error;
pub mod stack;
pub mod system;
pub mod tracker;

pub use error::StackError;
pub use stack::GrowableStack;
pub use system::SystemAllocator;
pub use tracker::TrackingAllocator;

/// Common trait for all allocation strategies
pub trait Allocator {
    /// Allocate memory with the given size and alignment
    ///
    /// Returns `None` when the request cannot be served.
    fn allocate(&self, size: usize, align: usize) -> Option<NonNull<u8>>;

    /// Resize an allocation, preserving its contents up to the smaller size
    ///
    /// On failure the original block is left untouched and still owned by
    /// the caller.
    ///
    /// # Safety
    /// `ptr` must have been returned by this allocator with `old_size` and
    /// `align`, and must not have been freed.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        align: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>>;

    /// Deallocate memory
    ///
    /// # Safety
    /// The pointer must have been allocated by this allocator with the same
    /// size and alignment.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize);
}

impl<A: Allocator + ?Sized> Allocator for &A {
    #[inline]
    fn allocate(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        (**self).allocate(size, align)
    }

    #[inline]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        align: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        (**self).reallocate(ptr, old_size, align, new_size)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        (**self).deallocate(ptr, size, align)
    }
}

/// Check if a pointer is aligned
#[inline]
pub fn is_aligned(ptr: *const u8, align: usize) -> bool {
    (ptr as usize) & (align - 1) == 0
}

/// Aligned, non-null pointer standing in for zero-sized allocations
#[inline]
pub(crate) fn dangling(align: usize) -> Option<NonNull<u8>> {
    NonNull::new(align as *mut u8)
}

pub mod prelude {
    pub use crate::{Allocator, GrowableStack, StackError, SystemAllocator, TrackingAllocator};
    pub use crate::is_aligned;
}
