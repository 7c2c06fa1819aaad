//! System allocator - the default heap strategy

use core::ptr::NonNull;
use std::alloc::{self, Layout};

use crate::{dangling, Allocator};

/// Heap allocator backed by the global allocator
///
/// Unlike `Vec`, failures surface as `None` instead of aborting the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl SystemAllocator {
    /// Create the system allocator
    pub const fn new() -> Self {
        Self
    }
}

impl Allocator for SystemAllocator {
    fn allocate(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        if size == 0 {
            return dangling(align);
        }

        let layout = Layout::from_size_align(size, align).ok()?;
        // Safety: layout has non-zero size
        NonNull::new(unsafe { alloc::alloc(layout) })
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        align: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if old_size == 0 {
            return self.allocate(new_size, align);
        }
        if new_size == 0 {
            self.deallocate(ptr, old_size, align);
            return dangling(align);
        }

        let layout = Layout::from_size_align(old_size, align).ok()?;
        // Reject sizes that would overflow isize once rounded to the alignment
        Layout::from_size_align(new_size, align).ok()?;
        NonNull::new(alloc::realloc(ptr.as_ptr(), layout, new_size))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        if size == 0 {
            return;
        }

        if let Ok(layout) = Layout::from_size_align(size, align) {
            alloc::dealloc(ptr.as_ptr(), layout);
        }
    }
}
