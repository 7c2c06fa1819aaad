//! Growable stack - LIFO storage over a pluggable allocator

use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use crate::error::{Result, StackError};
use crate::{is_aligned, Allocator, SystemAllocator};

/// Default capacity multiplier applied when the stack is full
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Contiguous LIFO stack of `Copy` records
///
/// Storage comes from the borrowed allocator and grows geometrically, so
/// pushes are amortized O(1). Unlike `Vec`, running out of memory is a
/// reported error: a failed growth leaves the existing records untouched.
pub struct GrowableStack<'a, T: Copy, A: Allocator + ?Sized = SystemAllocator> {
    /// Backing buffer (dangling while `capacity == 0`)
    ptr: NonNull<T>,
    /// Records the buffer can hold
    capacity: usize,
    /// Records currently stored
    len: usize,
    /// Capacity multiplier on overflow
    growth_factor: usize,
    allocator: &'a A,
    _marker: PhantomData<T>,
}

impl<'a, T: Copy, A: Allocator + ?Sized> GrowableStack<'a, T, A> {
    const ELEM_SIZE: usize = mem::size_of::<T>();
    const ELEM_ALIGN: usize = mem::align_of::<T>();

    /// Create a stack with room for `capacity` records
    ///
    /// A capacity of zero is raised to one so the buffer always exists after
    /// construction.
    pub fn with_capacity_in(capacity: usize, allocator: &'a A) -> Result<Self> {
        let capacity = capacity.max(1);
        let bytes = Self::bytes_for(capacity)?;
        let ptr = allocator
            .allocate(bytes, Self::ELEM_ALIGN)
            .ok_or(StackError::AllocFailed { bytes })?;
        debug_assert!(is_aligned(ptr.as_ptr(), Self::ELEM_ALIGN));

        Ok(Self {
            ptr: ptr.cast(),
            capacity,
            len: 0,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            allocator,
            _marker: PhantomData,
        })
    }

    /// Set the capacity multiplier, clamped to at least 2
    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor.max(DEFAULT_GROWTH_FACTOR);
        self
    }

    /// Push a record, growing the buffer when full
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.len == self.capacity {
            self.grow()?;
        }

        // Safety: len < capacity after growth
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Remove and return the most recently pushed record
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // Safety: slot `len` was initialized by a previous push
        Some(unsafe { self.ptr.as_ptr().add(self.len).read() })
    }

    /// Forget all records, keeping the buffer for reuse
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Return the buffer to the allocator
    ///
    /// Safe to call more than once; a later push allocates a fresh buffer.
    pub fn release(&mut self) {
        if self.capacity > 0 {
            let bytes = self.capacity * Self::ELEM_SIZE;
            // Safety: ptr was produced by this allocator with this size
            unsafe {
                self.allocator
                    .deallocate(self.ptr.cast(), bytes, Self::ELEM_ALIGN);
            }
        }

        self.ptr = NonNull::dangling();
        self.capacity = 0;
        self.len = 0;
    }

    /// Number of records stored
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the stack holds no records
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Records the current buffer can hold without growing
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Capacity multiplier applied on overflow
    #[inline]
    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// View the stored records, bottom first
    pub fn as_slice(&self) -> &[T] {
        // Safety: the first `len` slots are initialized; a dangling pointer
        // is valid for an empty slice
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    fn grow(&mut self) -> Result<()> {
        if self.capacity == 0 {
            let bytes = Self::bytes_for(1)?;
            let ptr = self
                .allocator
                .allocate(bytes, Self::ELEM_ALIGN)
                .ok_or(StackError::AllocFailed { bytes })?;
            debug_assert!(is_aligned(ptr.as_ptr(), Self::ELEM_ALIGN));
            self.ptr = ptr.cast();
            self.capacity = 1;
            return Ok(());
        }

        let new_capacity = self
            .capacity
            .checked_mul(self.growth_factor)
            .ok_or(StackError::CapacityOverflow)?;
        let old_bytes = self.capacity * Self::ELEM_SIZE;
        let new_bytes = Self::bytes_for(new_capacity)?;

        // Safety: ptr/old_bytes describe the live buffer
        let ptr = unsafe {
            self.allocator
                .reallocate(self.ptr.cast(), old_bytes, Self::ELEM_ALIGN, new_bytes)
        }
        .ok_or(StackError::ReallocFailed { bytes: new_bytes })?;
        debug_assert!(is_aligned(ptr.as_ptr(), Self::ELEM_ALIGN));

        log::trace!(
            "Grew stack from {} to {} records ({} bytes)",
            self.capacity,
            new_capacity,
            new_bytes
        );

        self.ptr = ptr.cast();
        self.capacity = new_capacity;
        Ok(())
    }

    fn bytes_for(capacity: usize) -> Result<usize> {
        let bytes = capacity
            .checked_mul(Self::ELEM_SIZE)
            .ok_or(StackError::CapacityOverflow)?;
        if bytes > isize::MAX as usize {
            return Err(StackError::CapacityOverflow);
        }
        Ok(bytes)
    }
}

impl<T: Copy, A: Allocator + ?Sized> Drop for GrowableStack<'_, T, A> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: Copy + core::fmt::Debug, A: Allocator + ?Sized> core::fmt::Debug
    for GrowableStack<'_, T, A>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GrowableStack")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("records", &self.as_slice())
            .finish()
    }
}
