//! Tracking allocator - leak accounting and failure injection

use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::{Allocator, SystemAllocator};

const NEVER: usize = usize::MAX;

/// Allocator wrapper that records every request made through it
///
/// Counts live blocks and bytes so callers can assert that nothing leaked,
/// and can be armed to refuse every request after the first `n`.
pub struct TrackingAllocator<A: Allocator = SystemAllocator> {
    inner: A,
    /// Blocks handed out and not yet freed
    live_blocks: AtomicUsize,
    /// Bytes handed out and not yet freed
    live_bytes: AtomicUsize,
    /// High-water mark of `live_bytes`
    peak_bytes: AtomicUsize,
    /// Allocate and reallocate calls seen, including refused ones
    requests: AtomicUsize,
    /// Requests refused by injection
    failures: AtomicUsize,
    /// Number of requests served before injection kicks in
    fail_after: AtomicUsize,
}

impl TrackingAllocator<SystemAllocator> {
    /// Track the system allocator
    pub fn new() -> Self {
        Self::wrapping(SystemAllocator)
    }
}

impl Default for TrackingAllocator<SystemAllocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Allocator> TrackingAllocator<A> {
    /// Track an arbitrary allocator
    pub fn wrapping(inner: A) -> Self {
        Self {
            inner,
            live_blocks: AtomicUsize::new(0),
            live_bytes: AtomicUsize::new(0),
            peak_bytes: AtomicUsize::new(0),
            requests: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
            fail_after: AtomicUsize::new(NEVER),
        }
    }

    /// Serve the first `served` requests, refuse all later ones
    pub fn fail_after(self, served: usize) -> Self {
        self.fail_after.store(served, Ordering::Relaxed);
        self
    }

    /// Re-arm (or with `None`, disarm) failure injection
    ///
    /// The count is measured against all requests seen so far.
    pub fn set_fail_after(&self, served: Option<usize>) {
        self.fail_after.store(served.unwrap_or(NEVER), Ordering::Relaxed);
    }

    /// Blocks currently allocated
    pub fn outstanding(&self) -> usize {
        self.live_blocks.load(Ordering::Acquire)
    }

    /// Bytes currently allocated
    pub fn bytes_outstanding(&self) -> usize {
        self.live_bytes.load(Ordering::Acquire)
    }

    /// Largest number of bytes allocated at once
    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes.load(Ordering::Relaxed)
    }

    /// Total allocate and reallocate requests
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    /// Requests refused by failure injection
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Access the wrapped allocator
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Count a request and decide whether injection refuses it
    fn admit(&self, kind: &str, size: usize) -> bool {
        let index = self.requests.fetch_add(1, Ordering::Relaxed);
        if index >= self.fail_after.load(Ordering::Relaxed) {
            self.failures.fetch_add(1, Ordering::Relaxed);
            log::debug!("Injected {} failure for {} bytes (request {})", kind, size, index + 1);
            return false;
        }
        true
    }

    fn add_bytes(&self, size: usize) {
        let now = self.live_bytes.fetch_add(size, Ordering::AcqRel) + size;
        self.peak_bytes.fetch_max(now, Ordering::Relaxed);
    }
}

impl<A: Allocator> Allocator for TrackingAllocator<A> {
    fn allocate(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        if !self.admit("allocation", size) {
            return None;
        }

        let ptr = self.inner.allocate(size, align)?;
        self.live_blocks.fetch_add(1, Ordering::AcqRel);
        self.add_bytes(size);
        Some(ptr)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        align: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if !self.admit("reallocation", new_size) {
            return None;
        }

        let new_ptr = self.inner.reallocate(ptr, old_size, align, new_size)?;
        self.live_bytes.fetch_sub(old_size, Ordering::AcqRel);
        self.add_bytes(new_size);
        Some(new_ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        self.inner.deallocate(ptr, size, align);
        self.live_blocks.fetch_sub(1, Ordering::AcqRel);
        self.live_bytes.fetch_sub(size, Ordering::AcqRel);
    }
}
