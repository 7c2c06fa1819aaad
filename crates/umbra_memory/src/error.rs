//! Error types for allocator-backed storage

use thiserror::Error;

/// Work stack allocation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    /// Initial (or post-release) buffer allocation failed
    #[error("Failed to allocate {bytes} bytes of stack storage")]
    AllocFailed { bytes: usize },

    /// Growing an existing buffer failed; previous contents are intact
    #[error("Failed to grow stack storage to {bytes} bytes")]
    ReallocFailed { bytes: usize },

    /// Requested capacity does not fit in the address space
    #[error("Stack capacity overflow")]
    CapacityOverflow,
}

/// Result type for stack operations
pub type Result<T> = std::result::Result<T, StackError>;
