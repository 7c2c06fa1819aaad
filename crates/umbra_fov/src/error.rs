//! Error and status types for shadowcasting

use thiserror::Error;
use umbra_memory::StackError;

/// Shadowcasting errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShadowcastError {
    /// Work stack could not be allocated; no cell was visited
    #[error("Failed to allocate work stack ({bytes} bytes)")]
    BadAlloc { bytes: usize },

    /// Work stack could not grow; cells visited so far stay visited
    #[error("Failed to grow work stack to {bytes} bytes")]
    BadRealloc { bytes: usize },

    /// Callbacks record missing or incomplete
    #[error("Bad arguments: {0}")]
    BadArguments(String),

    /// Configuration rejected before scanning
    #[error("Invalid shadowcast configuration: {0}")]
    InvalidConfig(String),
}

impl ShadowcastError {
    /// Status code reported for this error
    pub fn status(&self) -> Status {
        match self {
            ShadowcastError::BadAlloc { .. } => Status::BadAlloc,
            ShadowcastError::BadRealloc { .. } => Status::BadRealloc,
            ShadowcastError::BadArguments(_) | ShadowcastError::InvalidConfig(_) => {
                Status::BadArguments
            }
        }
    }
}

impl From<StackError> for ShadowcastError {
    fn from(e: StackError) -> Self {
        match e {
            StackError::AllocFailed { bytes } => ShadowcastError::BadAlloc { bytes },
            StackError::ReallocFailed { bytes } => ShadowcastError::BadRealloc { bytes },
            StackError::CapacityOverflow => ShadowcastError::BadRealloc { bytes: usize::MAX },
        }
    }
}

/// Result type for shadowcasting operations
pub type Result<T> = std::result::Result<T, ShadowcastError>;

/// Flat outcome of a cast, for callers that only need a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// Scan completed
    Ok = 0,
    /// Work stack allocation failed before scanning
    BadAlloc = 1,
    /// Work stack growth failed mid-scan
    BadRealloc = 2,
    /// Callbacks or configuration rejected
    BadArguments = 3,
}

impl Status {
    /// Collapse a cast result into its status
    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        }
    }

    /// Check for successful completion
    pub fn is_ok(&self) -> bool {
        *self == Status::Ok
    }

    /// Numeric status code
    pub fn code(&self) -> u8 {
        *self as u8
    }
}
