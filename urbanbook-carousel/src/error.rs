//! Carousel error types
//!
//! Only construction can fail. Once a controller exists, every operation
//! is total over its index space.

use thiserror::Error;

/// Rejected carousel configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A carousel needs at least one item to loop over.
    #[error("carousel requires at least one item")]
    EmptyItems,

    /// The auto-advance interval must be a positive number of milliseconds.
    #[error("auto-scroll interval must be a positive number of milliseconds")]
    ZeroInterval,

    /// The pulse scale must be a finite, positive factor.
    #[error("pulse scale must be finite and positive, got {0}")]
    InvalidScale(f32),
}

/// Result alias for carousel construction.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
