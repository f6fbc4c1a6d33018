pub mod error;
pub mod math;
pub mod types;

pub mod normalize;
pub mod record;

pub mod forensics;
pub mod metrics;

pub mod analysis;
pub mod config;
pub mod repository;
pub mod verdict;

pub use error::UnderwriterError;
pub use types::*;

/// Standard result type for all underwriting operations
pub type UnderwriterResult<T> = Result<T, UnderwriterError>;
