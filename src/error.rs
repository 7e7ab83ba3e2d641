use thiserror::Error;

/// Errors reported by the checked entry points.
///
/// The arithmetic kernel itself never fails: capacity exhaustion is handled by
/// reallocating, and contract violations (division by zero, malformed digit
/// strings passed to the unchecked assignments) are documented preconditions.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse integer from empty string")]
    Empty,

    #[error("invalid digit {found:?} at index {index}")]
    InvalidDigit { index: usize, found: char },

    #[error("unsupported radix {0}, expected 2..=36")]
    InvalidRadix(u32),

    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),

    #[error("multiplication worker panicked: {0}")]
    WorkerPanicked(String),
}
