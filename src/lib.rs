//! Mutable arbitrary-precision integers.
//!
//! A [`BigInt`] keeps its sign, length and magnitude in one flat, reusable
//! buffer of `u32` words and mutates that buffer in place whenever the result
//! fits. Arithmetic covers ripple-carry addition and subtraction, schoolbook,
//! Karatsuba and parallel Karatsuba multiplication, Knuth long division,
//! infinite-precision two's-complement bit operations and fast decimal
//! conversion.

pub mod bigint;
pub mod config;
pub mod error;
pub mod pool;

pub use bigint::{BigInt, Endian, MulStrategy};
pub use config::MulThresholds;
pub use error::Error;
pub use pool::WorkerPool;
