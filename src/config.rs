use serde::{Deserialize, Serialize};

/// Size thresholds steering [`BigInt::mul_with`](crate::BigInt::mul_with)
/// between schoolbook, Karatsuba and parallel Karatsuba multiplication.
///
/// All lengths are in 32-bit limbs. The defaults are starting points, they
/// should be re-measured on the target machine (see `benches/mul.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MulThresholds {
    /// Both operands must have at least this many limbs for Karatsuba.
    pub karatsuba_x: usize,
    /// The product of the operand lengths must reach this for Karatsuba.
    pub karatsuba_product: usize,
    /// Karatsuba recursion falls back to schoolbook at or below this length.
    pub karatsuba_base: usize,
    /// Both operands must have at least this many limbs to fork workers.
    pub parallel_x: usize,
    /// Number of recursion levels that may fork; deeper levels run inline.
    pub parallel_depth: u32,
}

impl MulThresholds {
    pub const DEFAULT: MulThresholds = MulThresholds {
        karatsuba_x: 84,
        karatsuba_product: 1_000_000,
        karatsuba_base: 32,
        parallel_x: 20_000,
        parallel_depth: 3,
    };

    // A base below 4 would stop the recursion from shrinking the operands.
    pub(crate) fn base(&self) -> usize {
        self.karatsuba_base.max(4)
    }
}

impl Default for MulThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}
