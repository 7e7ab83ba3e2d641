//! Value-encoded arbitrary-precision integers.
//!
//! A number lives in a single `Vec<u32>`:
//!
//! ```text
//! val[0]               signed length: |len| limbs, sign of the number, 0 for zero
//! val[1..=|len|]       magnitude, little-endian base 2^32, val[|len|] != 0
//! val[|len|+1..]       slack, not part of the value
//! ```
//!
//! Every operation restores the two invariants (no leading zero limb, zero is
//! encoded only as `val[0] == 0`) before returning. Mutating operations work
//! in place while the buffer is large enough and reallocate otherwise.

mod add;
mod bits;
mod cmp;
mod convert;
mod decimal;
mod div;
mod karatsuba;
mod magnitude;
mod math;
mod mul;
mod ops;
mod std;
mod sub;

use serde::{Deserialize, Serialize};

pub use self::convert::Endian;
pub use self::mul::MulStrategy;

pub(crate) use self::std::alloc;

/// Bits per limb.
pub const LIMB_BITS: u32 = 32;

/// An arbitrary-precision signed integer backed by a reusable limb buffer.
///
/// Serializes as its decimal string.
#[derive(Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BigInt {
    pub(crate) val: Vec<u32>,
}

impl BigInt {
    /// Limb count and sign (`true` when negative).
    #[inline]
    pub(crate) fn len_neg(&self) -> (usize, bool) {
        let len = self.val[0] as i32;
        (len.unsigned_abs() as usize, len < 0)
    }

    /// Stores the signed length. A zero `len` always encodes zero.
    #[inline]
    pub(crate) fn set_len(&mut self, len: usize, neg: bool) {
        let len = len as i32;
        self.val[0] = if neg { len.wrapping_neg() } else { len } as u32;
    }

    /// Drops leading zero limbs below `len` and stores the signed length.
    #[inline]
    pub(crate) fn trim(&mut self, mut len: usize, neg: bool) {
        while len > 0 && self.val[len] == 0 {
            len -= 1;
        }
        self.set_len(len, neg);
    }

    /// The live magnitude limbs.
    #[inline]
    pub(crate) fn mag(&self) -> &[u32] {
        let (len, _) = self.len_neg();
        &self.val[1..=len]
    }

    /// The low 64 bits of the magnitude.
    #[inline]
    pub(crate) fn low_u64(&self) -> u64 {
        match self.len_neg().0 {
            0 => 0,
            1 => self.val[1] as u64,
            _ => (self.val[2] as u64) << 32 | self.val[1] as u64,
        }
    }

    #[cfg(debug_assertions)]
    pub(crate) fn debug_check(&self) {
        let (len, _) = self.len_neg();
        assert!(len < self.val.len(), "length {len} exceeds buffer {}", self.val.len());
        assert!(len == 0 || self.val[len] != 0, "leading zero limb in {:?}", &self.val[..=len]);
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    pub(crate) fn debug_check(&self) {}
}
