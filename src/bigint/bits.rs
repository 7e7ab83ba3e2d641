//! Bit operations under infinite-precision two's complement.
//!
//! A negative magnitude `m` reads, limb by limb from the bottom, as zero
//! below its lowest non-zero limb, `-m[i]` at that limb and `!m[i]` above it,
//! followed by an infinite run of ones. Nothing here materializes that
//! representation: each operation streams over the limbs with the region of
//! each operand known up front.

use crate::bigint::{BigInt, LIMB_BITS};

/// Limb index (from zero) and bit offset within the limb of bit `n`.
#[inline]
fn bit_pos(n: u32) -> (usize, u32) {
    ((n / LIMB_BITS) as usize, n % LIMB_BITS)
}

impl BigInt {
    /// Index of the lowest non-zero magnitude limb, counted from zero.
    pub(crate) fn lowest_nonzero_limb(&self) -> usize {
        self.mag().iter().position(|&l| l != 0).unwrap_or(0)
    }

    /// Limb `i` (from zero) of the two's-complement form, given the lowest
    /// non-zero limb `nz`. Limbs past the magnitude are the sign extension.
    #[inline]
    pub(crate) fn twos_limb(&self, i: usize, nz: usize) -> u32 {
        let (len, neg) = self.len_neg();
        if i >= len {
            return if neg { u32::MAX } else { 0 };
        }
        let m = self.val[i + 1];
        if !neg {
            m
        } else if i < nz {
            0
        } else if i == nz {
            m.wrapping_neg()
        } else {
            !m
        }
    }

    /// Bits in the magnitude.
    pub(crate) fn mag_bit_length(&self) -> u64 {
        let (len, _) = self.len_neg();
        if len == 0 {
            return 0;
        }
        len as u64 * LIMB_BITS as u64 - self.val[len].leading_zeros() as u64
    }

    fn mag_is_power_of_two(&self) -> bool {
        let mag = self.mag();
        match mag.split_last() {
            Some((top, rest)) => top.is_power_of_two() && rest.iter().all(|&l| l == 0),
            None => false,
        }
    }

    /// Bits in the shortest two's-complement form, excluding the sign bit.
    pub fn bit_length(&self) -> u64 {
        let bits = self.mag_bit_length();
        if self.is_negative() && self.mag_is_power_of_two() {
            bits - 1
        } else {
            bits
        }
    }

    /// Bits of the two's-complement form that differ from the sign bit.
    pub fn bit_count(&self) -> u64 {
        let ones: u64 = self.mag().iter().map(|l| l.count_ones() as u64).sum();
        match self.lowest_set_bit() {
            // popcount(m - 1) = popcount(m) + trailing_zeros(m) - 1
            Some(tz) if self.is_negative() => ones + tz - 1,
            _ => ones,
        }
    }

    /// Index of the lowest one bit, the same for `x` and `-x`. `None` for zero.
    pub fn lowest_set_bit(&self) -> Option<u64> {
        if self.is_zero() {
            return None;
        }
        let nz = self.lowest_nonzero_limb();
        Some(nz as u64 * LIMB_BITS as u64 + self.val[nz + 1].trailing_zeros() as u64)
    }

    pub fn test_bit(&self, n: u32) -> bool {
        let (len, neg) = self.len_neg();
        let (i, off) = bit_pos(n);
        let nz = if neg && i < len { self.lowest_nonzero_limb() } else { 0 };
        self.twos_limb(i, nz) >> off & 1 == 1
    }

    pub fn set_bit(&mut self, n: u32) {
        let (len, neg) = self.len_neg();
        let (i, off) = bit_pos(n);
        let (i, bit) = (i + 1, 1u32 << off);
        if neg {
            // 0 -> 1 in a negative number adds 2^n, shrinking the magnitude
            if !self.test_bit(n) {
                self.usub_at(len, true, i, bit);
            }
            return;
        }
        if i > len {
            self.reserve(len + 1, i + 1);
            self.val[len + 1..=i].fill(0);
            self.val[i] = bit;
            self.set_len(i, false);
        } else {
            self.val[i] |= bit;
        }
    }

    pub fn clear_bit(&mut self, n: u32) {
        let (len, neg) = self.len_neg();
        let (i, off) = bit_pos(n);
        let (i, bit) = (i + 1, 1u32 << off);
        if neg {
            // 1 -> 0 in a negative number subtracts 2^n, growing the magnitude
            if self.test_bit(n) {
                self.uadd_at(len, true, i, bit);
            }
            return;
        }
        if i <= len {
            self.val[i] &= !bit;
            self.trim(len, false);
        }
    }

    pub fn flip_bit(&mut self, n: u32) {
        if self.test_bit(n) {
            self.clear_bit(n);
        } else {
            self.set_bit(n);
        }
    }

    /// Arithmetic shift; a negative `n` shifts right.
    pub fn shift_left(&mut self, n: i32) {
        if n >= 0 {
            self.shl_bits(n as u32);
        } else {
            self.shr_bits(n.unsigned_abs());
        }
    }

    /// Arithmetic shift rounding toward negative infinity; a negative `n`
    /// shifts left.
    pub fn shift_right(&mut self, n: i32) {
        if n >= 0 {
            self.shr_bits(n as u32);
        } else {
            self.shl_bits(n.unsigned_abs());
        }
    }

    pub(crate) fn shl_bits(&mut self, n: u32) {
        let (len, neg) = self.len_neg();
        if len == 0 || n == 0 {
            return;
        }
        let (limbs, bits) = bit_pos(n);
        let new_len = len + limbs + 1;
        self.reserve(len + 1, new_len + 1);

        let val = &mut self.val;
        if bits == 0 {
            val.copy_within(1..=len, 1 + limbs);
            val[new_len] = 0;
        } else {
            // descending, so no source limb is overwritten before it is read
            val[new_len] = val[len] >> (LIMB_BITS - bits);
            for i in (2..=len).rev() {
                val[i + limbs] = val[i] << bits | val[i - 1] >> (LIMB_BITS - bits);
            }
            val[1 + limbs] = val[1] << bits;
        }
        val[1..=limbs].fill(0);
        self.trim(new_len, neg);
    }

    pub(crate) fn shr_bits(&mut self, n: u32) {
        let (len, neg) = self.len_neg();
        if len == 0 || n == 0 {
            return;
        }
        let (limbs, bits) = bit_pos(n);
        if limbs >= len {
            if neg {
                self.assign_i32(-1);
            } else {
                self.set_to_zero();
            }
            return;
        }

        // A negative number that loses one bits rounds down, away from zero.
        let lost = neg
            && (self.val[1..=limbs].iter().any(|&l| l != 0)
                || self.val[limbs + 1] & ((1u32 << bits) - 1) != 0);

        let new_len = len - limbs;
        let val = &mut self.val;
        if bits == 0 {
            val.copy_within(1 + limbs..=len, 1);
        } else {
            for i in 1..new_len {
                val[i] = val[i + limbs] >> bits | val[i + limbs + 1] << (LIMB_BITS - bits);
            }
            val[new_len] = val[len] >> bits;
        }
        self.trim(new_len, neg);
        if lost {
            let (len, _) = self.len_neg();
            self.uadd_at(len, true, 1, 1);
        }
    }

    /// Applies `op` limb-wise to the two's-complement forms of `self` and
    /// `other` and stores the result in `self`.
    fn bitwise(&mut self, other: &BigInt, op: impl Fn(u32, u32) -> u32) {
        let (len, neg) = self.len_neg();
        let (olen, oneg) = other.len_neg();
        let ext = |neg: bool| if neg { u32::MAX } else { 0 };
        let rneg = op(ext(neg), ext(oneg)) != 0;

        let n = len.max(olen);
        self.reserve(len + 1, n + 2);
        let nz = if neg { self.lowest_nonzero_limb() } else { 0 };
        let onz = if oneg { other.lowest_nonzero_limb() } else { 0 };

        // A negative result is turned back into a magnitude on the fly:
        // !r + 1 with the carry running upwards.
        let mut carry = true;
        for i in 0..n {
            let mut r = op(self.twos_limb(i, nz), other.twos_limb(i, onz));
            if rneg {
                let (s, c) = (!r).overflowing_add(carry as u32);
                r = s;
                carry = c;
            }
            self.val[i + 1] = r;
        }

        if rneg && carry {
            // every limb was zero: the value is -2^(32n)
            self.val[n + 1] = 1;
            self.set_len(n + 1, true);
        } else {
            self.trim(n, rneg);
        }
    }

    pub fn and(&mut self, other: &BigInt) {
        self.bitwise(other, |a, b| a & b);
    }

    pub fn or(&mut self, other: &BigInt) {
        self.bitwise(other, |a, b| a | b);
    }

    pub fn xor(&mut self, other: &BigInt) {
        self.bitwise(other, |a, b| a ^ b);
    }

    /// `self & !other`.
    pub fn and_not(&mut self, other: &BigInt) {
        self.bitwise(other, |a, b| a & !b);
    }

    /// Two's-complement not: `!x == -x - 1`.
    pub fn invert(&mut self) {
        let (len, neg) = self.len_neg();
        if neg {
            self.usub_at(len, false, 1, 1);
        } else {
            self.uadd_at(len, true, 1, 1);
        }
    }
}
