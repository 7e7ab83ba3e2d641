//! Division: single-limb division and Knuth's Algorithm D.
//!
//! Remainders carry the sign of the dividend and quotients truncate toward
//! zero. Division by zero is a caller bug, asserted in debug builds only.

use crate::bigint::cmp::compare_mag;
use crate::bigint::BigInt;
use std::cmp::Ordering;
use std::mem;

/// `floor((2^64 - 1) / d) - 2^32` for a divisor with its top bit set.
#[inline]
fn reciprocal(d: u32) -> u32 {
    (u64::MAX / d as u64 - (1 << 32)) as u32
}

/// Divides `u1:u0` by a normalized `d` with `u1 < d`, using the precomputed
/// reciprocal `v` instead of a hardware division.
#[inline]
fn div_2by1(u1: u32, u0: u32, d: u32, v: u32) -> (u32, u32) {
    let q = (v as u64 * u1 as u64).wrapping_add((u1 as u64 + 1) << 32 | u0 as u64);
    let mut q1 = (q >> 32) as u32;
    let q0 = q as u32;
    let mut r = u0.wrapping_sub(q1.wrapping_mul(d));
    if r > q0 {
        q1 = q1.wrapping_sub(1);
        r = r.wrapping_add(d);
    }
    if r >= d {
        q1 += 1;
        r -= d;
    }
    (q1, r)
}

/// Divides a little-endian magnitude by `d` in place and returns the
/// remainder. The quotient is not trimmed.
pub(crate) fn div_rem_limb(mag: &mut [u32], d: u32) -> u32 {
    let mut r = 0u32;
    if d & 0x8000_0000 != 0 {
        let v = reciprocal(d);
        for limb in mag.iter_mut().rev() {
            let (q, rem) = div_2by1(r, *limb, d, v);
            *limb = q;
            r = rem;
        }
    } else {
        let d = d as u64;
        for limb in mag.iter_mut().rev() {
            let num = (r as u64) << 32 | *limb as u64;
            *limb = (num / d) as u32;
            r = (num % d) as u32;
        }
    }
    r
}

/// Algorithm D main loop.
///
/// `u` is the normalized dividend with one extra top limb, `v` the normalized
/// divisor (at least two limbs, top bit set). Writes `u.len() - v.len()`
/// quotient limbs to `q` and leaves the normalized remainder in the low
/// `v.len()` limbs of `u`.
fn knuth_div(u: &mut [u32], v: &[u32], q: &mut [u32]) {
    const B: u64 = 1 << 32;
    let n = v.len();
    let m = u.len() - 1;
    let (v1, v2) = (v[n - 1] as u64, v[n - 2] as u64);

    for j in (0..=m - n).rev() {
        let num = (u[j + n] as u64) << 32 | u[j + n - 1] as u64;
        let mut qhat = num / v1;
        let mut rhat = num - qhat * v1;
        while qhat >= B || qhat * v2 > (rhat << 32 | u[j + n - 2] as u64) {
            qhat -= 1;
            rhat += v1;
            if rhat >= B {
                break;
            }
        }

        // u[j..=j+n] -= qhat * v
        let mut k: i64 = 0;
        for i in 0..n {
            let p = qhat * v[i] as u64;
            let t = u[i + j] as i64 - k - (p & 0xffff_ffff) as i64;
            u[i + j] = t as u32;
            k = (p >> 32) as i64 - (t >> 32);
        }
        let t = u[j + n] as i64 - k;
        u[j + n] = t as u32;

        q[j] = qhat as u32;
        if t < 0 {
            // qhat was one too large; add the divisor back
            q[j] = q[j].wrapping_sub(1);
            let mut c = 0u64;
            for i in 0..n {
                let s = u[i + j] as u64 + v[i] as u64 + c;
                u[i + j] = s as u32;
                c = s >> 32;
            }
            u[j + n] = u[j + n].wrapping_add(c as u32);
        }
    }
}

impl BigInt {
    /// Divides by `d` in place and returns the magnitude of the remainder,
    /// whose sign is that of the dividend.
    pub fn div_rem_u32(&mut self, d: u32) -> u32 {
        debug_assert!(d != 0, "division by zero");
        let (len, neg) = self.len_neg();
        if len == 0 {
            return 0;
        }
        let r = div_rem_limb(&mut self.val[1..=len], d);
        self.trim(len, neg);
        r
    }

    /// Signed single-word division; the remainder has the dividend's sign.
    pub fn div_rem_i32(&mut self, d: i32) -> i32 {
        let neg = self.is_negative();
        let r = self.div_rem_u32(d.unsigned_abs()) as i32;
        if d < 0 {
            self.negate();
        }
        if neg {
            -r
        } else {
            r
        }
    }

    pub fn div_u32(&mut self, d: u32) {
        self.div_rem_u32(d);
    }

    pub fn div_i32(&mut self, d: i32) {
        self.div_rem_i32(d);
    }

    /// `|self| mod d`, leaving `self` untouched.
    pub fn rem_u32(&self, d: u32) -> u32 {
        debug_assert!(d != 0, "division by zero");
        let d = d as u64;
        self.mag()
            .iter()
            .rev()
            .fold(0u64, |r, &limb| (r << 32 | limb as u64) % d) as u32
    }

    /// Divides by `d` in place and returns the magnitude of the remainder.
    /// Divisors wider than a limb go through Algorithm D.
    pub fn div_rem_u64(&mut self, d: u64) -> u64 {
        if d >> 32 == 0 {
            return self.div_rem_u32(d as u32) as u64;
        }
        let mut q = BigInt::new();
        self.div_into(&BigInt::from_u64(d), &mut q);
        let r = self.low_u64();
        mem::swap(self, &mut q);
        r
    }

    pub fn div_rem_i64(&mut self, d: i64) -> i64 {
        let neg = self.is_negative();
        let r = self.div_rem_u64(d.unsigned_abs()) as i64;
        if d < 0 {
            self.negate();
        }
        if neg {
            -r
        } else {
            r
        }
    }

    pub fn div_u64(&mut self, d: u64) {
        self.div_rem_u64(d);
    }

    pub fn div_i64(&mut self, d: i64) {
        self.div_rem_i64(d);
    }

    /// `|self| mod d`, leaving `self` untouched.
    pub fn rem_u64(&self, d: u64) -> u64 {
        if d >> 32 == 0 {
            return self.rem_u32(d as u32) as u64;
        }
        let mut scratch = self.clone();
        scratch.div_rem_u64(d)
    }

    /// Truncating division: writes the quotient to `quotient` and leaves the
    /// remainder, with the dividend's sign, in `self`.
    pub fn div_into(&mut self, divisor: &BigInt, quotient: &mut BigInt) {
        let (n, dneg) = divisor.len_neg();
        debug_assert!(n != 0, "division by zero");
        let (m, neg) = self.len_neg();
        if m == 0 || n == 0 {
            quotient.set_to_zero();
            return;
        }
        let qneg = neg != dneg;

        if n == 1 {
            quotient.assign_mag(self.mag(), qneg);
            let r = quotient.div_rem_u32(divisor.val[1]);
            self.assign_sig_u32(neg, r);
            return;
        }
        match compare_mag(self.mag(), divisor.mag()) {
            Ordering::Less => {
                quotient.set_to_zero();
                return;
            }
            Ordering::Equal => {
                quotient.assign_sig_u32(qneg, 1);
                self.set_to_zero();
                return;
            }
            Ordering::Greater => {}
        }

        // Normalize so the divisor's top limb has its high bit set. The
        // divisor is borrowed, so it is shifted into a copy.
        let s = divisor.val[n].leading_zeros();
        let mut vn = divisor.mag().to_vec();
        shl_limbs(&mut vn, s);

        self.reserve(m + 1, m + 2);
        self.val[m + 1] = 0;
        if s > 0 {
            self.val[m + 1] = self.val[m] >> (32 - s);
            shl_limbs(&mut self.val[1..=m], s);
        }

        let qlen = m - n + 1;
        quotient.reserve(0, qlen + 1);
        knuth_div(&mut self.val[1..=m + 1], &vn, &mut quotient.val[1..=qlen]);
        quotient.trim(qlen, qneg);

        if s > 0 {
            let u = &mut self.val[1..=n + 1];
            for i in 0..n {
                u[i] = u[i] >> s | u[i + 1] << (32 - s);
            }
        }
        self.trim(n, neg);
    }

    /// Replaces `self` by the truncated quotient and returns the remainder.
    pub fn div_rem(&mut self, divisor: &BigInt) -> BigInt {
        let mut q = BigInt::with_capacity(self.limbs().saturating_sub(divisor.limbs()) + 1);
        self.div_into(divisor, &mut q);
        mem::swap(self, &mut q);
        q
    }

    /// Replaces `self` by `self - divisor * trunc(self / divisor)`.
    pub fn remainder(&mut self, divisor: &BigInt) {
        if divisor.limbs() == 1 {
            let neg = self.is_negative();
            let r = self.div_rem_u32(divisor.val[1]);
            self.assign_sig_u32(neg, r);
            return;
        }
        let mut q = BigInt::new();
        self.div_into(divisor, &mut q);
    }

    /// Replaces `self` by the non-negative remainder `self mod |m|`.
    pub fn modulo(&mut self, m: &BigInt) {
        self.remainder(m);
        if self.is_negative() {
            self.add_sub(m, m.is_negative());
        }
    }

    pub fn checked_div(&self, divisor: &BigInt) -> Option<BigInt> {
        if divisor.is_zero() {
            return None;
        }
        let mut q = self.clone();
        q.div_rem(divisor);
        Some(q)
    }

    pub fn checked_rem(&self, divisor: &BigInt) -> Option<BigInt> {
        if divisor.is_zero() {
            return None;
        }
        let mut r = self.clone();
        r.remainder(divisor);
        Some(r)
    }

    pub fn checked_mod(&self, m: &BigInt) -> Option<BigInt> {
        if m.is_zero() {
            return None;
        }
        let mut r = self.clone();
        r.modulo(m);
        Some(r)
    }
}

/// Shifts a magnitude left by `s < 32` bits, dropping the bits shifted out of
/// the top limb.
fn shl_limbs(mag: &mut [u32], s: u32) {
    if s == 0 {
        return;
    }
    for i in (1..mag.len()).rev() {
        mag[i] = mag[i] << s | mag[i - 1] >> (32 - s);
    }
    mag[0] <<= s;
}
