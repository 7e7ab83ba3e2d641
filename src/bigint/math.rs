use crate::bigint::cmp::compare_mag;
use crate::bigint::BigInt;
use std::cmp::Ordering;

/// `log10(2) * 2^64`, rounded down.
const LOG10_2: u128 = 5_553_023_288_523_357_132;

impl BigInt {
    /// Replaces a non-negative value by its integer square root, rounded down.
    pub fn sqrt(&mut self) {
        debug_assert!(!self.is_negative(), "square root of a negative number");
        let bits = self.mag_bit_length();
        if bits == 0 {
            return;
        }
        let mut n = self.clone();
        n.abs_in_place();

        // Newton from above: x0 = 2^ceil(bits / 2) >= sqrt(n)
        let mut x = BigInt::from_u32(1);
        x.shl_bits(bits.div_ceil(2) as u32);
        loop {
            let mut y = n.clone();
            y.div_rem(&x);
            y.add_sub(&x, false);
            y.shr_bits(1);
            if y >= x {
                break;
            }
            x = y;
        }
        *self = x;
    }

    /// Number of decimal digits of `|self|`; one for zero.
    pub fn precision(&self) -> u32 {
        let bits = self.mag_bit_length();
        if bits == 0 {
            return 1;
        }
        // 2^(bits-1) <= |self| < 2^bits leaves two candidates: p and p - 1
        let p = ((bits as u128 * LOG10_2) >> 64) as u32 + 1;
        let mut pow10 = BigInt::from_u32(10);
        pow10.pow_mut(p - 1);
        match compare_mag(self.mag(), pow10.mag()) {
            Ordering::Less => p - 1,
            _ => p,
        }
    }
}
