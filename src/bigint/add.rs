use crate::bigint::cmp::compare_mag;
use crate::bigint::BigInt;
use std::cmp::Ordering;

impl BigInt {
    /// `self += other`, or `self -= other` when `subtract` is set.
    ///
    /// Operands of the same effective sign accumulate magnitudes; otherwise the
    /// smaller magnitude is subtracted from the larger and the sign follows the
    /// larger one.
    pub(crate) fn add_sub(&mut self, other: &BigInt, subtract: bool) {
        let (olen, oneg) = other.len_neg();
        if olen == 0 {
            return;
        }
        let oneg = oneg != subtract;
        let (len, neg) = self.len_neg();
        if len == 0 {
            self.assign_mag(other.mag(), oneg);
            return;
        }

        if neg == oneg {
            self.uadd_val(len, neg, other.mag());
            return;
        }
        match compare_mag(self.mag(), other.mag()) {
            Ordering::Equal => self.set_to_zero(),
            Ordering::Greater => self.usub_val(len, neg, other.mag()),
            Ordering::Less => self.rsub_val(len, oneg, other.mag()),
        }
    }

    /// Adds a signed double word given as sign and magnitude.
    pub(crate) fn add_sig_u64(&mut self, neg: bool, amount: u64) {
        if amount == 0 {
            return;
        }
        let (len, sneg) = self.len_neg();
        if len == 0 {
            self.assign_sig_u64(neg, amount);
            return;
        }

        if sneg == neg {
            self.uadd_u64(len, sneg, amount);
            return;
        }
        match self.compare_mag_u64(amount) {
            Ordering::Equal => self.set_to_zero(),
            Ordering::Greater => self.usub_u64(len, sneg, amount),
            // |self| fits in 64 bits here.
            Ordering::Less => self.assign_sig_u64(neg, amount - self.low_u64()),
        }
    }

    pub fn add_u32(&mut self, amount: u32) {
        self.add_sig_u64(false, amount as u64);
    }

    pub fn add_i32(&mut self, amount: i32) {
        self.add_sig_u64(amount < 0, amount.unsigned_abs() as u64);
    }

    pub fn add_u64(&mut self, amount: u64) {
        self.add_sig_u64(false, amount);
    }

    pub fn add_i64(&mut self, amount: i64) {
        self.add_sig_u64(amount < 0, amount.unsigned_abs());
    }
}
