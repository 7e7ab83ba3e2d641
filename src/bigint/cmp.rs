use crate::bigint::BigInt;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Compares two trimmed magnitudes.
pub(crate) fn compare_mag(a: &[u32], b: &[u32]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

impl BigInt {
    /// Compares absolute values.
    pub fn compare_to_abs(&self, other: &BigInt) -> Ordering {
        compare_mag(self.mag(), other.mag())
    }

    /// Compares `|self|` with an unsigned double word.
    pub(crate) fn compare_mag_u64(&self, v: u64) -> Ordering {
        if self.limbs() > 2 {
            Ordering::Greater
        } else {
            self.low_u64().cmp(&v)
        }
    }

    /// Hash code folding the limbs from the top with a factor of 31, negated
    /// for negative numbers.
    pub fn hash_code(&self) -> i32 {
        let (_, neg) = self.len_neg();
        let h = self
            .mag()
            .iter()
            .rev()
            .fold(0i32, |h, &limb| h.wrapping_mul(31).wrapping_add(limb as i32));
        if neg {
            h.wrapping_neg()
        } else {
            h
        }
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.val[0] == other.val[0] && self.mag() == other.mag()
    }
}

impl Eq for BigInt {}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        let (s1, s2) = (self.sign(), other.sign());
        if s1 != s2 {
            return s1.cmp(&s2);
        }
        match s1 {
            0 => Ordering::Equal,
            1 => compare_mag(self.mag(), other.mag()),
            _ => compare_mag(other.mag(), self.mag()),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.val[0].hash(state);
        self.mag().hash(state);
    }
}
