//! In-place magnitude arithmetic: grow or shrink `|self|` by a word, a double
//! word or another magnitude, leaving the sign to the caller.

use crate::bigint::BigInt;

/// `a + b + carry`, with the carry out.
#[inline]
pub(crate) fn adc(a: u32, b: u32, carry: bool) -> (u32, bool) {
    let (s, c1) = a.overflowing_add(b);
    let (s, c2) = s.overflowing_add(carry as u32);
    (s, c1 | c2)
}

/// `a - b - borrow`, with the borrow out.
#[inline]
pub(crate) fn sbb(a: u32, b: u32, borrow: bool) -> (u32, bool) {
    let (d, b1) = a.overflowing_sub(b);
    let (d, b2) = d.overflowing_sub(borrow as u32);
    (d, b1 | b2)
}

impl BigInt {
    /// Adds one at limb `i` and ripples the carry through a magnitude of `len`
    /// limbs, growing it by one limb if the carry leaves the top. Returns the
    /// new length. Requires `i <= len + 1`.
    pub(crate) fn carry_from(&mut self, mut i: usize, len: usize) -> usize {
        while i <= len {
            self.val[i] = self.val[i].wrapping_add(1);
            if self.val[i] != 0 {
                return len;
            }
            i += 1;
        }
        self.reserve(len + 1, len + 2);
        self.val[len + 1] = 1;
        len + 1
    }

    /// Subtracts one at limb `i`, rippling the borrow upwards. The magnitude
    /// above `i` must be large enough to absorb it.
    pub(crate) fn borrow_from(&mut self, mut i: usize) {
        while self.val[i] == 0 {
            self.val[i] = u32::MAX;
            i += 1;
        }
        self.val[i] -= 1;
    }

    /// `|self| += word << 32 * (at - 1)`.
    pub(crate) fn uadd_at(&mut self, mut len: usize, neg: bool, at: usize, word: u32) {
        if at > len {
            self.reserve(len + 1, at + 1);
            self.val[len + 1..=at].fill(0);
            len = at;
        }
        let (s, carry) = self.val[at].overflowing_add(word);
        self.val[at] = s;
        if carry {
            len = self.carry_from(at + 1, len);
        }
        self.set_len(len, neg);
    }

    /// `|self| -= word << 32 * (at - 1)`. The magnitude must not drop below
    /// zero.
    pub(crate) fn usub_at(&mut self, len: usize, neg: bool, at: usize, word: u32) {
        let (d, borrow) = self.val[at].overflowing_sub(word);
        self.val[at] = d;
        if borrow {
            self.borrow_from(at + 1);
        }
        self.trim(len, neg);
    }

    /// `|self| += add`.
    pub(crate) fn uadd_u64(&mut self, mut len: usize, neg: bool, add: u64) {
        let (lo, hi) = (add as u32, (add >> 32) as u32);
        if hi == 0 {
            self.uadd_at(len, neg, 1, lo);
            return;
        }
        if len < 2 {
            self.reserve(len + 1, 3);
            self.val[len + 1..=2].fill(0);
            len = 2;
        }
        let (s, c) = adc(self.val[1], lo, false);
        self.val[1] = s;
        let (s, c) = adc(self.val[2], hi, c);
        self.val[2] = s;
        if c {
            len = self.carry_from(3, len);
        }
        self.set_len(len, neg);
    }

    /// `|self| -= sub`, with `|self| >= sub`.
    pub(crate) fn usub_u64(&mut self, len: usize, neg: bool, sub: u64) {
        let (lo, hi) = (sub as u32, (sub >> 32) as u32);
        if hi == 0 {
            self.usub_at(len, neg, 1, lo);
            return;
        }
        let (d, b) = sbb(self.val[1], lo, false);
        self.val[1] = d;
        let (d, b) = sbb(self.val[2], hi, b);
        self.val[2] = d;
        if b {
            self.borrow_from(3);
        }
        self.trim(len, neg);
    }

    /// `|self| += add`: ripple-carry over the shorter length, copy the tail of
    /// the longer magnitude, then carry into the tail.
    pub(crate) fn uadd_val(&mut self, len: usize, neg: bool, add: &[u32]) {
        let alen = add.len();
        let min = len.min(alen);
        let mut n = len.max(alen);
        self.reserve(len + 1, n + 2);

        let mut carry = false;
        for i in 1..=min {
            let (s, c) = adc(self.val[i], add[i - 1], carry);
            self.val[i] = s;
            carry = c;
        }
        if alen > len {
            self.val[len + 1..=alen].copy_from_slice(&add[len..]);
        }
        if carry {
            n = self.carry_from(min + 1, n);
        }
        self.set_len(n, neg);
    }

    /// `|self| -= sub`, with `|self| > |sub|`.
    pub(crate) fn usub_val(&mut self, len: usize, neg: bool, sub: &[u32]) {
        let mut borrow = false;
        for (i, &s) in sub.iter().enumerate() {
            let (d, b) = sbb(self.val[i + 1], s, borrow);
            self.val[i + 1] = d;
            borrow = b;
        }
        if borrow {
            self.borrow_from(sub.len() + 1);
        }
        self.trim(len, neg);
    }

    /// `|self| = |min| - |self|`, with `|min| > |self|`.
    pub(crate) fn rsub_val(&mut self, len: usize, neg: bool, min: &[u32]) {
        let mlen = min.len();
        self.reserve(len + 1, mlen + 1);

        let mut borrow = false;
        for i in 1..=mlen {
            let s = if i <= len { self.val[i] } else { 0 };
            let (d, b) = sbb(min[i - 1], s, borrow);
            self.val[i] = d;
            borrow = b;
        }
        debug_assert!(!borrow);
        self.trim(mlen, neg);
    }
}

#[cfg(test)]
mod test {
    use crate::bigint::BigInt;

    #[test]
    fn test_carry_grows_buffer() {
        // Full buffer: two all-ones limbs and no slack.
        let mut a = BigInt::from_val(vec![2, u32::MAX, u32::MAX]);
        a.uadd_at(2, false, 1, 1);
        assert_eq!(a.val()[..4], [3, 0, 0, 1]);
        assert!(a.capacity() > 3);
    }

    #[test]
    fn test_borrow_trims() {
        let mut a = BigInt::from_val(vec![3, 0, 0, 1]);
        a.usub_at(3, true, 1, 1);
        assert_eq!(a.val()[..3], [(-2i32) as u32, u32::MAX, u32::MAX]);

        let mut b = BigInt::from_u64(1 << 32);
        b.usub_u64(2, false, 1 << 32);
        assert!(b.is_zero());
    }

    #[test]
    fn test_uadd_u64_extends() {
        let mut a = BigInt::from_u32(u32::MAX);
        a.uadd_u64(1, false, u64::MAX);
        assert_eq!(a, BigInt::from_u64(u64::MAX) + BigInt::from_u32(u32::MAX));
        assert_eq!(a.limbs(), 3);
    }

    #[test]
    fn test_uadd_val_copies_tail() {
        let mut a = BigInt::from_u32(1);
        a.uadd_val(1, false, &[u32::MAX, 5, 6]);
        assert_eq!(a.val()[..4], [3, 0, 6, 6]);

        let mut b = BigInt::from_val(vec![3, u32::MAX, u32::MAX, u32::MAX]);
        b.uadd_val(3, true, &[1]);
        assert_eq!(b.val()[..5], [(-4i32) as u32, 0, 0, 0, 1]);
    }

    #[test]
    fn test_rsub_val() {
        let mut a = BigInt::from_u32(1);
        a.rsub_val(1, true, &[0, 1]);
        assert_eq!(a.val()[..2], [(-1i32) as u32, u32::MAX]);
    }
}
