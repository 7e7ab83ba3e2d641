use crate::bigint::BigInt;

/// Words of headroom added to every allocation.
const ALLOC_SLACK: usize = 16;

/// A zeroed buffer of at least `len` words, with an eighth more plus
/// [`ALLOC_SLACK`] words so that a carry out of the top limb or a one-limb
/// shift does not reallocate.
pub(crate) fn alloc(len: usize) -> Vec<u32> {
    vec![0; len + (len >> 3) + ALLOC_SLACK]
}

impl BigInt {
    /// Zero.
    pub fn new() -> Self {
        Self { val: alloc(1) }
    }

    /// Zero, with room for `limbs` magnitude limbs before the first
    /// reallocation.
    pub fn with_capacity(limbs: usize) -> Self {
        Self { val: alloc(limbs + 1) }
    }

    /// Adopts a raw value-encoded buffer.
    ///
    /// `val[0]` must hold the signed length and `val[1..=|len|]` the magnitude
    /// without a leading zero limb. An empty buffer is taken as zero.
    pub fn from_val(mut val: Vec<u32>) -> Self {
        if val.is_empty() {
            val.push(0);
        }
        let int = Self { val };
        int.debug_check();
        int
    }

    /// The raw value-encoded buffer, including unused slack.
    pub fn val(&self) -> &[u32] {
        &self.val
    }

    pub fn into_val(self) -> Vec<u32> {
        self.val
    }

    /// Number of magnitude limbs the buffer holds without reallocating.
    pub fn capacity(&self) -> usize {
        self.val.len() - 1
    }

    /// Replaces the buffer with one of at least `new_len` words, keeping the
    /// first `copy_len` words.
    pub(crate) fn realloc(&mut self, copy_len: usize, new_len: usize) {
        let mut val = alloc(new_len);
        val[..copy_len].copy_from_slice(&self.val[..copy_len]);
        self.val = val;
    }

    /// Makes sure the buffer holds at least `new_len` words.
    #[inline]
    pub(crate) fn reserve(&mut self, copy_len: usize, new_len: usize) {
        if self.val.len() < new_len {
            self.realloc(copy_len, new_len);
        }
    }

    /// Overwrites the value with a magnitude and sign.
    pub(crate) fn assign_mag(&mut self, mag: &[u32], neg: bool) {
        let len = mag.len();
        if self.val.len() <= len {
            self.val = alloc(len + 1);
        }
        self.val[1..=len].copy_from_slice(mag);
        self.trim(len, neg);
    }

    pub fn set_to_zero(&mut self) {
        self.val[0] = 0;
    }

    pub fn is_zero(&self) -> bool {
        self.val[0] == 0
    }

    /// -1, 0 or 1.
    pub fn sign(&self) -> i32 {
        (self.val[0] as i32).signum()
    }

    pub fn is_negative(&self) -> bool {
        (self.val[0] as i32) < 0
    }

    /// Number of magnitude limbs.
    pub fn limbs(&self) -> usize {
        self.len_neg().0
    }

    /// Negates in place.
    pub fn negate(&mut self) {
        self.val[0] = (self.val[0] as i32).wrapping_neg() as u32;
    }

    /// Replaces the value with its absolute value.
    pub fn abs_in_place(&mut self) {
        let (len, _) = self.len_neg();
        self.set_len(len, false);
    }

    pub fn assign(&mut self, src: &BigInt) {
        let (len, neg) = src.len_neg();
        self.assign_mag(&src.val[1..=len], neg);
    }

    /// Assigns a magnitude with an explicit sign.
    pub fn assign_sig_u32(&mut self, neg: bool, mag: u32) {
        if mag == 0 {
            self.set_to_zero();
            return;
        }
        self.reserve(0, 2);
        self.val[1] = mag;
        self.set_len(1, neg);
    }

    pub fn assign_u32(&mut self, mag: u32) {
        self.assign_sig_u32(false, mag);
    }

    pub fn assign_i32(&mut self, v: i32) {
        self.assign_sig_u32(v < 0, v.unsigned_abs());
    }

    /// Assigns a magnitude with an explicit sign.
    pub fn assign_sig_u64(&mut self, neg: bool, mag: u64) {
        let hi = (mag >> 32) as u32;
        if hi == 0 {
            self.assign_sig_u32(neg, mag as u32);
            return;
        }
        self.reserve(0, 3);
        self.val[1] = mag as u32;
        self.val[2] = hi;
        self.set_len(2, neg);
    }

    pub fn assign_u64(&mut self, mag: u64) {
        self.assign_sig_u64(false, mag);
    }

    pub fn assign_i64(&mut self, v: i64) {
        self.assign_sig_u64(v < 0, v.unsigned_abs());
    }

    pub fn from_u32(v: u32) -> Self {
        let mut int = Self::new();
        int.assign_u32(v);
        int
    }

    pub fn from_i32(v: i32) -> Self {
        let mut int = Self::new();
        int.assign_i32(v);
        int
    }

    pub fn from_u64(v: u64) -> Self {
        let mut int = Self::new();
        int.assign_u64(v);
        int
    }

    pub fn from_i64(v: i64) -> Self {
        let mut int = Self::new();
        int.assign_i64(v);
        int
    }
}

impl Clone for BigInt {
    fn clone(&self) -> Self {
        let (len, _) = self.len_neg();
        let mut val = alloc(len + 1);
        val[..=len].copy_from_slice(&self.val[..=len]);
        Self { val }
    }

    fn clone_from(&mut self, source: &Self) {
        let (len, neg) = source.len_neg();
        self.assign_mag(&source.val[1..=len], neg);
    }
}

impl Default for BigInt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use crate::bigint::BigInt;

    #[test]
    fn test_alloc_has_slack() {
        for len in [0, 1, 7, 100, 10_000] {
            assert!(super::alloc(len).len() > len);
        }
    }

    #[test]
    fn test_assign_machine_ints() {
        let mut a = BigInt::new();
        assert!(a.is_zero());
        assert_eq!(a.val()[0], 0);

        a.assign_i32(-7);
        assert_eq!(a.val()[..2], [(-1i32) as u32, 7]);
        assert_eq!(a.sign(), -1);

        a.assign_i64(i64::MIN);
        assert_eq!(a.val()[..3], [(-2i32) as u32, 0, 0x8000_0000]);

        a.assign_u64(u64::MAX);
        assert_eq!(a.val()[..3], [2, u32::MAX, u32::MAX]);

        a.assign_u64(5);
        assert_eq!(a.val()[..2], [1, 5]);

        a.assign_sig_u32(true, 0);
        assert!(a.is_zero());
        assert_eq!(a.sign(), 0);
    }

    #[test]
    fn test_from_val() {
        let a = BigInt::from_val(vec![(-2i32) as u32, 1, 2, 99, 99]);
        assert_eq!(a.limbs(), 2);
        assert!(a.is_negative());
        assert_eq!(a.capacity(), 4);

        assert!(BigInt::from_val(vec![]).is_zero());
        assert!(BigInt::from_val(vec![0, 12345]).is_zero());
    }

    #[test]
    fn test_clone_drops_stale_slack() {
        let a = BigInt::from_val(vec![1, 42, 7, 7, 7]);
        let b = a.clone();
        assert_eq!(b.val()[..2], [1, 42]);
        assert_eq!(a, b);

        let mut c = BigInt::from_i64(-1 << 40);
        c.clone_from(&a);
        assert_eq!(c, a);
    }

    #[test]
    fn test_negate_and_abs() {
        let mut a = BigInt::from_i32(-12);
        a.negate();
        assert_eq!(a, BigInt::from_i32(12));
        a.negate();
        a.abs_in_place();
        assert_eq!(a, BigInt::from_i32(12));

        let mut z = BigInt::new();
        z.negate();
        assert!(z.is_zero());
    }
}
