use crate::bigint::BigInt;

impl BigInt {
    pub fn sub_u32(&mut self, amount: u32) {
        self.add_sig_u64(true, amount as u64);
    }

    pub fn sub_i32(&mut self, amount: i32) {
        self.add_sig_u64(amount >= 0, amount.unsigned_abs() as u64);
    }

    pub fn sub_u64(&mut self, amount: u64) {
        self.add_sig_u64(true, amount);
    }

    pub fn sub_i64(&mut self, amount: i64) {
        self.add_sig_u64(amount >= 0, amount.unsigned_abs());
    }
}

#[cfg(test)]
mod test {
    use crate::bigint::test_util::{random, reference};
    use crate::bigint::BigInt;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_sub() {
        let mut prng = ChaCha20Rng::seed_from_u64(0);
        for bits in [20, 64, 65, 300, 2000] {
            for _ in 0..100 {
                let (mut a, ra) = random(&mut prng, bits);
                let b_bits = prng.gen_range(1..=bits);
                let (b, rb) = random(&mut prng, b_bits);
                a.add_sub(&b, true);
                assert_eq!(reference(&a), ra - rb);
            }
        }
    }

    #[test]
    fn test_sub_words() {
        let mut prng = ChaCha20Rng::seed_from_u64(1);
        for bits in [1, 32, 64, 96, 500] {
            for _ in 0..100 {
                let (mut a, ra) = random(&mut prng, bits);
                let w32: i32 = prng.gen();
                let w64: i64 = prng.gen();
                let u64v: u64 = prng.gen();

                a.sub_i32(w32);
                a.sub_i64(w64);
                a.sub_u64(u64v);
                a.sub_u32(w32 as u32);
                assert_eq!(reference(&a), ra - w32 - w64 - u64v - w32 as u32);
            }
        }
    }

    #[test]
    fn test_sub_extremes() {
        let mut a = BigInt::new();
        a.sub_i64(i64::MIN);
        assert_eq!(a, BigInt::from_u64(1 << 63));

        a.sub_u64(1 << 63);
        assert!(a.is_zero());

        a.sub_i32(i32::MIN);
        a.sub_u32(u32::MAX);
        assert_eq!(a, BigInt::from_i64((1 << 31) - u32::MAX as i64));

        let mut b = BigInt::from_val(vec![3, 0, 0, 1]);
        b.sub_u64(u64::MAX);
        assert_eq!(b, BigInt::from_u32(1));
    }
}
