#[cfg(test)]
mod test {
    use mutbig::{BigInt, Endian, MulStrategy, MulThresholds, WorkerPool};
    use num_bigint::RandomBits;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use strum::IntoEnumIterator;

    fn random(prng: &mut ChaCha20Rng, bits: u64) -> (BigInt, num_bigint::BigInt) {
        let n: num_bigint::BigInt = prng.sample(RandomBits::new(bits));
        (BigInt::from(&n), n)
    }

    #[test]
    fn test_decimal_round_trip() {
        let mut a = BigInt::new();
        a.assign_str("-123456789012345678901234567890");
        assert_eq!(a.to_string(), "-123456789012345678901234567890");
    }

    #[test]
    fn test_small_product() {
        let a = BigInt::from_i32(123456789) * BigInt::from_i32(987654321);
        assert_eq!(a, BigInt::from_i64(121932631112635269));
    }

    #[test]
    fn test_long_division() {
        let mut a: BigInt = "100000000000000000000".parse().unwrap();
        let mut q = BigInt::new();
        a.div_into(&BigInt::from_i32(7), &mut q);
        assert_eq!(q.to_string(), "14285714285714285714");
        assert_eq!(a, BigInt::from_i32(2));
    }

    #[test]
    fn test_shift_across_limbs() {
        let mut a = BigInt::from_i32(1);
        a.shift_left(65);
        let expected: BigInt = "36893488147419103232".parse().unwrap();
        assert_eq!(a, expected);
        assert_eq!(a.bit_length(), 66);
        assert_eq!(a.lowest_set_bit(), Some(65));
    }

    #[test]
    fn test_and_with_minus_one() {
        let mut a = BigInt::from_i32(-1);
        a.and(&BigInt::from_i32(5));
        assert_eq!(a, BigInt::from_i32(5));
    }

    #[test]
    fn test_mul_strategies_1000_limbs() {
        let mut prng = ChaCha20Rng::seed_from_u64(0);
        let (a, ra) = random(&mut prng, 32 * 1000);
        let (b, rb) = random(&mut prng, 32 * 1000);
        let expected = BigInt::from(&(ra * rb));

        let t = MulThresholds {
            karatsuba_x: 16,
            karatsuba_product: 256,
            karatsuba_base: 16,
            parallel_x: 100,
            parallel_depth: 3,
        };
        let mut c = a.clone();
        c.mul_with(&b, &t);
        assert_eq!(c, expected);

        for strategy in MulStrategy::iter() {
            let mut c = a.clone();
            c.mul_using(&b, strategy);
            assert_eq!(c, expected, "{strategy}");
        }
    }

    #[test]
    fn test_mul_50000_limbs() {
        let mut prng = ChaCha20Rng::seed_from_u64(1);
        let (a, ra) = random(&mut prng, 32 * 50_000);
        let (b, rb) = random(&mut prng, 32 * 50_000);
        let expected = BigInt::from(&(ra * rb));

        let mut k = a.clone();
        k.mul_using(&b, MulStrategy::Karatsuba);
        assert_eq!(k, expected);

        let pool = WorkerPool::new(4).unwrap();
        let mut p = a.clone();
        p.mul_parallel(&b, &pool);
        assert_eq!(p, k);

        let mut d = a.clone();
        d *= &b;
        assert_eq!(d, k);
    }

    #[test]
    fn test_thresholds_from_json() {
        let t: MulThresholds =
            serde_json::from_str(r#"{ "karatsuba_x": 4, "karatsuba_product": 16, "karatsuba_base": 4 }"#).unwrap();
        assert_eq!(t.strategy(10, 10), MulStrategy::Karatsuba);

        let mut prng = ChaCha20Rng::seed_from_u64(2);
        let (a, ra) = random(&mut prng, 3000);
        let (b, rb) = random(&mut prng, 2000);
        let mut c = a.clone();
        c.mul_with(&b, &t);
        assert_eq!(num_bigint::BigInt::from(&c), ra * rb);
    }

    #[test]
    fn test_bytes_extremes() {
        for v in [0i64, 1, -1, i32::MAX as i64, i32::MIN as i64, u32::MAX as i64, i64::MAX, i64::MIN] {
            let a = BigInt::from_i64(v);
            for endian in Endian::iter() {
                let mut b = BigInt::new();
                b.assign_bytes(&a.to_byte_array(endian), endian);
                assert_eq!(a, b);
            }
            assert_eq!(a.to_byte_array(Endian::Big), num_bigint::BigInt::from(v).to_signed_bytes_be());
        }
    }
}
