use crate::bigint::karatsuba::{karatsuba, schoolbook, schoolbook_in_place, Fork};
use crate::bigint::{alloc, BigInt};
use crate::config::MulThresholds;
use crate::error::Error;
use crate::pool::WorkerPool;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use strum_macros::{Display, EnumIter};
use tracing::trace;

/// Algorithm used for a multi-limb product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MulStrategy {
    Schoolbook,
    Karatsuba,
    ParallelKaratsuba,
}

impl MulThresholds {
    /// Picks the strategy for operands of `xlen` and `ylen` limbs.
    pub fn strategy(&self, xlen: usize, ylen: usize) -> MulStrategy {
        let (long, short) = (xlen.max(ylen), xlen.min(ylen));
        if short < self.karatsuba_x || long.saturating_mul(short) < self.karatsuba_product {
            MulStrategy::Schoolbook
        } else if short >= self.parallel_x && self.parallel_depth > 0 {
            MulStrategy::ParallelKaratsuba
        } else {
            MulStrategy::Karatsuba
        }
    }
}

/// `x * y` as a fresh value-encoded number.
fn product(
    x: &[u32],
    y: &[u32],
    neg: bool,
    strategy: MulStrategy,
    t: &MulThresholds,
    pool: &WorkerPool,
) -> BigInt {
    let len = x.len() + y.len();
    let mut val = alloc(len + 1);
    let z = &mut val[1..=len];
    match strategy {
        MulStrategy::Schoolbook => schoolbook(z, x, y),
        MulStrategy::Karatsuba => karatsuba(z, x, y, t.base(), None),
        MulStrategy::ParallelKaratsuba => {
            let fork = Fork { pool, min_len: t.parallel_x, depth: t.parallel_depth.max(1) };
            karatsuba(z, x, y, t.base(), Some(fork))
        }
    }
    let mut int = BigInt { val };
    int.trim(len, neg);
    int
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl BigInt {
    /// `|self| *= m` for a non-zero `m`.
    fn umul_u64(&mut self, len: usize, neg: bool, m: u64) {
        if m >> 32 == 0 {
            let len = self.mul_add_limb(len, m as u32, 0);
            self.set_len(len, neg);
            return;
        }
        self.reserve(len + 1, len + 3);
        let mut carry = 0u128;
        for limb in &mut self.val[1..=len] {
            let t = *limb as u128 * m as u128 + carry;
            *limb = t as u32;
            carry = t >> 32;
        }
        self.val[len + 1] = carry as u32;
        self.val[len + 2] = (carry >> 32) as u32;
        self.trim(len + 2, neg);
    }

    pub fn mul_u32(&mut self, m: u32) {
        self.mul_sig_u64(false, m as u64);
    }

    pub fn mul_i32(&mut self, m: i32) {
        self.mul_sig_u64(m < 0, m.unsigned_abs() as u64);
    }

    pub fn mul_u64(&mut self, m: u64) {
        self.mul_sig_u64(false, m);
    }

    pub fn mul_i64(&mut self, m: i64) {
        self.mul_sig_u64(m < 0, m.unsigned_abs());
    }

    fn mul_sig_u64(&mut self, neg: bool, m: u64) {
        let (len, sneg) = self.len_neg();
        if len == 0 {
            return;
        }
        if m == 0 {
            self.set_to_zero();
            return;
        }
        self.umul_u64(len, sneg != neg, m);
    }

    /// `self *= other` with explicit size thresholds.
    pub fn mul_with(&mut self, other: &BigInt, t: &MulThresholds) {
        let (len, olen) = (self.limbs(), other.limbs());
        let strategy = t.strategy(len, olen);
        self.mul_dispatch(other, strategy, t, &WorkerPool::global());
    }

    /// `self *= other` using `strategy` for any operands wider than two limbs.
    pub fn mul_using(&mut self, other: &BigInt, strategy: MulStrategy) {
        let t = MulThresholds { parallel_x: 0, ..MulThresholds::DEFAULT };
        self.mul_dispatch(other, strategy, &t, &WorkerPool::global());
    }

    /// `self *= other` by parallel Karatsuba on `pool`. A panicking worker
    /// propagates to the caller.
    pub fn mul_parallel(&mut self, other: &BigInt, pool: &WorkerPool) {
        let t = MulThresholds::DEFAULT;
        self.mul_dispatch(other, MulStrategy::ParallelKaratsuba, &t, pool);
    }

    /// Like [`BigInt::mul_parallel`], but a panicking worker is reported as
    /// [`Error::WorkerPanicked`] and leaves `self` unchanged.
    pub fn try_mul_parallel(&mut self, other: &BigInt, pool: &WorkerPool) -> Result<(), Error> {
        let (len, neg) = self.len_neg();
        let (olen, oneg) = other.len_neg();
        if len <= 2 || olen <= 2 {
            self.mul_dispatch(other, MulStrategy::ParallelKaratsuba, &MulThresholds::DEFAULT, pool);
            return Ok(());
        }
        let t = MulThresholds::DEFAULT;
        let (x, y) = (self.mag(), other.mag());
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            product(x, y, neg != oneg, MulStrategy::ParallelKaratsuba, &t, pool)
        }));
        match result {
            Ok(p) => {
                *self = p;
                Ok(())
            }
            Err(payload) => Err(Error::WorkerPanicked(panic_message(payload.as_ref()))),
        }
    }

    fn mul_dispatch(&mut self, other: &BigInt, strategy: MulStrategy, t: &MulThresholds, pool: &WorkerPool) {
        let (len, neg) = self.len_neg();
        let (olen, oneg) = other.len_neg();
        if len == 0 {
            return;
        }
        if olen == 0 {
            self.set_to_zero();
            return;
        }
        let neg = neg != oneg;

        if olen <= 2 {
            self.umul_u64(len, neg, other.low_u64());
            return;
        }
        if len <= 2 {
            let m = self.low_u64();
            self.assign_mag(other.mag(), neg);
            self.umul_u64(olen, neg, m);
            return;
        }

        trace!(%strategy, len, olen, "multiplying");
        if strategy == MulStrategy::Schoolbook && self.val.len() > len + olen {
            schoolbook_in_place(&mut self.val[1..], len, other.mag());
            self.trim(len + olen, neg);
            return;
        }
        *self = product(self.mag(), other.mag(), neg, strategy, t, pool);
    }

    /// `self *= self`.
    pub fn square(&mut self) {
        let other = self.clone();
        self.mul_with(&other, &MulThresholds::DEFAULT);
    }

    /// `self = self^e` by repeated squaring; `x^0` is one.
    pub fn pow_mut(&mut self, mut e: u32) {
        let mut base = self.clone();
        self.assign_u32(1);
        while e > 0 {
            if e & 1 == 1 {
                self.mul_with(&base, &MulThresholds::DEFAULT);
            }
            e >>= 1;
            if e > 0 {
                base.square();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::bigint::karatsuba::PANIC_IN_FORK;
    use crate::bigint::test_util::{random, reference};
    use crate::bigint::{BigInt, MulStrategy};
    use crate::config::MulThresholds;
    use crate::error::Error;
    use crate::pool::WorkerPool;
    use num_traits::Pow;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use strum::IntoEnumIterator;

    const SMALL: MulThresholds = MulThresholds {
        karatsuba_x: 8,
        karatsuba_product: 64,
        karatsuba_base: 4,
        parallel_x: 32,
        parallel_depth: 2,
    };

    #[test]
    fn test_mul_words() {
        let mut prng = ChaCha20Rng::seed_from_u64(0);
        for bits in [1, 32, 64, 100, 1000] {
            for _ in 0..100 {
                let (mut a, ra) = random(&mut prng, bits);
                let (m32, m64): (i32, i64) = (prng.gen(), prng.gen());
                let u64v: u64 = prng.gen();
                a.mul_i32(m32);
                a.mul_i64(m64);
                a.mul_u64(u64v);
                a.mul_u32(m32 as u32);
                assert_eq!(reference(&a), ra * m32 * m64 * u64v * (m32 as u32));
            }
        }
        let mut a = BigInt::from_i32(-5);
        a.mul_u64(0);
        assert!(a.is_zero());
    }

    #[test]
    fn test_strategies_agree() {
        let mut prng = ChaCha20Rng::seed_from_u64(1);
        for (xbits, ybits) in [(32, 5000), (64, 64), (96, 3000), (3000, 3000), (20_000, 9_000)] {
            let (a, ra) = random(&mut prng, xbits);
            let (b, rb) = random(&mut prng, ybits);
            let expected = &ra * &rb;
            for strategy in MulStrategy::iter() {
                let mut c = a.clone();
                c.mul_using(&b, strategy);
                assert_eq!(reference(&c), expected, "{strategy}");
            }
            let mut c = a.clone();
            c.mul_with(&b, &SMALL);
            assert_eq!(reference(&c), expected);
        }
    }

    #[test]
    fn test_strategy_choice() {
        let t = MulThresholds::DEFAULT;
        assert_eq!(t.strategy(10, 10), MulStrategy::Schoolbook);
        assert_eq!(t.strategy(83, 1_000_000), MulStrategy::Schoolbook);
        assert_eq!(t.strategy(900, 900), MulStrategy::Schoolbook);
        assert_eq!(t.strategy(1000, 1000), MulStrategy::Karatsuba);
        assert_eq!(t.strategy(50_000, 50_000), MulStrategy::ParallelKaratsuba);
        let t = MulThresholds { parallel_depth: 0, ..t };
        assert_eq!(t.strategy(50_000, 50_000), MulStrategy::Karatsuba);
    }

    #[test]
    fn test_in_place_schoolbook() {
        let mut prng = ChaCha20Rng::seed_from_u64(2);
        let (a, ra) = random(&mut prng, 640);
        let (b, rb) = random(&mut prng, 640);

        let mut c = BigInt::with_capacity(64);
        c.assign(&a);
        let before = c.val().as_ptr();
        c.mul_using(&b, MulStrategy::Schoolbook);
        assert_eq!(c.val().as_ptr(), before);
        assert_eq!(reference(&c), ra * rb);
    }

    #[test]
    fn test_commutative_associative() {
        let mut prng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..20 {
            let (a, _) = random(&mut prng, 1500);
            let (b, _) = random(&mut prng, 900);
            let (c, _) = random(&mut prng, 300);

            let mut ab = a.clone();
            ab.mul_with(&b, &SMALL);
            let mut ba = b.clone();
            ba.mul_with(&a, &SMALL);
            assert_eq!(ab, ba);

            ab.mul_with(&c, &SMALL);
            let mut bc = b.clone();
            bc.mul_with(&c, &SMALL);
            let mut a_bc = a.clone();
            a_bc.mul_with(&bc, &SMALL);
            assert_eq!(ab, a_bc);
        }
    }

    #[test]
    fn test_mul_parallel() {
        let pool = WorkerPool::new(3).unwrap();
        let mut prng = ChaCha20Rng::seed_from_u64(4);
        let (a, ra) = random(&mut prng, 32 * 3000);
        let (b, rb) = random(&mut prng, 32 * 2500);

        let mut c = a.clone();
        c.mul_parallel(&b, &pool);
        assert_eq!(reference(&c), &ra * &rb);

        let mut d = a.clone();
        d.try_mul_parallel(&b, &pool).unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn test_try_mul_parallel_worker_panic() {
        let pool = WorkerPool::new(3).unwrap();
        let mut prng = ChaCha20Rng::seed_from_u64(6);
        // wide enough that the top level forks under the default thresholds
        let (a, ra) = random(&mut prng, 32 * 20_001);
        let (b, rb) = random(&mut prng, 32 * 20_001);
        let a = -&a;

        let mut c = a.clone();
        PANIC_IN_FORK.with(|f| f.set(true));
        match c.try_mul_parallel(&b, &pool) {
            Err(Error::WorkerPanicked(msg)) => assert_eq!(msg, "middle product task failed"),
            other => panic!("expected a worker panic, got {other:?}"),
        }
        assert_eq!(c, a);
        assert!(!PANIC_IN_FORK.with(|f| f.get()));

        c.try_mul_parallel(&b, &pool).unwrap();
        assert_eq!(reference(&c), -ra * rb);
    }

    #[test]
    fn test_mul_scenario() {
        let mut a = BigInt::from_i32(123456789);
        a.mul_with(&BigInt::from_i32(987654321), &MulThresholds::DEFAULT);
        assert_eq!(a, BigInt::from_i64(121932631112635269));
    }

    #[test]
    fn test_square_and_pow() {
        let mut prng = ChaCha20Rng::seed_from_u64(5);
        for _ in 0..20 {
            let (mut a, ra) = random(&mut prng, 700);
            let mut s = a.clone();
            s.square();
            assert_eq!(reference(&s), &ra * &ra);

            let e = prng.gen_range(0..12u32);
            a.pow_mut(e);
            assert_eq!(reference(&a), Pow::pow(&ra, e));
        }
        let mut z = BigInt::new();
        z.pow_mut(0);
        assert_eq!(z, BigInt::from_u32(1));
    }
}
