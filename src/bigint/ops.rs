//! Operator and `num-traits` impls on top of the in-place kernel.

use crate::bigint::BigInt;
use crate::config::MulThresholds;
use crate::error::Error;
use num_traits::{CheckedDiv, CheckedRem, FromPrimitive, Num, One, Pow, Signed, ToPrimitive, Zero};
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign, Mul,
    MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

/// Derives the owned and borrowed forms of a binary operator from an
/// in-place `$body` over `$a: &mut BigInt` and `$b: &BigInt`.
macro_rules! forward_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $OpAssign<&BigInt> for BigInt {
            fn $op_assign(&mut self, other: &BigInt) {
                let ($a, $b) = (self, other);
                $body;
            }
        }

        impl $OpAssign<BigInt> for BigInt {
            fn $op_assign(&mut self, other: BigInt) {
                <BigInt as $OpAssign<&BigInt>>::$op_assign(self, &other);
            }
        }

        impl $Op<&BigInt> for BigInt {
            type Output = BigInt;

            fn $op(mut self, other: &BigInt) -> BigInt {
                <BigInt as $OpAssign<&BigInt>>::$op_assign(&mut self, other);
                self
            }
        }

        impl $Op<BigInt> for BigInt {
            type Output = BigInt;

            fn $op(mut self, other: BigInt) -> BigInt {
                <BigInt as $OpAssign<&BigInt>>::$op_assign(&mut self, &other);
                self
            }
        }

        impl $Op<&BigInt> for &BigInt {
            type Output = BigInt;

            fn $op(self, other: &BigInt) -> BigInt {
                let mut r = self.clone();
                <BigInt as $OpAssign<&BigInt>>::$op_assign(&mut r, other);
                r
            }
        }

        impl $Op<BigInt> for &BigInt {
            type Output = BigInt;

            fn $op(self, other: BigInt) -> BigInt {
                let mut r = self.clone();
                <BigInt as $OpAssign<&BigInt>>::$op_assign(&mut r, &other);
                r
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, |a, b| a.add_sub(b, false));
forward_binop!(Sub, sub, SubAssign, sub_assign, |a, b| a.add_sub(b, true));
forward_binop!(Mul, mul, MulAssign, mul_assign, |a, b| a.mul_with(b, &MulThresholds::DEFAULT));
forward_binop!(Div, div, DivAssign, div_assign, |a, b| a.div_rem(b));
forward_binop!(Rem, rem, RemAssign, rem_assign, |a, b| a.remainder(b));
forward_binop!(BitAnd, bitand, BitAndAssign, bitand_assign, |a, b| a.and(b));
forward_binop!(BitOr, bitor, BitOrAssign, bitor_assign, |a, b| a.or(b));
forward_binop!(BitXor, bitxor, BitXorAssign, bitxor_assign, |a, b| a.xor(b));

/// Operators with a machine-integer right-hand side, mapped to the word
/// kernels.
macro_rules! forward_scalar {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $($t:ty => $method:ident),*) => {
        $(
            impl $OpAssign<$t> for BigInt {
                fn $op_assign(&mut self, other: $t) {
                    self.$method(other);
                }
            }

            impl $Op<$t> for BigInt {
                type Output = BigInt;

                fn $op(mut self, other: $t) -> BigInt {
                    self.$method(other);
                    self
                }
            }

            impl $Op<$t> for &BigInt {
                type Output = BigInt;

                fn $op(self, other: $t) -> BigInt {
                    let mut r = self.clone();
                    r.$method(other);
                    r
                }
            }
        )*
    };
}

forward_scalar!(Add, add, AddAssign, add_assign, u32 => add_u32, i32 => add_i32, u64 => add_u64, i64 => add_i64);
forward_scalar!(Sub, sub, SubAssign, sub_assign, u32 => sub_u32, i32 => sub_i32, u64 => sub_u64, i64 => sub_i64);
forward_scalar!(Mul, mul, MulAssign, mul_assign, u32 => mul_u32, i32 => mul_i32, u64 => mul_u64, i64 => mul_i64);
forward_scalar!(Div, div, DivAssign, div_assign, u32 => div_u32, i32 => div_i32, u64 => div_u64, i64 => div_i64);
forward_scalar!(Shl, shl, ShlAssign, shl_assign, u32 => shl_bits, i32 => shift_left);
forward_scalar!(Shr, shr, ShrAssign, shr_assign, u32 => shr_bits, i32 => shift_right);

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.negate();
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}

impl Not for BigInt {
    type Output = BigInt;

    fn not(mut self) -> BigInt {
        self.invert();
        self
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        !self.clone()
    }
}

impl Sum for BigInt {
    fn sum<I: Iterator<Item = BigInt>>(iter: I) -> BigInt {
        iter.fold(BigInt::new(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a BigInt> for BigInt {
    fn sum<I: Iterator<Item = &'a BigInt>>(iter: I) -> BigInt {
        iter.fold(BigInt::new(), |acc, x| acc + x)
    }
}

impl Product for BigInt {
    fn product<I: Iterator<Item = BigInt>>(iter: I) -> BigInt {
        iter.fold(BigInt::from_u32(1), |acc, x| acc * x)
    }
}

impl Zero for BigInt {
    fn zero() -> BigInt {
        BigInt::new()
    }

    fn is_zero(&self) -> bool {
        BigInt::is_zero(self)
    }

    fn set_zero(&mut self) {
        self.set_to_zero();
    }
}

impl One for BigInt {
    fn one() -> BigInt {
        BigInt::from_u32(1)
    }
}

impl Num for BigInt {
    type FromStrRadixErr = Error;

    fn from_str_radix(s: &str, radix: u32) -> Result<BigInt, Error> {
        BigInt::parse_radix(s, radix)
    }
}

impl Signed for BigInt {
    fn abs(&self) -> BigInt {
        let mut r = self.clone();
        r.abs_in_place();
        r
    }

    fn abs_sub(&self, other: &BigInt) -> BigInt {
        if self <= other {
            BigInt::new()
        } else {
            self - other
        }
    }

    fn signum(&self) -> BigInt {
        BigInt::from_i32(self.sign())
    }

    fn is_positive(&self) -> bool {
        self.sign() > 0
    }

    fn is_negative(&self) -> bool {
        BigInt::is_negative(self)
    }
}

impl ToPrimitive for BigInt {
    fn to_i64(&self) -> Option<i64> {
        (self.bit_length() < 64).then(|| self.long_value())
    }

    fn to_u64(&self) -> Option<u64> {
        (!BigInt::is_negative(self) && self.mag_bit_length() <= 64).then(|| self.low_u64())
    }

    fn to_f32(&self) -> Option<f32> {
        Some(self.float_value())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.double_value())
    }
}

impl FromPrimitive for BigInt {
    fn from_i64(n: i64) -> Option<BigInt> {
        Some(BigInt::from_i64(n))
    }

    fn from_u64(n: u64) -> Option<BigInt> {
        Some(BigInt::from_u64(n))
    }

    fn from_f64(n: f64) -> Option<BigInt> {
        n.is_finite().then(|| BigInt::from_f64(n))
    }
}

impl Pow<u32> for BigInt {
    type Output = BigInt;

    fn pow(mut self, e: u32) -> BigInt {
        self.pow_mut(e);
        self
    }
}

impl Pow<u32> for &BigInt {
    type Output = BigInt;

    fn pow(self, e: u32) -> BigInt {
        self.clone().pow(e)
    }
}

impl CheckedDiv for BigInt {
    fn checked_div(&self, v: &BigInt) -> Option<BigInt> {
        BigInt::checked_div(self, v)
    }
}

impl CheckedRem for BigInt {
    fn checked_rem(&self, v: &BigInt) -> Option<BigInt> {
        BigInt::checked_rem(self, v)
    }
}
