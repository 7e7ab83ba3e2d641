use crate::bigint::BigInt;
use crate::error::Error;
use num_bigint::Sign;
use strum_macros::{Display, EnumIter};

/// Byte order of a two's-complement byte array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Endian {
    Big,
    Little,
}

impl BigInt {
    /// Assigns a two's-complement byte array. The most significant byte
    /// carries the sign; an empty slice is zero.
    pub fn assign_bytes(&mut self, bytes: &[u8], endian: Endian) {
        let n = bytes.len();
        if n == 0 {
            self.set_to_zero();
            return;
        }
        // i-th byte counted from the least significant end
        let byte = |i: usize| match endian {
            Endian::Little => bytes[i],
            Endian::Big => bytes[n - 1 - i],
        };

        let neg = byte(n - 1) & 0x80 != 0;
        let ext = if neg { 0xff } else { 0 };
        let len = n.div_ceil(4);
        self.reserve(0, len + 1);

        // Negative input: magnitude = !x + 1, carried across limbs.
        let mut carry = neg;
        for j in 0..len {
            let mut w = 0u32;
            for k in (0..4).rev() {
                let i = 4 * j + k;
                let b = if i < n { byte(i) } else { ext };
                w = w << 8 | b as u32;
            }
            if neg {
                let (s, c) = (!w).overflowing_add(carry as u32);
                w = s;
                carry = c;
            }
            self.val[j + 1] = w;
        }
        self.trim(len, neg);
    }

    /// The shortest two's-complement byte array holding the value, with at
    /// least one sign bit.
    pub fn to_byte_array(&self, endian: Endian) -> Vec<u8> {
        let n = (self.bit_length() / 8 + 1) as usize;
        let nz = self.lowest_nonzero_limb();
        let mut out: Vec<u8> = (0..n)
            .map(|i| (self.twos_limb(i / 4, nz) >> (8 * (i % 4))) as u8)
            .collect();
        if endian == Endian::Big {
            out.reverse();
        }
        out
    }

    /// Low 32 bits in two's complement.
    pub fn int_value(&self) -> i32 {
        let (len, neg) = self.len_neg();
        if len == 0 {
            return 0;
        }
        let low = self.val[1] as i32;
        if neg {
            low.wrapping_neg()
        } else {
            low
        }
    }

    pub fn byte_value(&self) -> i8 {
        self.int_value() as i8
    }

    pub fn short_value(&self) -> i16 {
        self.int_value() as i16
    }

    /// Low 64 bits in two's complement.
    pub fn long_value(&self) -> i64 {
        let low = self.low_u64() as i64;
        if self.is_negative() {
            low.wrapping_neg()
        } else {
            low
        }
    }

    /// Low 64 bits of the magnitude, ignoring the sign.
    pub fn long_value_unsigned(&self) -> u64 {
        self.low_u64()
    }

    /// The top `n` bits of the magnitude, for a magnitude wider than 63 bits.
    fn top_bits(&self, n: u32) -> u64 {
        let mag = self.mag();
        let take = mag.len().min(3);
        let acc = mag[mag.len() - take..]
            .iter()
            .rev()
            .fold(0u128, |acc, &l| acc << 32 | l as u128);
        let acc_bits = 128 - acc.leading_zeros();
        (acc >> (acc_bits - n)) as u64
    }

    /// Nearest `f32` for values below 2^63, otherwise the top 24 bits of the
    /// magnitude with the rest truncated. Overflow gives an infinity.
    pub fn float_value(&self) -> f32 {
        let bits = self.mag_bit_length();
        if bits <= 63 {
            return self.long_value() as f32;
        }
        let neg = self.is_negative();
        let exp = bits - 1;
        if exp > f32::MAX_EXP as u64 - 1 {
            return if neg { f32::NEG_INFINITY } else { f32::INFINITY };
        }
        let mantissa = self.top_bits(24) as u32 & 0x7f_ffff;
        let biased = (exp + 127) as u32;
        f32::from_bits((neg as u32) << 31 | biased << 23 | mantissa)
    }

    /// Nearest `f64` for values below 2^63, otherwise the top 53 bits of the
    /// magnitude with the rest truncated. Overflow gives an infinity.
    pub fn double_value(&self) -> f64 {
        let bits = self.mag_bit_length();
        if bits <= 63 {
            return self.long_value() as f64;
        }
        let neg = self.is_negative();
        let exp = bits - 1;
        if exp > f64::MAX_EXP as u64 - 1 {
            return if neg { f64::NEG_INFINITY } else { f64::INFINITY };
        }
        let mantissa = self.top_bits(53) & ((1 << 52) - 1);
        let biased = exp + 1023;
        f64::from_bits((neg as u64) << 63 | biased << 52 | mantissa)
    }

    /// Assigns `v` truncated toward zero. NaN and infinities assign zero.
    pub fn assign_f64(&mut self, v: f64) {
        if !v.is_finite() || v.abs() < 1.0 {
            self.set_to_zero();
            return;
        }
        let bits = v.to_bits();
        let neg = bits >> 63 != 0;
        let exp = ((bits >> 52) & 0x7ff) as i32 - 1075;
        let mantissa = bits & ((1 << 52) - 1) | 1 << 52;
        if exp <= 0 {
            self.assign_sig_u64(neg, mantissa >> -exp);
        } else {
            self.assign_sig_u64(neg, mantissa);
            self.shift_left(exp);
        }
    }

    pub fn from_f64(v: f64) -> Self {
        let mut int = Self::new();
        int.assign_f64(v);
        int
    }
}

impl From<&num_bigint::BigInt> for BigInt {
    fn from(n: &num_bigint::BigInt) -> Self {
        let (sign, digits) = n.to_u32_digits();
        let mut int = BigInt::with_capacity(digits.len());
        int.assign_mag(&digits, sign == Sign::Minus);
        int
    }
}

impl From<&BigInt> for num_bigint::BigInt {
    fn from(a: &BigInt) -> Self {
        let sign = match a.sign() {
            0 => Sign::NoSign,
            1 => Sign::Plus,
            _ => Sign::Minus,
        };
        num_bigint::BigInt::from_slice(sign, a.mag())
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty => $ctor:ident),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(v: $t) -> Self {
                    BigInt::$ctor(v)
                }
            }
        )*
    };
}

impl_from_primitive!(u32 => from_u32, i32 => from_i32, u64 => from_u64, i64 => from_i64);

// Serialized as a decimal string.
impl From<BigInt> for String {
    fn from(a: BigInt) -> String {
        a.to_string()
    }
}

impl TryFrom<String> for BigInt {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
