//! Decimal and radix string conversion.
//!
//! Parsing folds 9-digit chunks in with a single-limb multiply-add. Printing
//! peels 13 digits per pass off a scratch copy of the magnitude: one division
//! by 5^13 and one 13-bit shift, the two partial remainders recombined into
//! the remainder modulo 10^13.

use crate::bigint::div::div_rem_limb;
use crate::bigint::BigInt;
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// 5^13, the odd part of 10^13.
const POW5_13: u32 = 1_220_703_125;
const POW10_9: u32 = 1_000_000_000;

/// Folds up to 9 ASCII digits into a word.
fn parse_chunk(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0u32, |acc, &c| acc * 10 + (c - b'0') as u32)
}

/// Divides the magnitude by 10^13, trimming it, and returns the remainder.
fn div_pow10_13(mag: &mut Vec<u32>) -> u64 {
    let r5 = div_rem_limb(mag, POW5_13) as u64;
    // quotient >> 13, keeping the bits shifted out
    let r2 = (mag[0] & 0x1fff) as u64;
    let mut hi = 0u32;
    for limb in mag.iter_mut().rev() {
        let w = *limb;
        *limb = w >> 13 | hi;
        hi = w << 19;
    }
    while mag.last() == Some(&0) {
        mag.pop();
    }
    r2 * POW5_13 as u64 + r5
}

impl BigInt {
    /// `|self| = |self| * mul + add` over `len` limbs. Returns the new length.
    pub(crate) fn mul_add_limb(&mut self, len: usize, mul: u32, add: u32) -> usize {
        let mut carry = add as u64;
        for limb in &mut self.val[1..=len] {
            let p = *limb as u64 * mul as u64 + carry;
            *limb = p as u32;
            carry = p >> 32;
        }
        if carry == 0 {
            return len;
        }
        self.reserve(len + 1, len + 2);
        self.val[len + 1] = carry as u32;
        len + 1
    }

    /// Assigns a decimal string: an optional sign followed by ASCII digits.
    ///
    /// The string is not validated; anything else is a caller bug, caught by
    /// an assertion in debug builds only. Use [`str::parse`] for checked
    /// parsing.
    pub fn assign_str(&mut self, s: &str) {
        let (neg, digits) = split_sign(s.as_bytes());
        debug_assert!(
            digits.iter().all(u8::is_ascii_digit),
            "malformed decimal string {s:?}"
        );
        self.assign_digits(neg, digits);
    }

    fn assign_digits(&mut self, neg: bool, digits: &[u8]) {
        let start = digits.iter().position(|&c| c != b'0').unwrap_or(digits.len());
        let digits = &digits[start..];
        let n = digits.len();
        if n == 0 {
            self.set_to_zero();
            return;
        }

        // ~3.322 bits per digit, rounded up to limbs, plus one spare
        let limbs = if n < 10 { 1 } else { ((n * 3402 >> 10) + 32) >> 5 } + 1;
        self.reserve(0, limbs + 1);

        let first = match n % 9 {
            0 => 9,
            r => r,
        };
        self.val[1] = parse_chunk(&digits[..first]);
        let mut len = 1;
        for chunk in digits[first..].chunks(9) {
            len = self.mul_add_limb(len, POW10_9, parse_chunk(chunk));
        }
        self.set_len(len, neg);
    }

    /// Parses `s` in `radix` (2 to 36), with an optional sign.
    pub fn parse_radix(s: &str, radix: u32) -> Result<BigInt, Error> {
        if !(2..=36).contains(&radix) {
            return Err(Error::InvalidRadix(radix));
        }
        let (neg, digits) = split_sign(s.as_bytes());
        if digits.is_empty() {
            return Err(Error::Empty);
        }
        let offset = s.len() - digits.len();
        for (i, c) in s[offset..].char_indices() {
            if c.to_digit(radix).is_none() {
                return Err(Error::InvalidDigit { index: offset + i, found: c });
            }
        }

        let mut int = BigInt::new();
        if radix == 10 {
            int.assign_digits(neg, digits);
            return Ok(int);
        }

        // Widest chunk whose value fits in a limb.
        let mut chunk_len = 1;
        while (radix as u64).pow(chunk_len as u32 + 1) <= u32::MAX as u64 {
            chunk_len += 1;
        }
        let bits_per_digit = 32 - radix.leading_zeros() as usize;
        int.reserve(0, digits.len() * bits_per_digit / 32 + 2);

        let mut len = 0;
        for chunk in digits.chunks(chunk_len) {
            let value = chunk.iter().fold(0u32, |acc, &c| {
                acc * radix + (c as char).to_digit(radix).unwrap_or_default()
            });
            len = int.mul_add_limb(len, radix.pow(chunk.len() as u32), value);
        }
        int.trim(len, neg);
        Ok(int)
    }

    /// Decimal digits of `|self|`.
    fn magnitude_digits(&self) -> String {
        let mut mag = self.mag().to_vec();
        if mag.is_empty() {
            return "0".to_string();
        }
        let mut chunks = Vec::with_capacity(mag.len() * 32 / 43 + 1);
        while !mag.is_empty() {
            chunks.push(div_pow10_13(&mut mag));
        }

        let mut out = String::with_capacity(chunks.len() * 13);
        let mut rev = chunks.iter().rev();
        if let Some(top) = rev.next() {
            out.push_str(&top.to_string());
        }
        for chunk in rev {
            out.push_str(&format!("{chunk:013}"));
        }
        out
    }
}

fn split_sign(s: &[u8]) -> (bool, &[u8]) {
    match s.first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

impl FromStr for BigInt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigInt::parse_radix(s, 10)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &self.magnitude_digits())
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({self})")
    }
}

impl BigInt {
    fn hex_digits(&self, upper: bool) -> String {
        let bytes: Vec<u8> = self.mag().iter().rev().flat_map(|l| l.to_be_bytes()).collect();
        let s = if upper { hex::encode_upper(bytes) } else { hex::encode(bytes) };
        match s.trim_start_matches('0') {
            "" => "0".to_string(),
            digits => digits.to_string(),
        }
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0x", &self.hex_digits(false))
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0x", &self.hex_digits(true))
    }
}

#[cfg(test)]
mod test {
    use crate::bigint::test_util::{random, reference};
    use crate::bigint::BigInt;
    use crate::error::Error;
    use num_traits::Num;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_to_string() {
        let mut prng = ChaCha20Rng::seed_from_u64(0);
        for bits in [1, 30, 43, 44, 64, 200, 1000, 5000] {
            for _ in 0..30 {
                let (a, ra) = random(&mut prng, bits);
                assert_eq!(a.to_string(), ra.to_string());
            }
        }
        assert_eq!(BigInt::new().to_string(), "0");
        assert_eq!(BigInt::from_u64(10_000_000_000_000).to_string(), "10000000000000");
        assert_eq!(BigInt::from_i64(i64::MIN).to_string(), i64::MIN.to_string());
    }

    #[test]
    fn test_assign_str() {
        let mut prng = ChaCha20Rng::seed_from_u64(1);
        let mut a = BigInt::new();
        for bits in [1, 29, 30, 31, 64, 200, 3000] {
            for _ in 0..30 {
                let (_, ra) = random(&mut prng, bits);
                a.assign_str(&ra.to_string());
                assert_eq!(reference(&a), ra);
            }
        }

        a.assign_str("-000000000000000000000123");
        assert_eq!(a, BigInt::from_i32(-123));
        a.assign_str("-0");
        assert!(a.is_zero());
        a.assign_str("+999999999");
        assert_eq!(a, BigInt::from_u32(999_999_999));
    }

    #[test]
    fn test_round_trip_scenario() {
        let s = "-123456789012345678901234567890";
        let a: BigInt = s.parse().unwrap();
        assert_eq!(a.to_string(), s);
        assert!(a.is_negative());

        for v in [0i64, 1, -1, i32::MAX as i64, i32::MIN as i64, u32::MAX as i64, i64::MAX, i64::MIN] {
            let a = BigInt::from_i64(v);
            assert_eq!(a.to_string().parse::<BigInt>().unwrap(), a);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<BigInt>(), Err(Error::Empty)));
        assert!(matches!("-".parse::<BigInt>(), Err(Error::Empty)));
        assert!(matches!(
            "12a4".parse::<BigInt>(),
            Err(Error::InvalidDigit { index: 2, found: 'a' })
        ));
        assert!(matches!(
            "-1é".parse::<BigInt>(),
            Err(Error::InvalidDigit { index: 2, found: 'é' })
        ));
        assert!(matches!(BigInt::parse_radix("1", 37), Err(Error::InvalidRadix(37))));
        assert!(matches!(BigInt::parse_radix("12", 2), Err(Error::InvalidDigit { index: 1, .. })));
    }

    #[test]
    fn test_parse_radix() {
        let mut prng = ChaCha20Rng::seed_from_u64(2);
        for _ in 0..200 {
            let radix = prng.gen_range(2..=36);
            let ra_bits = prng.gen_range(1..600);
            let (_, ra) = random(&mut prng, ra_bits);
            let s = ra.to_str_radix(radix);
            let a = BigInt::parse_radix(&s, radix).unwrap();
            assert_eq!(reference(&a), ra, "{s} in radix {radix}");
        }
        assert_eq!(BigInt::parse_radix("-00ff", 16).unwrap(), BigInt::from_i32(-255));
        assert!(BigInt::parse_radix("000", 7).unwrap().is_zero());
    }

    #[test]
    fn test_formatting() {
        let mut prng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..50 {
            let (a, ra) = random(&mut prng, 500);
            assert_eq!(format!("{a:x}"), format!("{ra:x}"));
            assert_eq!(format!("{a:#X}"), format!("{ra:#X}"));
            assert_eq!(reference(&BigInt::from_str_radix(&format!("{a:x}"), 16).unwrap()), ra);
        }
        let a = BigInt::from_i32(-12);
        assert_eq!(format!("{a:>6}"), "   -12");
        assert_eq!(format!("{a:06}"), "-00012");
        assert_eq!(format!("{:+}", BigInt::from_u32(7)), "+7");
        assert_eq!(format!("{:x}", BigInt::new()), "0");
        assert_eq!(format!("{a:?}"), "BigInt(-12)");
    }
}
