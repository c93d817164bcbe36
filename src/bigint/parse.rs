//! Decimal string conversion.

use super::BigInt;
use std::fmt;
use std::str::FromStr;

const CHUNK: u64 = 1_000_000_000; // 10^9 < 2^30, so it is a single base-2^30 "digit"

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBigIntError(String);

impl fmt::Display for ParseBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid integer literal: {}", self.0)
    }
}
impl std::error::Error for ParseBigIntError {}

impl BigInt {
    /// Parses a base-10 string, optionally signed.
    pub fn from_decimal_str(s: &str) -> Result<Self, ParseBigIntError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseBigIntError(s.to_string()));
        }
        let (negative, digits_str) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if digits_str.is_empty() || !digits_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseBigIntError(s.to_string()));
        }

        let mut acc = BigInt::zero();
        let ten = BigInt::from(10i64);
        for byte in digits_str.bytes() {
            let digit = (byte - b'0') as i64;
            acc = acc.mul(&ten).add(&BigInt::from(digit));
        }
        if negative && !acc.is_zero() {
            acc = acc.neg();
        }
        Ok(acc)
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigInt::from_decimal_str(s)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        if self.is_negative() {
            write!(f, "-")?;
        }
        let mut mag = self.abs();
        let chunk_divisor = BigInt::from(CHUNK as i64);
        let mut chunks = Vec::new();
        while !mag.is_zero() {
            let (q, r) = mag.div_rem(&chunk_divisor).expect("nonzero divisor");
            chunks.push(r.digits.first().copied().unwrap_or(0));
            mag = q;
        }
        let mut iter = chunks.iter().rev();
        write!(f, "{}", iter.next().unwrap())?;
        for chunk in iter {
            write!(f, "{:09}", chunk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_large_numbers() {
        let s = "123456789012345678901234567890";
        let n = BigInt::from_decimal_str(s).unwrap();
        assert_eq!(n.to_string(), s);

        let neg = BigInt::from_decimal_str("-987654321098765432109876543210").unwrap();
        assert_eq!(neg.to_string(), "-987654321098765432109876543210");
    }

    #[test]
    fn rejects_garbage() {
        assert!(BigInt::from_decimal_str("12x3").is_err());
        assert!(BigInt::from_decimal_str("").is_err());
    }

    #[test]
    fn negative_zero_normalizes() {
        assert_eq!(BigInt::from_decimal_str("-0").unwrap(), BigInt::zero());
    }
}
