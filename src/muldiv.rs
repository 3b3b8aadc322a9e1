// Copyright (c) 2021 Quark Container Authors / 2018 The gVisor Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use core::str::FromStr;

use super::common::*;

const LOW_MASK: u64 = 0xffff_ffff;

// Strategy selects how the 128-bit intermediate of a rescale is evaluated.
//
// Both strategies return identical results for every input; they differ only
// in speed. Portable works on pairs of u64 words and is the reference
// behavior. Native leans on the compiler's u128 multiply/divide, which maps to
// MULQ/DIVQ style instructions on 64-bit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Portable,
    Native,
}

impl Default for Strategy {
    fn default() -> Self {
        if cfg!(feature = "native-u128") {
            return Self::Native;
        }

        return Self::Portable;
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "portable" => Ok(Self::Portable),
            "native" => Ok(Self::Native),
            _ => Err(Error::InvalidInput(format!(
                "unknown strategy {}, expect portable or native",
                s
            ))),
        }
    }
}

// mul_wide multiplies two 64-bit numbers and returns the 128-bit product as
// (high word, low word).
#[inline(always)]
pub fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let (aHi, aLo) = (a >> 32, a & LOW_MASK);
    let (bHi, bLo) = (b >> 32, b & LOW_MASK);

    let loLo = aLo * bLo;
    let hiLo = aHi * bLo;
    let loHi = aLo * bHi;
    let hiHi = aHi * bHi;

    // at most (2^32 - 1) + (2^32 - 1) + (2^32 - 1)^2, which is u64::MAX
    let cross = (loLo >> 32) + (hiLo & LOW_MASK) + loHi;

    let high = hiHi + (hiLo >> 32) + (cross >> 32);
    let low = (cross << 32) | (loLo & LOW_MASK);
    return (high, low);
}

// div_wide divides the 128-bit number high:low by divisor and returns
// (quotient, remainder).
//
// It requires high < divisor so that the quotient fits in 64 bits; this is the
// same condition DIVQ checks before it raises #DE.
#[inline]
pub fn div_wide(high: u64, low: u64, divisor: u64) -> Result<(u64, u64)> {
    if divisor == 0 {
        return Err(Error::DivisionByZero);
    }

    if high >= divisor {
        return Err(Error::Overflow);
    }

    let mut rem = high;
    let mut quot = 0u64;
    for i in (0..64).rev() {
        // rem < divisor holds here, so 2 * rem + 1 < 2^65 and a single
        // conditional subtraction restores it.
        let carry = rem >> 63;
        rem = (rem << 1) | ((low >> i) & 1);
        quot <<= 1;
        if carry != 0 || rem >= divisor {
            rem = rem.wrapping_sub(divisor);
            quot |= 1;
        }
    }

    return Ok((quot, rem));
}

/// Computes `floor(num * mul / div)` as if `num * mul` were evaluated with
/// unbounded precision.
///
/// The numerator is split against the divisor before multiplying:
///
/// ```text
/// rem    = num % div
/// result = (num / div) * mul + (rem * mul) / div
/// ```
///
/// The second term is evaluated with a 128-bit intermediate, so it never
/// overflows. When the exact quotient itself is larger than `u64::MAX` the
/// result wraps modulo 2^64, like any other fixed-width unsigned arithmetic.
/// Callers rescaling timestamps with extreme factors should use [`muldiv64`]
/// if a wrapped value would be a bug.
///
/// Returns [`Error::DivisionByZero`] when `div` is zero.
///
/// ```
/// use timescale::rescale_div_mod;
///
/// assert_eq!(rescale_div_mod(1000, 3, 7), Ok(428));
/// assert_eq!(rescale_div_mod(u64::MAX, 2, 3), Ok(12297829382473034410));
/// ```
#[inline]
pub fn rescale_div_mod(num: u64, mul: u64, div: u64) -> Result<u64> {
    return rescale_div_mod_with(Strategy::default(), num, mul, div);
}

/// Same as [`rescale_div_mod`] with an explicit evaluation strategy.
#[inline]
pub fn rescale_div_mod_with(strategy: Strategy, num: u64, mul: u64, div: u64) -> Result<u64> {
    if div == 0 {
        return Err(Error::DivisionByZero);
    }

    match strategy {
        Strategy::Portable => {
            let rem = num % div;
            let (high, low) = mul_wide(rem, mul);
            // rem < div, so high < div and the quotient is below mul
            let (tail, _) = div_wide(high, low, div)?;
            return Ok((num / div).wrapping_mul(mul).wrapping_add(tail));
        }
        Strategy::Native => {
            let val = num as u128 * mul as u128;
            return Ok((val / div as u128) as u64);
        }
    }
}

// muldiv64 multiplies two 64-bit numbers, then divides the result by another
// 64-bit number.
//
// It requires that the result fit in 64 bits, but doesn't require that
// intermediate values do; in particular, the result of the multiplication may
// require 128 bits.
//
// It returns Overflow if the result does not fit in 64 bits and
// DivisionByZero if divisor is zero.
#[inline]
pub fn muldiv64(value: u64, multiplier: u64, divisor: u64) -> Result<u64> {
    return muldiv64_with(Strategy::default(), value, multiplier, divisor);
}

pub fn muldiv64_with(strategy: Strategy, value: u64, multiplier: u64, divisor: u64) -> Result<u64> {
    if divisor == 0 {
        return Err(Error::DivisionByZero);
    }

    match strategy {
        Strategy::Portable => {
            let rem = value % divisor;
            let (high, low) = mul_wide(rem, multiplier);
            let (tail, _) = div_wide(high, low, divisor)?;
            return (value / divisor)
                .checked_mul(multiplier)
                .and_then(|head| head.checked_add(tail))
                .ok_or(Error::Overflow);
        }
        Strategy::Native => {
            let val = value as u128 * multiplier as u128;
            let res = val / divisor as u128;
            if res > u64::MAX as u128 {
                return Err(Error::Overflow);
            }

            return Ok(res as u64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [Strategy; 2] = [Strategy::Portable, Strategy::Native];

    fn oracle(num: u64, mul: u64, div: u64) -> u64 {
        return ((num as u128 * mul as u128) / div as u128) as u64;
    }

    #[test]
    fn test_mul_wide() {
        assert_eq!(mul_wide(0, u64::MAX), (0, 0));
        assert_eq!(mul_wide(1 << 32, 1 << 32), (1, 0));
        assert_eq!(mul_wide(u64::MAX, u64::MAX), (u64::MAX - 1, 1));
        assert_eq!(mul_wide(u64::MAX, 2), (1, u64::MAX - 1));
    }

    #[test]
    fn test_div_wide() {
        assert_eq!(div_wide(0, 3000, 7), Ok((428, 4)));
        assert_eq!(div_wide(1, 0, 2), Ok((1 << 63, 0)));
        assert_eq!(div_wide(u64::MAX - 1, 1, u64::MAX), Ok((u64::MAX, 0)));
        assert_eq!(div_wide(5, 0, 5), Err(Error::Overflow));
        assert_eq!(div_wide(0, 1, 0), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_rescale_div_mod() {
        for &s in STRATEGIES.iter() {
            assert_eq!(rescale_div_mod_with(s, 1000, 3, 7), Ok(428));
            assert_eq!(rescale_div_mod_with(s, 0, 5, 10), Ok(0));
            assert_eq!(
                rescale_div_mod_with(s, 18446744073709551615, 2, 3),
                Ok(12297829382473034410)
            );
            assert_eq!(rescale_div_mod_with(s, 7, 5, 0), Err(Error::DivisionByZero));
            assert_eq!(rescale_div_mod_with(s, 5, 9, 9), Ok(5));
        }
    }

    #[test]
    fn test_rescale_div_mod_edges() {
        for &s in STRATEGIES.iter() {
            assert_eq!(rescale_div_mod_with(s, 12345, 0, 77), Ok(0));
            assert_eq!(rescale_div_mod_with(s, 12345, 1, 77), Ok(12345 / 77));
            assert_eq!(rescale_div_mod_with(s, u64::MAX, u64::MAX, u64::MAX), Ok(u64::MAX));
            assert_eq!(rescale_div_mod_with(s, u64::MAX, 1, 1), Ok(u64::MAX));
        }
    }

    #[test]
    fn test_rescale_div_mod_large_remainder() {
        // rem * mul does not fit in 64 bits
        let div = u64::MAX - 1;
        let num = u64::MAX - 2;
        let mul = u64::MAX - 3;
        for &s in STRATEGIES.iter() {
            assert_eq!(rescale_div_mod_with(s, num, mul, div), Ok(oracle(num, mul, div)));
        }
    }

    #[test]
    fn test_rescale_div_mod_wraps() {
        // exact quotient is 2^65, which wraps to 0
        assert_eq!(rescale_div_mod_with(Strategy::Portable, 1 << 33, 1 << 33, 2), Ok(0));
        assert_eq!(rescale_div_mod_with(Strategy::Native, 1 << 33, 1 << 33, 2), Ok(0));
        assert_eq!(
            rescale_div_mod_with(Strategy::Portable, u64::MAX, u64::MAX, 3),
            rescale_div_mod_with(Strategy::Native, u64::MAX, u64::MAX, 3)
        );
    }

    #[test]
    fn test_muldiv64() {
        for &s in STRATEGIES.iter() {
            assert_eq!(muldiv64_with(s, 3_000_000_000, 1_000_000_000, 3_000_000_000), Ok(1_000_000_000));
            assert_eq!(muldiv64_with(s, u64::MAX, 2, 3), Ok(12297829382473034410));
            assert_eq!(muldiv64_with(s, u64::MAX, 2, 1), Err(Error::Overflow));
            assert_eq!(muldiv64_with(s, 1 << 33, 1 << 33, 2), Err(Error::Overflow));
            assert_eq!(muldiv64_with(s, 1, 1, 0), Err(Error::DivisionByZero));
        }
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("portable".parse::<Strategy>(), Ok(Strategy::Portable));
        assert_eq!("Native".parse::<Strategy>(), Ok(Strategy::Native));
        assert!("asm".parse::<Strategy>().is_err());
    }
}
