// Copyright 2021 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Deci implementation.

use crate::error::DeciError;
use crate::wide::{self, POWERS_10, TEN};
use ethnum::U256;
use stack_buf::StackVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;

/// Maximum mantissa of `Deci`, i.e. `2^87 - 1`.
pub const MAX_MANTISSA: u128 = (1 << 87) - 1;
/// Minimum exponent of `Deci`.
pub const MIN_EXPONENT: i8 = i8::MIN;
/// Maximum exponent of `Deci`.
pub const MAX_EXPONENT: i8 = i8::MAX;
/// Binary data size of `Deci`.
pub const BINARY_SIZE: usize = 12;
/// Maximum text size produced by [`Deci::to_text`] and [`Deci::format`].
pub const MAX_TEXT_SIZE: usize = 160;

/// Count of decimal digits of [`MAX_MANTISSA`].
pub(crate) const MAX_DIGITS: u32 = 27;
/// Exponent gaps beyond this are aligned by truncating the smaller-exponent operand.
pub(crate) const MAX_ALIGN: u32 = 50;
/// Significant digits an exact quotient carries before truncation.
const QUOTIENT_DIGITS: u32 = 28;

const HIGH_MASK: u32 = 0x007F_FFFF;
const SIGN_BIT: u32 = 1 << 23;
const EXP_SHIFT: u32 = 24;

const SIGN_SHIFT: u32 = 95;
const BINARY_EXP_SHIFT: u32 = 87;

pub(crate) type Buf = StackVec<u8, MAX_TEXT_SIZE>;

/// Fixed-width decimal, `(-1)^sign * mantissa * 10^exponent`.
///
/// The value occupies exactly 96 bits: two full mantissa limbs and a third
/// word holding the top 23 mantissa bits, the sign bit and the exponent.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct Deci {
    lo: u32,
    mid: u32,
    // bits 0..23: mantissa, bit 23: sign, bits 24..32: exponent
    hi: u32,
}

const _: () = assert!(std::mem::size_of::<Deci>() == BINARY_SIZE);

impl Deci {
    /// Zero value, i.e. `0`.
    pub const ZERO: Deci = Deci::from_parts_unchecked(0, 0, false);

    /// i.e. `1`.
    pub const ONE: Deci = Deci::from_parts_unchecked(1, 0, false);

    /// i.e. `-1`.
    pub const MINUS_ONE: Deci = Deci::from_parts_unchecked(1, 0, true);

    /// Largest value, i.e. `(2^87 - 1) * 10^127`.
    pub const MAX: Deci = Deci::from_parts_unchecked(MAX_MANTISSA, MAX_EXPONENT, false);

    /// Smallest value, i.e. `-(2^87 - 1) * 10^127`.
    pub const MIN: Deci = Deci::from_parts_unchecked(MAX_MANTISSA, MAX_EXPONENT, true);

    #[inline]
    pub(crate) const fn from_parts_unchecked(mantissa: u128, exponent: i8, negative: bool) -> Deci {
        Deci {
            lo: mantissa as u32,
            mid: (mantissa >> 32) as u32,
            hi: ((mantissa >> 64) as u32 & HIGH_MASK)
                | ((negative as u32) << 23)
                | ((exponent as u8 as u32) << EXP_SHIFT),
        }
    }

    /// Creates a `Deci` from parts.
    ///
    /// `mantissa` must not exceed [`MAX_MANTISSA`].
    #[inline]
    pub const fn from_parts(mantissa: u128, exponent: i8, negative: bool) -> Result<Deci, DeciError> {
        if mantissa > MAX_MANTISSA {
            return Err(DeciError::Overflow);
        }

        Ok(Deci::from_parts_unchecked(mantissa, exponent, negative))
    }

    /// Consumes the `Deci`, returning `(mantissa, exponent, negative)`.
    #[inline]
    pub const fn into_parts(self) -> (u128, i8, bool) {
        (self.mantissa(), self.exponent(), self.is_sign_negative())
    }

    /// Returns the mantissa limbs, lowest first. The last limb has at most 23 bits.
    #[inline]
    pub const fn limbs(&self) -> [u32; 3] {
        [self.lo, self.mid, self.hi & HIGH_MASK]
    }

    /// Returns the unsigned 87-bit mantissa.
    #[inline]
    pub const fn mantissa(&self) -> u128 {
        (self.lo as u128) | ((self.mid as u128) << 32) | (((self.hi & HIGH_MASK) as u128) << 64)
    }

    /// Returns the base-10 exponent.
    #[inline]
    pub const fn exponent(&self) -> i8 {
        (self.hi >> EXP_SHIFT) as u8 as i8
    }

    /// Returns `true` if the sign bit is set. Zero may carry either sign.
    #[inline]
    pub const fn is_sign_negative(&self) -> bool {
        self.hi & SIGN_BIT != 0
    }

    /// Returns `true` if the sign bit is clear.
    #[inline]
    pub const fn is_sign_positive(&self) -> bool {
        !self.is_sign_negative()
    }

    /// Checks if `self` is zero, regardless of sign and exponent.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.lo == 0 && self.mid == 0 && self.hi & HIGH_MASK == 0
    }

    /// Checks if both values have bit-identical mantissa, sign and exponent.
    ///
    /// Unlike `==`, `1.0` and `1` are not the same.
    #[inline]
    pub const fn is_same(&self, other: &Deci) -> bool {
        self.lo == other.lo && self.mid == other.mid && self.hi == other.hi
    }

    /// Clears the sign bit.
    #[inline]
    pub const fn abs(&self) -> Deci {
        Deci {
            hi: self.hi & !SIGN_BIT,
            ..*self
        }
    }

    /// Flips the sign bit.
    #[inline]
    pub const fn negate(&self) -> Deci {
        Deci {
            hi: self.hi ^ SIGN_BIT,
            ..*self
        }
    }

    /// Returns `-1`, `0` or `1` according to the sign of `self`.
    #[inline]
    pub const fn signum(&self) -> Deci {
        if self.is_zero() {
            Deci::ZERO
        } else if self.is_sign_negative() {
            Deci::MINUS_ONE
        } else {
            Deci::ONE
        }
    }

    /// Reduces a wide mantissa into the fixed fields.
    ///
    /// Excess digits are truncated, an exponent below [`MIN_EXPONENT`] is
    /// absorbed by dropping digits and an exponent above [`MAX_EXPONENT`] by
    /// growing the mantissa. Fails if the latter is impossible. A zero result
    /// is never negative.
    pub(crate) fn pack(mantissa: U256, exponent: i32, negative: bool) -> Result<Deci, DeciError> {
        let mut mantissa = mantissa;
        let mut exponent = exponent;
        let mut inexact = false;

        if mantissa > U256::new(MAX_MANTISSA) {
            let mut shift = wide::count_digits(mantissa) - MAX_DIGITS;
            let (m, lost) = wide::drop_digits(mantissa, shift);
            if m > U256::new(MAX_MANTISSA) {
                let (m2, lost2) = wide::drop_digits(m, 1);
                mantissa = m2;
                inexact = lost || lost2;
                shift += 1;
            } else {
                mantissa = m;
                inexact = lost;
            }
            exponent += shift as i32;
        }

        if exponent < MIN_EXPONENT as i32 {
            let (m, lost) = wide::drop_digits(mantissa, (MIN_EXPONENT as i32 - exponent) as u32);
            mantissa = m;
            inexact |= lost;
            exponent = MIN_EXPONENT as i32;
        }

        let mut mantissa = wide::low(mantissa);

        if exponent > MAX_EXPONENT as i32 {
            if mantissa == 0 {
                exponent = MAX_EXPONENT as i32;
            } else {
                while exponent > MAX_EXPONENT as i32 && mantissa <= MAX_MANTISSA / 10 {
                    mantissa *= 10;
                    exponent -= 1;
                }
                if exponent > MAX_EXPONENT as i32 {
                    tracing::debug!(mantissa, exponent, "deci exponent overflow");
                    return Err(DeciError::Overflow);
                }
            }
        }

        if inexact {
            tracing::trace!(mantissa, exponent, "deci precision loss");
        }

        Ok(Deci::from_parts_unchecked(mantissa, exponent as i8, negative && mantissa != 0))
    }

    /// Brings both mantissas to a common exponent, returning `(self, other, exponent)`.
    #[inline]
    fn align(&self, other: &Deci) -> (U256, U256, i32) {
        let (ea, eb) = (self.exponent() as i32, other.exponent() as i32);
        if ea >= eb {
            Deci::align_ordered(self.mantissa(), ea, other.mantissa(), eb)
        } else {
            let (b, a, exp) = Deci::align_ordered(other.mantissa(), eb, self.mantissa(), ea);
            (a, b, exp)
        }
    }

    #[inline]
    fn align_ordered(high: u128, high_exp: i32, low: u128, low_exp: i32) -> (U256, U256, i32) {
        debug_assert!(high_exp >= low_exp);

        let gap = (high_exp - low_exp) as u32;
        let shift = gap.min(MAX_ALIGN);
        let high = U256::new(high) * wide::pow10(shift);
        let (low, lost) = wide::drop_digits(U256::new(low), gap - shift);
        if lost {
            tracing::trace!(gap, "deci alignment truncated an operand");
        }

        (high, low, high_exp - shift as i32)
    }

    #[inline]
    fn add_internal(&self, other: &Deci, other_negative: bool) -> Result<Deci, DeciError> {
        if self.is_zero() && other.is_zero() {
            let exponent = self.exponent().min(other.exponent());
            return Ok(Deci::from_parts_unchecked(0, exponent, false));
        }

        // a single zero operand still aligns, so `0.00 + 1` is `1.00`
        let negative = self.is_sign_negative();
        let (a, b, exponent) = self.align(other);
        if negative == other_negative {
            return Deci::pack(a + b, exponent, negative);
        }

        match a.cmp(&b) {
            Ordering::Greater => Deci::pack(a - b, exponent, negative),
            Ordering::Less => Deci::pack(b - a, exponent, other_negative),
            Ordering::Equal => Deci::pack(U256::ZERO, exponent, false),
        }
    }

    /// Adds two decis.
    ///
    /// Operands are aligned to the smaller exponent; digits which do not fit
    /// the mantissa are truncated.
    #[inline]
    pub fn try_add(&self, other: Deci) -> Result<Deci, DeciError> {
        self.add_internal(&other, other.is_sign_negative())
    }

    /// Subtracts `other` from `self`.
    #[inline]
    pub fn try_sub(&self, other: Deci) -> Result<Deci, DeciError> {
        self.add_internal(&other, !other.is_sign_negative())
    }

    /// Multiplies two decis, truncating the product to the mantissa width.
    #[inline]
    pub fn try_mul(&self, other: Deci) -> Result<Deci, DeciError> {
        let negative = self.is_sign_negative() ^ other.is_sign_negative();
        let product = U256::new(self.mantissa()) * U256::new(other.mantissa());
        Deci::pack(
            product,
            self.exponent() as i32 + other.exponent() as i32,
            negative,
        )
    }

    /// Divides `self` by `other`.
    ///
    /// The quotient is truncated to the mantissa width. An exact quotient
    /// drops trailing zeros down to the exponent `self.exponent() - other.exponent()`.
    pub fn try_div(&self, other: Deci) -> Result<Deci, DeciError> {
        let divisor = other.mantissa();
        if divisor == 0 {
            tracing::debug!("deci division by zero");
            return Err(DeciError::DivideByZero);
        }

        let negative = self.is_sign_negative() ^ other.is_sign_negative();
        let ideal = self.exponent() as i32 - other.exponent() as i32;
        let dividend = self.mantissa();
        if dividend == 0 {
            return Deci::pack(U256::ZERO, ideal, negative);
        }

        let shift = (wide::count_digits_u128(divisor) + QUOTIENT_DIGITS)
            .saturating_sub(wide::count_digits_u128(dividend));
        let dividend = U256::new(dividend) * wide::pow10(shift);
        let divisor = U256::new(divisor);
        let mut quotient = dividend / divisor;
        let mut exponent = ideal - shift as i32;

        if dividend % divisor == U256::ZERO {
            while exponent < ideal && quotient % TEN == U256::ZERO {
                quotient /= TEN;
                exponent += 1;
            }
        } else {
            tracing::trace!(exponent, "deci quotient truncated");
        }

        Deci::pack(quotient, exponent, negative)
    }

    /// Computes the remainder of the truncated division of `self` by `other`.
    ///
    /// The result is exact and carries the sign of `self`.
    pub fn try_rem(&self, other: Deci) -> Result<Deci, DeciError> {
        let divisor = other.mantissa();
        if divisor == 0 {
            tracing::debug!("deci remainder by zero");
            return Err(DeciError::DivideByZero);
        }

        let dividend = self.mantissa();
        if dividend == 0 {
            return Ok(*self);
        }

        let (ea, eb) = (self.exponent(), other.exponent());
        let negative = self.is_sign_negative();
        if ea >= eb {
            let rem = wide::mul_pow10_rem(dividend, (ea as i32 - eb as i32) as u32, divisor);
            return Ok(Deci::from_parts_unchecked(rem, eb, negative && rem != 0));
        }

        let gap = (eb as i32 - ea as i32) as u32;
        if gap >= MAX_DIGITS {
            // the scaled divisor exceeds any mantissa
            return Ok(*self);
        }

        let divisor = U256::new(divisor) * wide::pow10(gap);
        let rem = wide::low(U256::new(dividend) % divisor);
        Ok(Deci::from_parts_unchecked(rem, ea, negative && rem != 0))
    }

    /// Multiplies `self` by `10^exp` by adjusting the exponent only.
    #[inline]
    pub fn ldexp(&self, exp: i32) -> Result<Deci, DeciError> {
        let exponent = (self.exponent() as i32)
            .checked_add(exp)
            .filter(|e| (MIN_EXPONENT as i32..=MAX_EXPONENT as i32).contains(e))
            .ok_or(DeciError::Overflow)?;

        Ok(Deci::from_parts_unchecked(
            self.mantissa(),
            exponent as i8,
            self.is_sign_negative(),
        ))
    }

    /// Re-expresses `self` at `exponent` if that can be done without losing digits.
    pub(crate) fn quantize(&self, exponent: i8) -> Deci {
        let (mantissa, current, negative) = self.into_parts();
        if mantissa == 0 {
            return Deci::from_parts_unchecked(0, exponent, negative);
        }

        match current.cmp(&exponent) {
            Ordering::Equal => *self,
            Ordering::Less => {
                let gap = (exponent as i32 - current as i32) as usize;
                if gap < POWERS_10.len() && mantissa % POWERS_10[gap] == 0 {
                    Deci::from_parts_unchecked(mantissa / POWERS_10[gap], exponent, negative)
                } else {
                    *self
                }
            }
            Ordering::Greater => {
                let gap = (current as i32 - exponent as i32) as usize;
                match POWERS_10.get(gap).and_then(|p| mantissa.checked_mul(*p)) {
                    Some(m) if m <= MAX_MANTISSA => Deci::from_parts_unchecked(m, exponent, negative),
                    _ => *self,
                }
            }
        }
    }

    /// Compares magnitudes, ignoring signs.
    #[inline]
    pub(crate) fn cmp_abs(&self, other: &Deci) -> Ordering {
        wide::cmp_scaled(
            U256::new(self.mantissa()),
            self.exponent() as i32,
            U256::new(other.mantissa()),
            other.exponent() as i32,
        )
    }

    /// Returns `true` if the integer part of `self` is even.
    #[inline]
    pub fn is_even(&self) -> bool {
        let (mantissa, exponent, _) = self.into_parts();
        match exponent.cmp(&0) {
            Ordering::Greater => true,
            Ordering::Equal => mantissa & 1 == 0,
            Ordering::Less => {
                let scale = -(exponent as i32) as usize;
                scale >= POWERS_10.len() || (mantissa / POWERS_10[scale]) & 1 == 0
            }
        }
    }

    /// Returns `true` if the integer part of `self` is odd.
    #[inline]
    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// Encodes `self` as the 12-byte big-endian word
    /// `sign (1 bit) | exponent (8 bits) | mantissa (87 bits)`.
    #[inline]
    pub fn to_binary(&self) -> [u8; BINARY_SIZE] {
        let word = ((self.is_sign_negative() as u128) << SIGN_SHIFT)
            | ((self.exponent() as u8 as u128) << BINARY_EXP_SHIFT)
            | self.mantissa();
        let bytes = word.to_be_bytes();

        let mut binary = [0; BINARY_SIZE];
        binary.copy_from_slice(&bytes[16 - BINARY_SIZE..]);
        binary
    }

    /// Decodes the 12-byte form produced by [`Deci::to_binary`].
    #[inline]
    pub fn from_binary(binary: &[u8; BINARY_SIZE]) -> Deci {
        let mut bytes = [0; 16];
        bytes[16 - BINARY_SIZE..].copy_from_slice(binary);
        let word = u128::from_be_bytes(bytes);

        Deci::from_parts_unchecked(
            word & MAX_MANTISSA,
            (word >> BINARY_EXP_SHIFT) as u8 as i8,
            (word >> SIGN_SHIFT) & 1 == 1,
        )
    }

    /// Encodes `self` to `writer` as binary bytes.
    /// Returns total size on success, which is always [`BINARY_SIZE`].
    #[inline]
    pub fn encode<W: io::Write>(&self, mut writer: W) -> io::Result<usize> {
        writer.write_all(&self.to_binary())?;
        Ok(BINARY_SIZE)
    }

    /// Decodes a `Deci` from binary bytes.
    ///
    /// Shorter input is treated as the low bytes of the word, longer input
    /// is cut to its first [`BINARY_SIZE`] bytes.
    #[inline]
    pub fn decode(bytes: &[u8]) -> Result<Deci, DeciError> {
        if bytes.is_empty() {
            return Err(DeciError::Invalid);
        }

        let len = bytes.len().min(BINARY_SIZE);
        let mut binary = [0; BINARY_SIZE];
        binary[BINARY_SIZE - len..].copy_from_slice(&bytes[..len]);
        Ok(Deci::from_binary(&binary))
    }

    /// Formats `self` as `[-][symbol]digits[point digits]`.
    ///
    /// Exactly `-exponent` digits follow the point.
    #[inline]
    pub fn format<W: fmt::Write>(&self, symbol: Option<char>, point: char, w: W) -> fmt::Result {
        self.fmt_internal(true, symbol, point, w)
    }

    /// Writes the text form into `buf`, returning the number of bytes written.
    pub fn to_text(&self, symbol: Option<char>, point: char, buf: &mut [u8]) -> Result<usize, DeciError> {
        let mut text = Buf::new();
        self.fmt_internal(true, symbol, point, &mut text)
            .map_err(|_| DeciError::Overflow)?;

        let text = text.as_slice();
        if text.len() > buf.len() {
            return Err(DeciError::Overflow);
        }
        buf[..text.len()].copy_from_slice(text);
        Ok(text.len())
    }

    pub(crate) fn fmt_internal<W: fmt::Write>(
        &self,
        append_sign: bool,
        symbol: Option<char>,
        point: char,
        mut w: W,
    ) -> fmt::Result {
        use std::fmt::Write;

        const ZERO_BUF: [u8; 128] = [b'0'; 128];

        if append_sign && self.is_sign_negative() {
            w.write_byte(b'-')?;
        }
        if let Some(symbol) = symbol {
            w.write_char(symbol)?;
        }

        let (mantissa, exponent, _) = self.into_parts();
        if mantissa == 0 && exponent >= 0 {
            return w.write_byte(b'0');
        }

        let mut buf = StackVec::<u8, 40>::new();
        write!(&mut buf, "{}", mantissa)?;
        let digits = buf.as_slice();

        if exponent >= 0 {
            w.write_bytes(digits)?;
            w.write_bytes(&ZERO_BUF[..exponent as usize])?;
            return Ok(());
        }

        let scale = -(exponent as i32) as usize;
        if digits.len() <= scale {
            w.write_byte(b'0')?;
            w.write_char(point)?;
            w.write_bytes(&ZERO_BUF[..scale - digits.len()])?;
            w.write_bytes(digits)?;
        } else {
            let (int_digits, frac_digits) = digits.split_at(digits.len() - scale);
            w.write_bytes(int_digits)?;
            w.write_char(point)?;
            w.write_bytes(frac_digits)?;
        }

        Ok(())
    }

    /// Mantissa and exponent with trailing zeros removed, zero maps to `(0, 0)`.
    #[inline]
    fn normalized_parts(&self) -> (u128, i32) {
        let (mut mantissa, exponent, _) = self.into_parts();
        if mantissa == 0 {
            return (0, 0);
        }

        let mut exponent = exponent as i32;
        while mantissa % 10 == 0 {
            mantissa /= 10;
            exponent += 1;
        }
        (mantissa, exponent)
    }
}

trait WriteExt: fmt::Write {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> fmt::Result {
        self.write_bytes(&[byte])
    }

    // Only ASCII digits and signs reach here.
    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> fmt::Result {
        let s = unsafe { std::str::from_utf8_unchecked(bytes) };
        self.write_str(s)
    }
}

impl<W: fmt::Write> WriteExt for W {}

impl fmt::Display for Deci {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = Buf::new();
        self.fmt_internal(false, None, '.', &mut buf)?;
        let str = unsafe { std::str::from_utf8_unchecked(buf.as_slice()) };
        f.pad_integral(self.is_sign_positive(), "", str)
    }
}

impl fmt::Debug for Deci {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Deci")
            .field("mantissa", &self.mantissa())
            .field("exponent", &self.exponent())
            .field("negative", &self.is_sign_negative())
            .finish()
    }
}

impl Default for Deci {
    #[inline]
    fn default() -> Self {
        Deci::ZERO
    }
}

impl PartialEq for Deci {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Deci {}

impl PartialEq<&Deci> for Deci {
    #[inline]
    fn eq(&self, other: &&Deci) -> bool {
        self.eq(*other)
    }
}

impl PartialEq<Deci> for &Deci {
    #[inline]
    fn eq(&self, other: &Deci) -> bool {
        (*self).eq(other)
    }
}

impl PartialOrd for Deci {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialOrd<&Deci> for Deci {
    #[inline]
    fn partial_cmp(&self, other: &&Deci) -> Option<Ordering> {
        self.partial_cmp(*other)
    }
}

impl PartialOrd<Deci> for &Deci {
    #[inline]
    fn partial_cmp(&self, other: &Deci) -> Option<Ordering> {
        (*self).partial_cmp(other)
    }
}

impl Ord for Deci {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        let left_negative = self.is_sign_negative() && !self.is_zero();
        let right_negative = other.is_sign_negative() && !other.is_zero();

        match (left_negative, right_negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.cmp_abs(other),
            (true, true) => other.cmp_abs(self),
        }
    }
}

impl Hash for Deci {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (mantissa, exponent) = self.normalized_parts();
        mantissa.hash(state);
        exponent.hash(state);
        (mantissa != 0 && self.is_sign_negative()).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deci(mantissa: u128, exponent: i8, negative: bool) -> Deci {
        Deci::from_parts(mantissa, exponent, negative).unwrap()
    }

    fn parse(s: &str) -> Deci {
        s.parse().unwrap()
    }

    #[test]
    fn test_layout() {
        let n = deci(MAX_MANTISSA, -3, true);
        assert_eq!(n.limbs(), [u32::MAX, u32::MAX, 0x007F_FFFF]);
        assert_eq!(n.into_parts(), (MAX_MANTISSA, -3, true));

        let n = deci((5 << 64) | (6 << 32) | 7, 127, false);
        assert_eq!(n.limbs(), [7, 6, 5]);
        assert_eq!(n.exponent(), 127);
        assert!(n.is_sign_positive());

        assert_eq!(Deci::from_parts(MAX_MANTISSA + 1, 0, false), Err(DeciError::Overflow));
        assert_eq!(deci(1, MIN_EXPONENT, false).exponent(), -128);
    }

    #[test]
    fn test_predicates() {
        assert!(Deci::ZERO.is_zero());
        assert!(deci(0, 5, true).is_zero());
        assert!(!Deci::ONE.is_zero());

        assert!(deci(100, 0, false) == deci(10, 1, false));
        assert!(!deci(100, 0, false).is_same(&deci(10, 1, false)));
        assert!(deci(100, 0, false).is_same(&deci(100, 0, false)));
        assert!(!deci(0, 0, true).is_same(&Deci::ZERO));
        assert_eq!(deci(0, 0, true), Deci::ZERO);
        assert_eq!(deci(0, 9, false), deci(0, -9, true));
    }

    #[test]
    fn test_sign_abs_negate() {
        let n = deci(1250, -2, true);
        assert_eq!(n.signum(), Deci::MINUS_ONE);
        assert_eq!(n.abs().signum(), Deci::ONE);
        assert_eq!(Deci::ZERO.signum(), Deci::ZERO);
        assert_eq!(deci(0, 0, true).signum(), Deci::ZERO);

        assert!(n.abs().is_same(&deci(1250, -2, false)));
        assert!(n.negate().is_same(&deci(1250, -2, false)));
        assert!(n.negate().negate().is_same(&n));
        assert!(Deci::ZERO.negate().is_same(&deci(0, 0, true)));
    }

    #[test]
    fn test_cmp() {
        macro_rules! assert_cmp {
            ($left: expr, $cmp: tt, $right: expr) => {{
                let l = parse($left);
                let r = parse($right);
                assert!(l $cmp r, "{} {} {}", l, stringify!($cmp), r);
            }};
        }

        assert_cmp!("0", ==, "0");
        assert_cmp!("0", ==, "-0.000");
        assert_cmp!("-1", <, "1");
        assert_cmp!("1", >, "-1");
        assert_cmp!("1.1", ==, "1.10");
        assert_cmp!("1.2", >, "1.1");
        assert_cmp!("-1.2", <, "-1.1");
        assert_cmp!("-1.2", <, "1.1");
        assert_cmp!("0", <, "0.001");
        assert_cmp!("-0.001", <, "0");
        assert_cmp!("1", <, "1e39");
        assert_cmp!("1e-100", <, "1e100");
        assert_cmp!("154742504910672534362390527", <, "1e27");
        assert_cmp!("154742504910672534362390527e100", >, "1e126");
        assert_cmp!("-154742504910672534362390527e100", <, "-1e126");
        assert!(Deci::MIN < Deci::MAX);
    }

    #[test]
    fn test_hash() {
        use std::collections::hash_map::DefaultHasher;

        fn hash(n: Deci) -> u64 {
            let mut hasher = DefaultHasher::new();
            n.hash(&mut hasher);
            hasher.finish()
        }

        assert_eq!(hash(deci(100, 0, false)), hash(deci(1, 2, false)));
        assert_eq!(hash(deci(0, 3, true)), hash(Deci::ZERO));
        assert_eq!(hash(parse("12.50")), hash(parse("12.5")));
        assert_ne!(hash(parse("12.5")), hash(parse("-12.5")));
    }

    #[test]
    fn test_add() {
        fn assert_add(val1: &str, val2: &str, expected: &str) {
            let result = parse(val1).try_add(parse(val2)).unwrap();
            assert_eq!(result.to_string(), expected, "{} + {}", val1, val2);
        }

        assert_add("1", "2", "3");
        assert_add("12.50", "0.5", "13.00");
        assert_add("-12.50", "0.5", "-12.00");
        assert_add("0.5", "-12.50", "-12.00");
        assert_add("-1", "-2.25", "-3.25");
        assert_add("1.5", "-1.50", "0.00");
        assert_add("0", "1.25", "1.25");
        assert_add("1.25", "0", "1.25");
        assert_add("0.00", "1", "1.00");
        assert_add("1", "0.00", "1.00");
        assert_add("-0.0", "1.5", "1.5");
        assert_add("0", "-0.000", "0.000");
        assert_add("1e3", "1", "1001");
        assert_add("99999999999999999999999999", "1", "100000000000000000000000000");
    }

    #[test]
    fn test_add_precision_loss() {
        // 2^87 - 1 plus one no longer fits, one digit is truncated
        let max = deci(MAX_MANTISSA, 0, false);
        let sum = max.try_add(Deci::ONE).unwrap();
        assert!(sum.is_same(&deci(15474250491067253436239052, 1, false)));

        // the small operand is truncated to the common exponent
        let big = deci(1, 100, false);
        let small = deci(1, 0, false);
        let sum = big.try_add(small).unwrap();
        assert_eq!(sum, big);
        assert_eq!(big.try_sub(small).unwrap(), big);

        // 1e26 + 0.000000001: the fraction falls below the mantissa width
        let sum = parse("100000000000000000000000000").try_add(parse("0.000000001")).unwrap();
        assert_eq!(sum, parse("100000000000000000000000000"));

        // the sign of the larger magnitude wins
        let diff = parse("1").try_sub(parse("1e60")).unwrap();
        assert!(diff.is_sign_negative());
    }

    #[test]
    fn test_add_overflow() {
        assert_eq!(Deci::MAX.try_add(Deci::MAX), Err(DeciError::Overflow));
        assert_eq!(Deci::MIN.try_sub(Deci::MAX), Err(DeciError::Overflow));
        assert_eq!(Deci::MAX.try_sub(Deci::MAX).unwrap(), Deci::ZERO);
    }

    #[test]
    fn test_sub() {
        fn assert_sub(val1: &str, val2: &str, expected: &str) {
            let result = parse(val1).try_sub(parse(val2)).unwrap();
            assert_eq!(result.to_string(), expected, "{} - {}", val1, val2);
        }

        assert_sub("3", "2", "1");
        assert_sub("2", "3", "-1");
        assert_sub("-2", "3", "-5");
        assert_sub("-2", "-3", "1");
        assert_sub("12.50", "12.5", "0.00");
        assert_sub("0", "1.5", "-1.5");
        assert_sub("0.00", "1", "-1.00");
        assert_sub("100", "0.01", "99.99");
    }

    #[test]
    fn test_mul() {
        fn assert_mul(val1: &str, val2: &str, expected: &str) {
            let result = parse(val1).try_mul(parse(val2)).unwrap();
            assert_eq!(result.to_string(), expected, "{} * {}", val1, val2);
        }

        assert_mul("3", "4", "12");
        assert_mul("-3", "4", "-12");
        assert_mul("-3", "-4", "12");
        assert_mul("1.5", "0.5", "0.75");
        assert_mul("12.50", "2", "25.00");
        assert_mul("0", "-4", "0");
        assert_mul("1e100", "1e-100", "1");

        // 174-bit product truncated back into the mantissa
        let max = deci(MAX_MANTISSA, 0, false);
        let square = max.try_mul(max).unwrap();
        assert!(square.mantissa() <= MAX_MANTISSA);
        assert_eq!(square.exponent(), 27);
        assert!(square.is_same(&deci(23945242826029513411849171, 27, false)));

        assert_eq!(parse("1e100").try_mul(parse("1e100")), Err(DeciError::Overflow));
        assert_eq!(parse("1e-100").try_mul(parse("1e-100")).unwrap(), Deci::ZERO);
    }

    #[test]
    fn test_div() {
        fn assert_div(val1: &str, val2: &str, expected: &str) {
            let result = parse(val1).try_div(parse(val2)).unwrap();
            assert_eq!(result.to_string(), expected, "{} / {}", val1, val2);
        }

        assert_div("12", "4", "3");
        assert_div("1", "8", "0.125");
        assert_div("-1", "8", "-0.125");
        assert_div("12.50", "2", "6.25");
        assert_div("12.50", "5", "2.50");
        assert_div("10", "0.5", "20");
        assert_div("0", "3", "0");
        assert_div("1", "3", "0.33333333333333333333333333");
        assert_div("2", "3", "0.66666666666666666666666666");
        assert_div("-1", "-3", "0.33333333333333333333333333");
        assert_div("100", "7", "14.2857142857142857142857142");

        assert_eq!(parse("1").try_div(Deci::ZERO), Err(DeciError::DivideByZero));
        assert_eq!(Deci::ZERO.try_div(deci(0, 3, true)), Err(DeciError::DivideByZero));
        assert_eq!(parse("1e100").try_div(parse("1e-100")), Err(DeciError::Overflow));
    }

    #[test]
    fn test_rem() {
        fn assert_rem(val1: &str, val2: &str, expected: &str) {
            let result = parse(val1).try_rem(parse(val2)).unwrap();
            assert_eq!(result.to_string(), expected, "{} % {}", val1, val2);
        }

        assert_rem("10", "3", "1");
        assert_rem("-10", "3", "-1");
        assert_rem("10", "-3", "1");
        assert_rem("1.5", "1", "0.5");
        assert_rem("1", "0.3", "0.1");
        assert_rem("12.34", "1.233", "0.010");
        assert_rem("5e42", "3", "2");
        assert_rem("5e42", "0.3", "0.2");
        assert_rem("3", "5e42", "3");
        assert_rem("0", "7", "0");
        assert_rem("100", "5", "0");
        assert_rem("-10", "5", "0");
        assert_rem("-1.5", "0.5", "0.0");
        assert_rem("-0.15", "5", "-0.15");

        // a zero remainder never keeps the dividend's sign
        assert!(!parse("-10").try_rem(parse("5")).unwrap().is_sign_negative());
        assert!(!parse("-1.5").try_rem(parse("0.5")).unwrap().is_sign_negative());
        assert!(!parse("-1").try_rem(parse("0.001")).unwrap().is_sign_negative());

        assert_eq!(parse("1").try_rem(Deci::ZERO), Err(DeciError::DivideByZero));
    }

    #[test]
    fn test_ldexp() {
        let n = deci(125, -2, false);
        assert!(n.ldexp(3).unwrap().is_same(&deci(125, 1, false)));
        assert!(n.ldexp(-126).unwrap().is_same(&deci(125, -128, false)));
        assert_eq!(n.ldexp(130), Err(DeciError::Overflow));
        assert_eq!(n.ldexp(-127), Err(DeciError::Overflow));
        assert_eq!(deci(1, 1, false).ldexp(i32::MAX), Err(DeciError::Overflow));
        assert_eq!(deci(1, -1, false).ldexp(i32::MIN), Err(DeciError::Overflow));
        assert_eq!(n.ldexp(i32::MIN), Err(DeciError::Overflow));
    }

    #[test]
    fn test_pack() {
        let n = Deci::pack(U256::new(MAX_MANTISSA) + U256::ONE, 0, false).unwrap();
        assert!(n.is_same(&deci(15474250491067253436239052, 1, false)));

        let n = Deci::pack(U256::new(12345), -130, false).unwrap();
        assert!(n.is_same(&deci(123, -128, false)));

        let n = Deci::pack(U256::new(12), 128, true).unwrap();
        assert!(n.is_same(&deci(120, 127, true)));

        assert_eq!(Deci::pack(U256::new(MAX_MANTISSA), 128, false), Err(DeciError::Overflow));
        assert!(Deci::pack(U256::ZERO, 300, false).unwrap().is_zero());
    }

    #[test]
    fn test_quantize() {
        assert!(deci(1200, -2, false).quantize(0).is_same(&deci(12, 0, false)));
        assert!(deci(1234, -2, false).quantize(0).is_same(&deci(1234, -2, false)));
        assert!(deci(12, 0, true).quantize(-2).is_same(&deci(1200, -2, true)));
        assert!(deci(MAX_MANTISSA, 0, false).quantize(-1).is_same(&deci(MAX_MANTISSA, 0, false)));
        assert!(Deci::ZERO.quantize(-2).is_same(&deci(0, -2, false)));
    }

    #[test]
    fn test_even_odd() {
        assert!(parse("4").is_even());
        assert!(parse("5").is_odd());
        assert!(parse("5.9").is_odd());
        assert!(parse("-6.1").is_even());
        assert!(parse("1e3").is_even());
        assert!(parse("0.5").is_even());
    }

    #[test]
    fn test_binary() {
        let n = deci(1, 0, false);
        assert_eq!(n.to_binary(), [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);

        let n = deci(0x0102_0304, -2, true);
        assert_eq!(n.to_binary(), [0xFF, 0x00, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4]);

        let n = deci(MAX_MANTISSA, 127, false);
        assert_eq!(n.to_binary(), [0x3F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);

        for n in &[
            Deci::ZERO,
            deci(0, 0, true),
            deci(0, -128, true),
            deci(MAX_MANTISSA, -128, true),
            Deci::MAX,
            Deci::MIN,
            parse("12.50"),
        ] {
            assert!(Deci::from_binary(&n.to_binary()).is_same(n));
        }
    }

    #[test]
    fn test_encoding() {
        let n = parse("-1234.5678");
        let mut buf = Vec::new();
        let size = n.encode(&mut buf).unwrap();
        assert_eq!(size, BINARY_SIZE);
        assert_eq!(buf.len(), size);
        assert!(Deci::decode(&buf).unwrap().is_same(&n));

        assert!(Deci::decode(&[5]).unwrap().is_same(&deci(5, 0, false)));
        assert!(Deci::decode(&[1, 0]).unwrap().is_same(&deci(256, 0, false)));
        let mut long = n.to_binary().to_vec();
        long.extend_from_slice(&[9, 9]);
        assert!(Deci::decode(&long).unwrap().is_same(&n));
        assert_eq!(Deci::decode(&[]), Err(DeciError::Invalid));
    }

    #[test]
    fn test_display() {
        fn assert_display(mantissa: u128, exponent: i8, negative: bool, expected: &str) {
            assert_eq!(deci(mantissa, exponent, negative).to_string(), expected);
        }

        assert_display(0, 0, false, "0");
        assert_display(0, 3, false, "0");
        assert_display(0, -2, false, "0.00");
        assert_display(100, 0, false, "100");
        assert_display(1, 2, false, "100");
        assert_display(1250, -2, false, "12.50");
        assert_display(1250, -2, true, "-12.50");
        assert_display(5, -3, false, "0.005");
        assert_display(123, -3, false, "0.123");
        assert_display(MAX_MANTISSA, 0, false, "154742504910672534362390527");
        assert_eq!(format!("{:>8}", deci(125, -2, true)), "   -1.25");
    }

    #[test]
    fn test_format() {
        fn assert_format(val: Deci, symbol: Option<char>, point: char, expected: &str) {
            let mut s = String::new();
            val.format(symbol, point, &mut s).unwrap();
            assert_eq!(s, expected);

            let mut buf = [0u8; MAX_TEXT_SIZE];
            let len = val.to_text(symbol, point, &mut buf).unwrap();
            assert_eq!(&buf[..len], expected.as_bytes());
        }

        assert_format(Deci::from(100i64), Some('$'), '.', "$100");
        assert_format(deci(1250, -2, false), Some('$'), ',', "$12,50");
        assert_format(deci(1250, -2, true), Some('$'), '.', "-$12.50");
        assert_format(deci(1250, -2, true), None, '.', "-12.50");
        assert_format(deci(5, -1, false), Some(' '), '.', " 0.5");

        let mut small = [0u8; 3];
        assert_eq!(deci(1250, -2, false).to_text(None, '.', &mut small), Err(DeciError::Overflow));
    }

    #[test]
    fn test_text_bounds() {
        let mut buf = [0u8; MAX_TEXT_SIZE];
        let len = Deci::MIN.to_text(Some('€'), '.', &mut buf).unwrap();
        assert_eq!(len, 1 + 3 + 27 + 127);

        let len = deci(MAX_MANTISSA, MIN_EXPONENT, true).to_text(Some('€'), '.', &mut buf).unwrap();
        assert_eq!(len, 1 + 3 + 2 + 128);
    }
}
