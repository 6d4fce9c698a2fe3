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

//! Deci parsing utilities.

use crate::deci::{Deci, MAX_MANTISSA};
use crate::error::{DeciError, DeciParseError};
use ethnum::U256;
use std::str::FromStr;

const GROUP_SEPARATOR: u8 = b'\'';

/// Exponent magnitudes are saturated here, far outside any representable value.
const MAX_EXP_MAGNITUDE: i32 = 1_000_000;

/// Currency symbol and decimal point the parser recognizes.
#[derive(Debug, Clone, Copy)]
struct Notation<'a> {
    /// Skipped once after the sign. Empty if there is no symbol.
    symbol: &'a [u8],
    /// `None` accepts both `.` and `,`.
    point: Option<&'a [u8]>,
}

const DEFAULT_NOTATION: Notation<'static> = Notation {
    symbol: b"$",
    point: None,
};

impl<'a> Notation<'a> {
    #[inline]
    fn eat_symbol<'s>(&self, s: &'s [u8]) -> &'s [u8] {
        if !self.symbol.is_empty() && s.starts_with(self.symbol) {
            &s[self.symbol.len()..]
        } else {
            s
        }
    }

    /// Returns the bytes after a leading decimal point, if any.
    #[inline]
    fn eat_point<'s>(&self, s: &'s [u8]) -> Option<&'s [u8]> {
        match self.point {
            Some(point) if s.starts_with(point) => Some(&s[point.len()..]),
            Some(_) => None,
            None => match s.split_first() {
                Some((&b, rest)) if b == b'.' || b == b',' => Some(rest),
                _ => None,
            },
        }
    }
}

#[derive(Debug, PartialEq)]
enum Sign {
    Positive,
    Negative,
}

/// Mantissa accumulated from consumed digits.
#[derive(Debug, Default)]
struct Digits {
    mantissa: u128,
    count: usize,
    // set once a digit did not fit, every later digit is dropped too
    full: bool,
}

impl Digits {
    /// Appends a digit, returns `false` if it was dropped.
    #[inline]
    fn push(&mut self, digit: u8) -> bool {
        debug_assert!(digit.is_ascii_digit());

        self.count += 1;
        if self.full {
            return false;
        }

        let d = (digit - b'0') as u128;
        if self.mantissa <= (MAX_MANTISSA - d) / 10 {
            self.mantissa = self.mantissa * 10 + d;
            true
        } else {
            self.full = true;
            false
        }
    }
}

/// Splits a number string bytes into sign and the rest, without inspecting or validating the rest.
#[inline]
fn extract_sign(s: &[u8]) -> (Sign, &[u8]) {
    match s.first() {
        Some(b'+') => (Sign::Positive, &s[1..]),
        Some(b'-') => (Sign::Negative, &s[1..]),
        _ => (Sign::Positive, s),
    }
}

/// Carves off decimal digits up to the first non-digit character.
#[inline]
fn eat_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let i = s.iter().take_while(|&i| i.is_ascii_digit()).count();
    (&s[..i], &s[i..])
}

/// Carves off whitespaces up to the first non-whitespace character.
#[inline]
fn eat_whitespaces(s: &[u8]) -> &[u8] {
    let i = s.iter().take_while(|&i| i.is_ascii_whitespace()).count();
    &s[i..]
}

#[inline]
fn starts_with_digit(s: &[u8]) -> bool {
    s.first().map_or(false, u8::is_ascii_digit)
}

/// Consumes integral digits and group separators standing between two digits.
///
/// Each dropped digit raises the exponent by one.
fn eat_integral<'a>(s: &'a [u8], digits: &mut Digits, exp: &mut i32) -> &'a [u8] {
    let mut i = 0;
    while i < s.len() {
        match s[i] {
            b @ b'0'..=b'9' => {
                if !digits.push(b) {
                    *exp = exp.saturating_add(1);
                }
            }
            GROUP_SEPARATOR if i > 0 && s[i - 1].is_ascii_digit() && starts_with_digit(&s[i + 1..]) => {}
            _ => break,
        }
        i += 1;
    }
    &s[i..]
}

/// Consumes fractional digits. Each kept digit lowers the exponent by one.
fn eat_fractional<'a>(s: &'a [u8], digits: &mut Digits, exp: &mut i32) -> &'a [u8] {
    let (fractional, s) = eat_digits(s);
    for &b in fractional {
        if digits.push(b) {
            *exp -= 1;
        }
    }
    s
}

/// Extracts exponent, if any.
///
/// A marker not followed by at least one digit is left unconsumed.
fn extract_exponent(s: &[u8]) -> (i32, &[u8]) {
    match s.first() {
        Some(&b'e') | Some(&b'E') => {}
        _ => return (0, s),
    }

    let (sign, rest) = extract_sign(&s[1..]);
    let (number, rest) = eat_digits(rest);
    if number.is_empty() {
        return (0, s);
    }

    let value = number
        .iter()
        .fold(0i32, |acc, &n| (acc * 10 + (n - b'0') as i32).min(MAX_EXP_MAGNITUDE));

    match sign {
        Sign::Positive => (value, rest),
        Sign::Negative => (-value, rest),
    }
}

/// Parses a number at the start of a string bytes.
///
/// This function does not handle leading or trailing spaces. It returns the
/// remaining string bytes so that caller can check for trailing garbage.
#[inline]
pub(crate) fn parse_str(s: &[u8]) -> Result<(Deci, &[u8]), DeciParseError> {
    parse_with(s, &DEFAULT_NOTATION)
}

fn parse_with<'s>(s: &'s [u8], notation: &Notation) -> Result<(Deci, &'s [u8]), DeciParseError> {
    let (sign, s) = extract_sign(s);
    let s = notation.eat_symbol(s);

    let mut digits = Digits::default();
    let mut exp = 0i32;

    let s = eat_integral(s, &mut digits, &mut exp);
    let s = match notation.eat_point(s) {
        Some(rest) if digits.count > 0 || starts_with_digit(rest) => eat_fractional(rest, &mut digits, &mut exp),
        _ => s,
    };

    if digits.count == 0 {
        return Err(DeciParseError::Invalid);
    }
    if digits.full {
        tracing::trace!(digits = digits.count, "deci literal truncated");
    }

    let (e, s) = extract_exponent(s);
    let n = Deci::pack(U256::new(digits.mantissa), exp + e, sign == Sign::Negative)
        .map_err(|_| DeciParseError::Overflow)?;

    Ok((n, s))
}

/// Parses a string slice and creates a deci.
///
/// This function handles leading or trailing spaces.
#[inline]
fn from_str(s: &str) -> Result<Deci, DeciParseError> {
    let s = eat_whitespaces(s.as_bytes());
    if s.is_empty() {
        return Err(DeciParseError::Empty);
    }

    let (n, s) = parse_str(s)?;

    if s.iter().any(|n| !n.is_ascii_whitespace()) {
        return Err(DeciParseError::Invalid);
    }

    Ok(n)
}

impl Deci {
    /// Parses the longest number at the start of `s`.
    ///
    /// Accepts `[+-][$]digits['digits...][(.|,)digits][(e|E)[+-]digits]`.
    /// Returns the value and the count of bytes consumed, which is `0` if
    /// `s` does not start with a number. Leading spaces are not skipped.
    /// Digits beyond the mantissa width are consumed and truncated.
    ///
    /// # Errors
    ///
    /// [`DeciError::Overflow`] if the number is too large to represent.
    #[inline]
    pub fn parse_prefix(s: &[u8]) -> Result<(Deci, usize), DeciError> {
        prefix_with(s, &DEFAULT_NOTATION)
    }

    /// Parses the longest number at the start of `s`, written the way
    /// [`Deci::format`] writes it with the same `symbol` and `point`.
    ///
    /// Only `point` separates the fraction. Otherwise this behaves like
    /// [`Deci::parse_prefix`], which is `parse_prefix_with(s, Some('$'), '.')`
    /// that also accepts `,` as the point.
    ///
    /// # Errors
    ///
    /// [`DeciError::Overflow`] if the number is too large to represent.
    pub fn parse_prefix_with(s: &[u8], symbol: Option<char>, point: char) -> Result<(Deci, usize), DeciError> {
        let mut symbol_buf = [0u8; 4];
        let mut point_buf = [0u8; 4];
        let symbol = match symbol {
            Some(c) => c.encode_utf8(&mut symbol_buf).as_bytes(),
            None => &[],
        };
        let notation = Notation {
            symbol,
            point: Some(point.encode_utf8(&mut point_buf).as_bytes()),
        };
        prefix_with(s, &notation)
    }
}

#[inline]
fn prefix_with(s: &[u8], notation: &Notation) -> Result<(Deci, usize), DeciError> {
    match parse_with(s, notation) {
        Ok((n, rest)) => Ok((n, s.len() - rest.len())),
        Err(DeciParseError::Overflow) => Err(DeciError::Overflow),
        Err(_) => Ok((Deci::ZERO, 0)),
    }
}

impl FromStr for Deci {
    type Err = DeciParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s)
    }
}
