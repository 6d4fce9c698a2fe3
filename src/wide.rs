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

//! Wide intermediates for mantissa arithmetic.
//!
//! Every operand mantissa is at most 87 bits, so products, aligned sums and
//! pre-scaled dividends are computed exactly in 256 bits before being
//! reduced back into the fixed mantissa.

use ethnum::U256;
use std::cmp::Ordering;

/// Powers of ten representable in `u128`.
pub static POWERS_10: [u128; 39] = {
    let mut table = [1u128; 39];
    let mut i = 1;
    while i < table.len() {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
};

/// Largest power of ten handed out by [`pow10`].
pub const MAX_POW10: u32 = 76;

pub const TWO: U256 = U256::new(2);
pub const TEN: U256 = U256::new(10);

/// Returns `10^exp`, `exp` must not exceed [`MAX_POW10`].
#[inline]
pub fn pow10(exp: u32) -> U256 {
    debug_assert!(exp <= MAX_POW10);
    if exp < POWERS_10.len() as u32 {
        U256::new(POWERS_10[exp as usize])
    } else {
        U256::new(POWERS_10[38]) * U256::new(POWERS_10[(exp - 38) as usize])
    }
}

/// Returns the low 128 bits.
#[inline(always)]
pub fn low(val: U256) -> u128 {
    val.into_words().1
}

/// Counts decimal digits of `val`, zero has one digit.
#[inline]
pub fn count_digits_u128(val: u128) -> u32 {
    match POWERS_10.binary_search(&val) {
        Ok(pos) => pos as u32 + 1,
        Err(pos) => (pos as u32).max(1),
    }
}

/// Counts decimal digits of `val`, zero has one digit.
#[inline]
pub fn count_digits(val: U256) -> u32 {
    let (high, low) = val.into_words();
    if high == 0 {
        return count_digits_u128(low);
    }

    let mut digits = POWERS_10.len() as u32;
    while digits <= MAX_POW10 && val >= pow10(digits) {
        digits += 1;
    }
    digits
}

/// Drops `count` least significant decimal digits.
///
/// Returns the truncated value and whether any dropped digit was nonzero.
#[inline]
pub fn drop_digits(val: U256, count: u32) -> (U256, bool) {
    if count == 0 {
        return (val, false);
    }
    if count > MAX_POW10 {
        return (U256::ZERO, val != U256::ZERO);
    }

    let divisor = pow10(count);
    (val / divisor, val % divisor != U256::ZERO)
}

/// Computes `(val * 10^exp) mod modulus` without materializing the power.
#[inline]
pub fn mul_pow10_rem(val: u128, exp: u32, modulus: u128) -> u128 {
    debug_assert_ne!(modulus, 0);

    let modulus_wide = U256::new(modulus);
    let mut rem = val % modulus;
    let mut left = exp;
    while left > 0 && rem != 0 {
        let step = left.min(38);
        rem = low(U256::new(rem) * U256::new(POWERS_10[step as usize]) % modulus_wide);
        left -= step;
    }
    rem
}

/// Compares `left * 10^left_exp` with `right * 10^right_exp`.
///
/// Both values must be below `2^89`.
#[inline]
pub fn cmp_scaled(left: U256, left_exp: i32, right: U256, right_exp: i32) -> Ordering {
    if left == U256::ZERO || right == U256::ZERO {
        return left.cmp(&right);
    }

    match left_exp.cmp(&right_exp) {
        Ordering::Equal => left.cmp(&right),
        Ordering::Greater => {
            let gap = (left_exp - right_exp) as u32;
            if gap > 50 {
                Ordering::Greater
            } else {
                (left * pow10(gap)).cmp(&right)
            }
        }
        Ordering::Less => cmp_scaled(right, right_exp, left, left_exp).reverse(),
    }
}
