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

//! Rounding to a multiple of a scale.

use crate::deci::{Deci, MAX_DIGITS};
use crate::error::DeciError;
use crate::wide::{self, TWO};
use ethnum::U256;
use std::cmp::Ordering;

/// Policy used by [`Deci::round_to`] to pick between the two multiples of
/// the scale surrounding a value.
///
/// With a scale of `1`:
///
/// | mode           |  2.5 |  3.5 | -2.5 |  2.4 | -2.6 |
/// |----------------|------|------|------|------|------|
/// | `Truncate`     |    2 |    3 |   -2 |    2 |   -2 |
/// | `Away`         |    3 |    4 |   -3 |    3 |   -3 |
/// | `Floor`        |    2 |    3 |   -3 |    2 |   -3 |
/// | `Ceil`         |    3 |    4 |   -2 |    3 |   -2 |
/// | `HalfEven`     |    2 |    4 |   -2 |    2 |   -3 |
/// | `HalfAway`     |    3 |    4 |   -3 |    2 |   -3 |
/// | `HalfTruncate` |    2 |    3 |   -2 |    2 |   -3 |
/// | `HalfCeil`     |    3 |    4 |   -2 |    2 |   -3 |
/// | `HalfFloor`    |    2 |    3 |   -3 |    2 |   -3 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Toward zero.
    Truncate,
    /// Away from zero.
    Away,
    /// Toward negative infinity.
    Floor,
    /// Toward positive infinity.
    Ceil,
    /// To nearest, ties to the even multiple.
    HalfEven,
    /// To nearest, ties away from zero.
    HalfAway,
    /// To nearest, ties toward zero.
    HalfTruncate,
    /// To nearest, ties toward positive infinity.
    HalfCeil,
    /// To nearest, ties toward negative infinity.
    HalfFloor,
}

impl Default for RoundingMode {
    #[inline]
    fn default() -> Self {
        RoundingMode::HalfAway
    }
}

impl Deci {
    /// Rounds `self` to a multiple of `scale` according to `mode`.
    ///
    /// Only the magnitude of `scale` matters. The result is written at the
    /// exponent of `scale` whenever that is exact, so rounding `12.345` to
    /// `0.01` gives `12.35` rather than `12.350`.
    ///
    /// # Errors
    ///
    /// [`DeciError::DivideByZero`] if `scale` is zero, [`DeciError::Overflow`]
    /// if the chosen multiple is out of range.
    pub fn round_to(&self, scale: Deci, mode: RoundingMode) -> Result<Deci, DeciError> {
        if scale.is_zero() {
            return Err(DeciError::DivideByZero);
        }

        let scale = scale.abs();
        let rem = self.try_rem(scale)?;
        if rem.is_zero() {
            return Ok(self.quantize(scale.exponent()));
        }

        let negative = self.is_sign_negative();
        let truncated = self.try_sub(rem)?;

        let away = match mode {
            RoundingMode::Truncate => false,
            RoundingMode::Away => true,
            RoundingMode::Floor => negative,
            RoundingMode::Ceil => !negative,
            _ => match cmp_half(&rem, &scale) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => match mode {
                    RoundingMode::HalfEven => self.is_quotient_odd(&scale),
                    RoundingMode::HalfTruncate => false,
                    RoundingMode::HalfCeil => !negative,
                    RoundingMode::HalfFloor => negative,
                    _ => true,
                },
            },
        };

        let rounded = if away {
            let step = if negative { scale.negate() } else { scale };
            truncated.try_add(step)?
        } else {
            truncated
        };

        Ok(rounded.quantize(scale.exponent()))
    }

    /// Rounds to the nearest integer, ties away from zero.
    #[inline]
    pub fn round(&self) -> Result<Deci, DeciError> {
        self.round_to(Deci::ONE, RoundingMode::HalfAway)
    }

    /// Rounds toward zero to a multiple of `scale`.
    #[inline]
    pub fn truncate(&self, scale: Deci) -> Result<Deci, DeciError> {
        self.round_to(scale, RoundingMode::Truncate)
    }

    /// Rounds away from zero to a multiple of `scale`.
    #[inline]
    pub fn away(&self, scale: Deci) -> Result<Deci, DeciError> {
        self.round_to(scale, RoundingMode::Away)
    }

    /// Rounds toward negative infinity to a multiple of `scale`.
    #[inline]
    pub fn floor(&self, scale: Deci) -> Result<Deci, DeciError> {
        self.round_to(scale, RoundingMode::Floor)
    }

    /// Rounds toward positive infinity to a multiple of `scale`.
    #[inline]
    pub fn ceil(&self, scale: Deci) -> Result<Deci, DeciError> {
        self.round_to(scale, RoundingMode::Ceil)
    }

    /// Rounds to the nearest multiple of `scale`, ties to the even multiple.
    #[inline]
    pub fn half_even(&self, scale: Deci) -> Result<Deci, DeciError> {
        self.round_to(scale, RoundingMode::HalfEven)
    }

    /// Rounds to the nearest multiple of `scale`, ties away from zero.
    #[inline]
    pub fn half_away(&self, scale: Deci) -> Result<Deci, DeciError> {
        self.round_to(scale, RoundingMode::HalfAway)
    }

    /// Rounds to the nearest multiple of `scale`, ties toward zero.
    #[inline]
    pub fn half_truncate(&self, scale: Deci) -> Result<Deci, DeciError> {
        self.round_to(scale, RoundingMode::HalfTruncate)
    }

    /// Rounds to the nearest multiple of `scale`, ties toward positive infinity.
    #[inline]
    pub fn half_ceil(&self, scale: Deci) -> Result<Deci, DeciError> {
        self.round_to(scale, RoundingMode::HalfCeil)
    }

    /// Rounds to the nearest multiple of `scale`, ties toward negative infinity.
    #[inline]
    pub fn half_floor(&self, scale: Deci) -> Result<Deci, DeciError> {
        self.round_to(scale, RoundingMode::HalfFloor)
    }

    /// Parity of the truncated quotient `self / scale`, `scale` nonzero.
    fn is_quotient_odd(&self, scale: &Deci) -> bool {
        let (ma, ea, _) = self.into_parts();
        let (mb, eb, _) = scale.into_parts();

        if ea >= eb {
            let gap = (ea as i32 - eb as i32) as u32;
            return wide::mul_pow10_rem(ma, gap, mb * 2) >= mb;
        }

        let gap = (eb as i32 - ea as i32) as u32;
        if gap >= MAX_DIGITS {
            return false;
        }

        let quotient = U256::new(ma) / (U256::new(mb) * wide::pow10(gap));
        wide::low(quotient) & 1 == 1
    }
}

/// Compares `2 * |rem|` with `|scale|`.
#[inline]
fn cmp_half(rem: &Deci, scale: &Deci) -> Ordering {
    wide::cmp_scaled(
        U256::new(rem.mantissa()) * TWO,
        rem.exponent() as i32,
        U256::new(scale.mantissa()),
        scale.exponent() as i32,
    )
}
