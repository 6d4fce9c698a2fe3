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

//! Conversion between `Deci` and primitive number types.

use crate::deci::{Deci, MAX_MANTISSA};
use crate::error::{DeciError, DeciParseError};
use crate::parse::parse_str;
use crate::wide::POWERS_10;
use stack_buf::StackVec;
use std::convert::TryFrom;
use std::fmt::Write;

macro_rules! impl_from_small_int {
    ($ty: ty) => {
        impl From<$ty> for Deci {
            #[inline]
            fn from(val: $ty) -> Self {
                Deci::from_parts_unchecked(val as u128, 0, false)
            }
        }
    };
    (SIGNED $ty: ty) => {
        impl From<$ty> for Deci {
            #[inline]
            fn from(val: $ty) -> Deci {
                Deci::from_parts_unchecked(val.unsigned_abs() as u128, 0, val < 0)
            }
        }
    };
    ($($ty: ty), * $(,)?) => {
        $(impl_from_small_int!($ty);)*
    };
    (SIGNED $($ty: ty), * $(,)?) => {
        $(impl_from_small_int!(SIGNED $ty);)*
    }
}

impl_from_small_int!(u8, u16, u32, u64, usize);
impl_from_small_int!(SIGNED i8, i16, i32, i64, isize);

impl From<bool> for Deci {
    #[inline]
    fn from(b: bool) -> Self {
        if b {
            Deci::ONE
        } else {
            Deci::ZERO
        }
    }
}

impl TryFrom<i128> for Deci {
    type Error = DeciError;

    #[inline]
    fn try_from(val: i128) -> Result<Self, Self::Error> {
        Deci::from_parts(val.unsigned_abs(), 0, val < 0)
    }
}

impl TryFrom<u128> for Deci {
    type Error = DeciError;

    #[inline]
    fn try_from(val: u128) -> Result<Self, Self::Error> {
        Deci::from_parts(val, 0, false)
    }
}

/// Converts a float through its shortest round-trip decimal text.
///
/// Values below the smallest exponent degrade toward zero.
fn float_to_deci<F: std::fmt::LowerExp>(val: F) -> Result<Deci, DeciError> {
    let mut buf = StackVec::<u8, 48>::new();
    write!(&mut buf, "{:e}", val).map_err(|_| DeciError::Invalid)?;

    let (n, rest) = parse_str(buf.as_slice())?;
    if !rest.is_empty() {
        return Err(DeciParseError::Invalid.into());
    }
    Ok(n)
}

impl TryFrom<f32> for Deci {
    type Error = DeciError;

    #[inline]
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(DeciError::Invalid);
        }
        if value.is_infinite() {
            return Err(DeciError::Overflow);
        }

        float_to_deci(value)
    }
}

impl TryFrom<f64> for Deci {
    type Error = DeciError;

    #[inline]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(DeciError::Invalid);
        }
        if value.is_infinite() {
            return Err(DeciError::Overflow);
        }

        float_to_deci(value)
    }
}

impl Deci {
    /// Converts to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        let (mantissa, exponent, negative) = self.into_parts();

        let mut buf = StackVec::<u8, 48>::new();
        let v = match write!(&mut buf, "{}e{}", mantissa, exponent) {
            Ok(()) => fast_float::parse::<f64, _>(buf.as_slice())
                .unwrap_or_else(|_| mantissa as f64 * 10f64.powi(exponent as i32)),
            Err(_) => mantissa as f64 * 10f64.powi(exponent as i32),
        };

        if negative {
            -v
        } else {
            v
        }
    }

    /// Magnitude of the integer part, `None` if it does not fit `u128`.
    fn trunc_magnitude(&self) -> Option<u128> {
        let (mantissa, exponent, _) = self.into_parts();
        if exponent >= 0 {
            if mantissa == 0 {
                return Some(0);
            }
            let power = POWERS_10.get(exponent as usize)?;
            mantissa.checked_mul(*power)
        } else {
            let scale = -(exponent as i32) as usize;
            Some(POWERS_10.get(scale).map_or(0, |power| mantissa / power))
        }
    }

    #[inline]
    fn to_i128(&self) -> Result<i128, DeciError> {
        let magnitude = self.trunc_magnitude().ok_or(DeciError::Overflow)?;
        if self.is_sign_negative() {
            if magnitude > i128::MAX as u128 + 1 {
                Err(DeciError::Overflow)
            } else {
                Ok((magnitude as i128).wrapping_neg())
            }
        } else if magnitude > i128::MAX as u128 {
            Err(DeciError::Overflow)
        } else {
            Ok(magnitude as i128)
        }
    }

    /// Converts to `i64`, truncating any fractional digits.
    ///
    /// # Errors
    ///
    /// [`DeciError::Overflow`] if the integer part does not fit.
    #[inline]
    pub fn to_i64(&self) -> Result<i64, DeciError> {
        let val = self.to_i128()?;
        if val > i64::MAX as i128 || val < i64::MIN as i128 {
            tracing::debug!(value = %self, "deci does not fit i64");
            return Err(DeciError::Overflow);
        }
        Ok(val as i64)
    }

    /// Converts to `i64`, failing with [`DeciError::Inexact`] if the value
    /// does not convert back to itself.
    #[inline]
    pub fn to_i64_exact(&self) -> Result<i64, DeciError> {
        let val = self.to_i64()?;
        if Deci::from(val) != *self {
            return Err(DeciError::Inexact);
        }
        Ok(val)
    }
}

impl From<&Deci> for f64 {
    #[inline]
    fn from(val: &Deci) -> Self {
        val.to_f64()
    }
}

impl From<Deci> for f64 {
    #[inline]
    fn from(val: Deci) -> Self {
        val.to_f64()
    }
}

impl From<&Deci> for f32 {
    #[inline]
    fn from(val: &Deci) -> Self {
        val.to_f64() as f32
    }
}

impl From<Deci> for f32 {
    #[inline]
    fn from(val: Deci) -> Self {
        f32::from(&val)
    }
}

impl TryFrom<&Deci> for i128 {
    type Error = DeciError;

    #[inline]
    fn try_from(value: &Deci) -> Result<Self, Self::Error> {
        value.to_i128()
    }
}

impl TryFrom<Deci> for i128 {
    type Error = DeciError;

    #[inline]
    fn try_from(value: Deci) -> Result<Self, Self::Error> {
        value.to_i128()
    }
}

impl TryFrom<&Deci> for u128 {
    type Error = DeciError;

    #[inline]
    fn try_from(value: &Deci) -> Result<Self, Self::Error> {
        let magnitude = value.trunc_magnitude().ok_or(DeciError::Overflow)?;
        if value.is_sign_negative() && magnitude != 0 {
            return Err(DeciError::Overflow);
        }
        Ok(magnitude)
    }
}

impl TryFrom<Deci> for u128 {
    type Error = DeciError;

    #[inline]
    fn try_from(value: Deci) -> Result<Self, Self::Error> {
        u128::try_from(&value)
    }
}

macro_rules! impl_into_small_int {
    ($ty: ty) => {
        impl TryFrom<&Deci> for $ty {
            type Error = DeciError;

            #[inline]
            fn try_from(value: &Deci) -> Result<Self, Self::Error> {
                let val = u128::try_from(value)?;
                if val > <$ty>::MAX as u128 {
                    Err(DeciError::Overflow)
                } else {
                    Ok(val as $ty)
                }
            }
        }
        impl TryFrom<Deci> for $ty {
            type Error = DeciError;

            #[inline]
            fn try_from(value: Deci) -> Result<Self, Self::Error> {
                <$ty>::try_from(&value)
            }
        }
    };
    (SIGNED $ty: ty) => {
        impl TryFrom<&Deci> for $ty {
            type Error = DeciError;

            #[inline]
            fn try_from(value: &Deci) -> Result<Self, Self::Error> {
                let val = value.to_i128()?;
                if val > <$ty>::MAX as i128 || val < <$ty>::MIN as i128 {
                    Err(DeciError::Overflow)
                } else {
                    Ok(val as $ty)
                }
            }
        }
        impl TryFrom<Deci> for $ty {
            type Error = DeciError;

            #[inline]
            fn try_from(value: Deci) -> Result<Self, Self::Error> {
                <$ty>::try_from(&value)
            }
        }
    };
    ($($ty: ty), * $(,)?) => {
        $(impl_into_small_int!($ty);)*
    };
    (SIGNED $($ty: ty), * $(,)?) => {
        $(impl_into_small_int!(SIGNED $ty);)*
    };
}

impl_into_small_int!(u8, u16, u32, u64, usize);
impl_into_small_int!(SIGNED i8, i16, i32, i64, isize);
