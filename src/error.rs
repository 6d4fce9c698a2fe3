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

//! Deci error definitions.

use thiserror::Error;

/// An error which can be returned by arithmetic, rounding or conversion of a deci.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeciError {
    /// Division, remainder or rounding by a zero value.
    #[error("division by zero")]
    DivideByZero,
    /// The exponent or mantissa does not fit the fixed field widths.
    #[error("value overflows deci format")]
    Overflow,
    /// Invalid input, e.g. `NaN` or empty binary data.
    #[error("invalid number")]
    Invalid,
    /// Digits would be lost by the requested exact conversion.
    #[error("conversion is not exact")]
    Inexact,
}

/// An error which can be returned when parsing a deci.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeciParseError {
    /// Empty string.
    #[error("cannot parse number from empty string")]
    Empty,
    /// Invalid deci.
    #[error("invalid number")]
    Invalid,
    /// Deci is overflowed.
    #[error("value overflows deci format")]
    Overflow,
}

impl From<DeciParseError> for DeciError {
    #[inline]
    fn from(e: DeciParseError) -> Self {
        match e {
            DeciParseError::Empty | DeciParseError::Invalid => DeciError::Invalid,
            DeciParseError::Overflow => DeciError::Overflow,
        }
    }
}
