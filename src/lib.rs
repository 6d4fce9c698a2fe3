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

//! Fixed-width 96-bit decimal for monetary quantities.
//!
//! A [`Deci`] is `(-1)^sign * mantissa * 10^exponent` with an 87-bit unsigned
//! mantissa, one sign bit and an 8-bit signed exponent, packed into 12 bytes.
//! Results that need more than 87 bits are truncated toward zero; results
//! whose exponent leaves `-128..=127` either degrade toward zero or fail
//! with [`DeciError::Overflow`].
//!
//! ## Optional features
//!
//! ### `serde`
//!
//! When this optional dependency is enabled, `Deci` implements the `serde::Serialize` and
//! `serde::Deserialize` traits.
//!
//! ## Usage
//!
//! To build a deci, use [`Deci`]:
//!
//! ```
//! use deci_rs::Deci;
//!
//! let n1: Deci = "12.50".parse().unwrap();
//! let n2: Deci = "0.75".parse().unwrap();
//! let result = n1 + n2;
//! assert_eq!(result.to_string(), "13.25");
//! ```
//!
//! Money amounts can be parsed from a prefix and formatted with a symbol:
//!
//! ```
//! use deci_rs::Deci;
//!
//! let (n, end) = Deci::parse_prefix(b"-$1'234.50 due").unwrap();
//! assert_eq!(end, 10);
//!
//! let mut text = String::new();
//! n.format(Some('$'), ',', &mut text).unwrap();
//! assert_eq!(text, "-$1234,50");
//!
//! let (back, end) = Deci::parse_prefix_with(text.as_bytes(), Some('$'), ',').unwrap();
//! assert_eq!(end, text.len());
//! assert!(back.is_same(&n));
//! ```
//!
//! Fallible arithmetic and rounding to a scale:
//!
//! ```
//! use deci_rs::{Deci, DeciError, RoundingMode};
//!
//! let price: Deci = "19.99".parse().unwrap();
//! let share = price.try_div(Deci::from(3i32)).unwrap();
//! let cents: Deci = "0.01".parse().unwrap();
//! assert_eq!(share.round_to(cents, RoundingMode::HalfEven).unwrap().to_string(), "6.66");
//!
//! assert_eq!(price.try_div(Deci::ZERO), Err(DeciError::DivideByZero));
//! ```
//!
//! Deci can be encoded to bytes and decoded from bytes.
//!
//! ```
//! use deci_rs::Deci;
//!
//! let n1 = "123456789.987654321".parse::<Deci>().unwrap();
//! let mut bytes = Vec::new();
//! n1.encode(&mut bytes).unwrap();
//! let n2 = Deci::decode(&bytes).unwrap();
//! assert!(n1.is_same(&n2));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod convert;
mod deci;
mod error;
mod ops;
mod parse;
mod round;
mod wide;

#[cfg(feature = "serde")]
mod serde;

pub use crate::deci::{Deci, BINARY_SIZE, MAX_EXPONENT, MAX_MANTISSA, MAX_TEXT_SIZE, MIN_EXPONENT};
pub use crate::error::{DeciError, DeciParseError};
pub use crate::round::RoundingMode;
