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

//! Ops implementation.
//!
//! Operators panic where the matching `try_*` method returns an error.

use crate::deci::Deci;
use crate::error::DeciError;
use std::convert::TryFrom;
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

impl Neg for Deci {
    type Output = Deci;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for &'_ Deci {
    type Output = Deci;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Add<Deci> for &'_ Deci {
    type Output = Deci;

    #[inline(always)]
    fn add(self, other: Deci) -> Self::Output {
        match self.try_add(other) {
            Ok(sum) => sum,
            Err(_) => panic!("Addition overflowed"),
        }
    }
}

impl AddAssign for Deci {
    #[inline(always)]
    fn add_assign(&mut self, other: Deci) {
        let result = self.add(other);
        *self = result;
    }
}

impl Sub<Deci> for &'_ Deci {
    type Output = Deci;

    #[inline(always)]
    fn sub(self, other: Deci) -> Deci {
        match self.try_sub(other) {
            Ok(diff) => diff,
            Err(_) => panic!("Subtraction overflowed"),
        }
    }
}

impl SubAssign for Deci {
    #[inline(always)]
    fn sub_assign(&mut self, other: Deci) {
        let result = self.sub(other);
        *self = result;
    }
}

impl Mul<Deci> for &'_ Deci {
    type Output = Deci;

    #[inline(always)]
    fn mul(self, other: Deci) -> Deci {
        match self.try_mul(other) {
            Ok(prod) => prod,
            Err(_) => panic!("Multiplication overflowed"),
        }
    }
}

impl MulAssign for Deci {
    #[inline(always)]
    fn mul_assign(&mut self, other: Deci) {
        let result = self.mul(other);
        *self = result;
    }
}

impl Div<Deci> for &'_ Deci {
    type Output = Deci;

    #[inline(always)]
    fn div(self, other: Deci) -> Deci {
        match self.try_div(other) {
            Ok(quot) => quot,
            Err(_) => panic!("Division by zero or overflowed"),
        }
    }
}

impl DivAssign for Deci {
    #[inline(always)]
    fn div_assign(&mut self, other: Deci) {
        let result = self.div(other);
        *self = result;
    }
}

impl Rem<Deci> for &Deci {
    type Output = Deci;

    #[inline(always)]
    fn rem(self, other: Deci) -> Deci {
        match self.try_rem(other) {
            Ok(rem) => rem,
            Err(_) => panic!("Division by zero"),
        }
    }
}

impl RemAssign for Deci {
    #[inline(always)]
    fn rem_assign(&mut self, other: Deci) {
        let result = self.rem(other);
        *self = result;
    }
}

impl Sum for Deci {
    #[inline(always)]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Deci::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Deci> for Deci {
    #[inline(always)]
    fn sum<I: Iterator<Item = &'a Deci>>(iter: I) -> Self {
        iter.fold(Deci::ZERO, Add::add)
    }
}

impl Product for Deci {
    #[inline(always)]
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Deci::ONE, Mul::mul)
    }
}

/// Converts an operand that may not fit, panicking like the operator would.
#[inline(always)]
fn operand<T>(val: T) -> Deci
where
    Deci: TryFrom<T, Error = DeciError>,
{
    match Deci::try_from(val) {
        Ok(n) => n,
        Err(e) => panic!("Invalid operand: {}", e),
    }
}

/// Operators between `Deci` and a primitive, converted with `$conv`.
macro_rules! impl_arith_with_num {
    ($op: ident { $method: ident } $conv: path => $($num: ty),* $(,)?) => {$(
        impl $op<$num> for Deci {
            type Output = Deci;

            #[inline(always)]
            fn $method(self, other: $num) -> Deci {
                self.$method($conv(other))
            }
        }

        impl $op<$num> for &'_ Deci {
            type Output = Deci;

            #[inline(always)]
            fn $method(self, other: $num) -> Deci {
                self.$method($conv(other))
            }
        }

        impl $op<Deci> for $num {
            type Output = Deci;

            #[inline(always)]
            fn $method(self, other: Deci) -> Deci {
                $conv(self).$method(other)
            }
        }

        impl $op<&'_ Deci> for $num {
            type Output = Deci;

            #[inline(always)]
            fn $method(self, other: &'_ Deci) -> Deci {
                $conv(self).$method(other)
            }
        }
    )*};
}

macro_rules! impl_arith {
    ($op: ident { $method: ident }) => {
        impl $op for Deci {
            type Output = Deci;

            #[inline(always)]
            fn $method(self, other: Self) -> Self::Output {
                (&self).$method(other)
            }
        }

        impl $op<&'_ Deci> for Deci {
            type Output = Deci;

            #[inline(always)]
            fn $method(self, other: &Deci) -> Self::Output {
                (&self).$method(*other)
            }
        }

        impl $op<&'_ Deci> for &'_ Deci {
            type Output = Deci;

            #[inline(always)]
            fn $method(self, other: &Deci) -> Self::Output {
                self.$method(*other)
            }
        }

        impl_arith_with_num!($op { $method } Deci::from => u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
        impl_arith_with_num!($op { $method } operand => f64, i128);
    };
}

impl_arith!(Add { add });
impl_arith!(Sub { sub });
impl_arith!(Mul { mul });
impl_arith!(Div { div });
impl_arith!(Rem { rem });

macro_rules! impl_arith_assign {
    ($op: ident { $method: ident }) => {
        impl_arith_assign!($op { $method }
            Deci::from => u8, u16, u32, u64, usize, i8, i16, i32, i64, isize;
            operand => f64, i128);
    };
    ($op: ident { $method: ident } $($conv: path => $($num: ty),*);*) => {
        impl $op<&Deci> for Deci {
            #[inline(always)]
            fn $method(&mut self, other: &Deci) {
                self.$method(*other)
            }
        }

        $($(
            impl $op<$num> for Deci {
                #[inline(always)]
                fn $method(&mut self, other: $num) {
                    self.$method($conv(other))
                }
            }
        )*)*
    };
}

impl_arith_assign!(AddAssign { add_assign });
impl_arith_assign!(SubAssign { sub_assign });
impl_arith_assign!(MulAssign { mul_assign });
impl_arith_assign!(DivAssign { div_assign });
impl_arith_assign!(RemAssign { rem_assign });
