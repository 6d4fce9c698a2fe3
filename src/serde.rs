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

//! serde implementation.

use crate::deci::{Buf, BINARY_SIZE};
use crate::Deci;

impl serde::Serialize for Deci {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        if serializer.is_human_readable() {
            let mut buf = Buf::new();
            self.format(None, '.', &mut buf).map_err(serde::ser::Error::custom)?;
            let str = unsafe { std::str::from_utf8_unchecked(buf.as_slice()) };
            serializer.serialize_str(str)
        } else {
            serializer.serialize_bytes(&self.to_binary())
        }
    }
}

impl<'de> serde::Deserialize<'de> for Deci {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        struct DeciVisitor;

        impl<'de> serde::de::Visitor<'de> for DeciVisitor {
            type Value = Deci;

            #[inline]
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "a deci string or {} bytes", BINARY_SIZE)
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Deci, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(serde::de::Error::custom)
            }

            #[inline]
            fn visit_bytes<E>(self, v: &[u8]) -> Result<Deci, E>
            where
                E: serde::de::Error,
            {
                if v.len() != BINARY_SIZE {
                    return Err(serde::de::Error::invalid_length(v.len(), &self));
                }
                Deci::decode(v).map_err(serde::de::Error::custom)
            }

            #[inline]
            fn visit_seq<A>(self, mut seq: A) -> Result<Deci, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut binary = [0u8; BINARY_SIZE];
                for (i, b) in binary.iter_mut().enumerate() {
                    *b = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(Deci::from_binary(&binary))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(DeciVisitor)
        } else {
            deserializer.deserialize_bytes(DeciVisitor)
        }
    }
}
