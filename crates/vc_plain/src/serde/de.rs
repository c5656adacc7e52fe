use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::de::value::{MapDeserializer, SeqDeserializer, StringDeserializer};
use serde::de::{self, DeserializeOwned, DeserializeSeed, Deserializer, EnumAccess};
use serde::de::{IntoDeserializer, MapAccess, SeqAccess, Unexpected, VariantAccess, Visitor};
use serde::{Deserialize, forward_to_deserialize_any};

use crate::{Plain, PlainError, PlainMap};

// -----------------------------------------------------------------------------
// Deserialize for Plain

impl<'de> Deserialize<'de> for Plain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PlainVisitor)
    }
}

struct PlainVisitor;

impl<'de> Visitor<'de> for PlainVisitor {
    type Value = Plain;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any plain value")
    }

    #[inline]
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Plain, E> {
        Ok(Plain::Bool(v))
    }

    #[inline]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Plain, E> {
        Ok(Plain::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Plain, E> {
        i64::try_from(v)
            .map(Plain::Int)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &"an integer up to i64::MAX"))
    }

    #[inline]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Plain, E> {
        Ok(Plain::Float(v))
    }

    #[inline]
    fn visit_str<E: de::Error>(self, v: &str) -> Result<Plain, E> {
        Ok(Plain::from(v))
    }

    #[inline]
    fn visit_string<E: de::Error>(self, v: String) -> Result<Plain, E> {
        Ok(Plain::String(v))
    }

    #[inline]
    fn visit_unit<E: de::Error>(self) -> Result<Plain, E> {
        Ok(Plain::Null)
    }

    #[inline]
    fn visit_none<E: de::Error>(self) -> Result<Plain, E> {
        Ok(Plain::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Plain, D::Error> {
        Plain::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Plain, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Plain>()? {
            items.push(item);
        }
        Ok(Plain::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Plain, A::Error> {
        let mut map = PlainMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Plain>()? {
            map.insert(key, value);
        }
        Ok(Plain::Map(map))
    }
}

impl<'de> Deserialize<'de> for PlainMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Plain::deserialize(deserializer)? {
            Plain::Map(map) => Ok(map),
            other => Err(de::Error::invalid_type(other.unexpected(), &"a map")),
        }
    }
}

impl Plain {
    /// Describes this value for serde error messages.
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Plain::Null => Unexpected::Unit,
            Plain::Bool(v) => Unexpected::Bool(*v),
            Plain::Int(v) => Unexpected::Signed(*v),
            Plain::Float(v) => Unexpected::Float(*v),
            Plain::String(v) => Unexpected::Str(v),
            Plain::List(_) => Unexpected::Seq,
            Plain::Map(_) => Unexpected::Map,
        }
    }
}

// -----------------------------------------------------------------------------
// from_plain

/// Rebuilds any deserializable value from a [`Plain`].
///
/// # Examples
///
/// ```
/// use vc_plain::{from_plain, Plain};
///
/// let plain = Plain::List(vec![Plain::Int(1), Plain::Null]);
/// let value: Vec<Option<u16>> = from_plain(plain).unwrap();
/// assert_eq!(value, [Some(1), None]);
/// ```
pub fn from_plain<T: DeserializeOwned>(plain: Plain) -> Result<T, PlainError> {
    T::deserialize(plain)
}

impl<'de> IntoDeserializer<'de, PlainError> for Plain {
    type Deserializer = Self;

    #[inline]
    fn into_deserializer(self) -> Self {
        self
    }
}

impl<'de> Deserializer<'de> for Plain {
    type Error = PlainError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PlainError> {
        match self {
            Plain::Null => visitor.visit_unit(),
            Plain::Bool(v) => visitor.visit_bool(v),
            Plain::Int(v) => visitor.visit_i64(v),
            Plain::Float(v) => visitor.visit_f64(v),
            Plain::String(v) => visitor.visit_string(v),
            Plain::List(items) => {
                let mut seq = SeqDeserializer::<_, PlainError>::new(items.into_iter());
                let value = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(value)
            }
            Plain::Map(map) => {
                let mut access = MapDeserializer::<_, PlainError>::new(map.into_iter());
                let value = visitor.visit_map(&mut access)?;
                access.end()?;
                Ok(value)
            }
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PlainError> {
        match self {
            Plain::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, PlainError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, PlainError> {
        match self {
            Plain::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: Plain::Null,
            }),
            Plain::Map(map) if map.len() == 1 => {
                let mut entries = map.into_iter();
                let Some((variant, value)) = entries.next() else {
                    return Err(de::Error::invalid_length(0, &"a single-key map"));
                };
                visitor.visit_enum(EnumDeserializer { variant, value })
            }
            other => Err(de::Error::invalid_type(
                other.unexpected(),
                &"a variant name or a single-key map",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

// -----------------------------------------------------------------------------
// Enum access

struct EnumDeserializer {
    variant: String,
    value: Plain,
}

impl<'de> EnumAccess<'de> for EnumDeserializer {
    type Error = PlainError;
    type Variant = VariantDeserializer;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, VariantDeserializer), PlainError> {
        let name: StringDeserializer<PlainError> = self.variant.into_deserializer();
        let variant = seed.deserialize(name)?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Plain,
}

impl<'de> VariantAccess<'de> for VariantDeserializer {
    type Error = PlainError;

    fn unit_variant(self) -> Result<(), PlainError> {
        match self.value {
            Plain::Null => Ok(()),
            other => Err(de::Error::invalid_type(other.unexpected(), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(
        self,
        seed: T,
    ) -> Result<T::Value, PlainError> {
        seed.deserialize(self.value)
    }

    fn tuple_variant<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, PlainError> {
        match self.value {
            list @ Plain::List(_) => list.deserialize_any(visitor),
            other => Err(de::Error::invalid_type(other.unexpected(), &"tuple variant")),
        }
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, PlainError> {
        match self.value {
            map @ Plain::Map(_) => map.deserialize_any(visitor),
            other => Err(de::Error::invalid_type(other.unexpected(), &"struct variant")),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
