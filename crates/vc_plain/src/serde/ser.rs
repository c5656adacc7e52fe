use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::ser::{self, Serialize, SerializeMap, Serializer};

use crate::{Plain, PlainError, PlainMap};

// -----------------------------------------------------------------------------
// Serialize for Plain

impl Serialize for Plain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Plain::Null => serializer.serialize_unit(),
            Plain::Bool(v) => serializer.serialize_bool(*v),
            Plain::Int(v) => serializer.serialize_i64(*v),
            Plain::Float(v) => serializer.serialize_f64(*v),
            Plain::String(v) => serializer.serialize_str(v),
            Plain::List(v) => serializer.collect_seq(v),
            Plain::Map(v) => v.serialize(serializer),
        }
    }
}

impl Serialize for PlainMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

// -----------------------------------------------------------------------------
// to_plain

/// Converts any serializable value into a [`Plain`].
///
/// # Examples
///
/// ```
/// use vc_plain::{to_plain, Plain};
///
/// let plain = to_plain(&(1_u8, "two", None::<bool>)).unwrap();
/// assert_eq!(plain, Plain::List(vec![1.into(), "two".into(), Plain::Null]));
/// ```
pub fn to_plain<T: ?Sized + Serialize>(value: &T) -> Result<Plain, PlainError> {
    value.serialize(PlainSerializer)
}

/// A [`Serializer`] whose output is a [`Plain`] value.
///
/// Unsigned integers above `i64::MAX` are rejected, map keys must
/// serialize to strings (integers and booleans are stringified).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSerializer;

impl Serializer for PlainSerializer {
    type Ok = Plain;
    type Error = PlainError;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeEntries;
    type SerializeStruct = SerializeEntries;
    type SerializeStructVariant = SerializeStructVariant;

    #[inline]
    fn serialize_bool(self, v: bool) -> Result<Plain, PlainError> {
        Ok(Plain::Bool(v))
    }

    #[inline]
    fn serialize_i8(self, v: i8) -> Result<Plain, PlainError> {
        Ok(Plain::from(v))
    }

    #[inline]
    fn serialize_i16(self, v: i16) -> Result<Plain, PlainError> {
        Ok(Plain::from(v))
    }

    #[inline]
    fn serialize_i32(self, v: i32) -> Result<Plain, PlainError> {
        Ok(Plain::from(v))
    }

    #[inline]
    fn serialize_i64(self, v: i64) -> Result<Plain, PlainError> {
        Ok(Plain::Int(v))
    }

    #[inline]
    fn serialize_u8(self, v: u8) -> Result<Plain, PlainError> {
        Ok(Plain::from(v))
    }

    #[inline]
    fn serialize_u16(self, v: u16) -> Result<Plain, PlainError> {
        Ok(Plain::from(v))
    }

    #[inline]
    fn serialize_u32(self, v: u32) -> Result<Plain, PlainError> {
        Ok(Plain::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Plain, PlainError> {
        i64::try_from(v)
            .map(Plain::Int)
            .map_err(|_| PlainError::IntegerOutOfRange(v))
    }

    #[inline]
    fn serialize_f32(self, v: f32) -> Result<Plain, PlainError> {
        Ok(Plain::from(v))
    }

    #[inline]
    fn serialize_f64(self, v: f64) -> Result<Plain, PlainError> {
        Ok(Plain::Float(v))
    }

    #[inline]
    fn serialize_char(self, v: char) -> Result<Plain, PlainError> {
        Ok(Plain::String(v.to_string()))
    }

    #[inline]
    fn serialize_str(self, v: &str) -> Result<Plain, PlainError> {
        Ok(Plain::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Plain, PlainError> {
        Ok(v.iter().copied().collect())
    }

    #[inline]
    fn serialize_none(self) -> Result<Plain, PlainError> {
        Ok(Plain::Null)
    }

    #[inline]
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Plain, PlainError> {
        value.serialize(self)
    }

    #[inline]
    fn serialize_unit(self) -> Result<Plain, PlainError> {
        Ok(Plain::Null)
    }

    #[inline]
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Plain, PlainError> {
        Ok(Plain::Null)
    }

    #[inline]
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Plain, PlainError> {
        Ok(Plain::from(variant))
    }

    #[inline]
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Plain, PlainError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Plain, PlainError> {
        let mut map = PlainMap::with_capacity(1);
        map.insert(variant, value.serialize(self)?);
        Ok(Plain::Map(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList, PlainError> {
        Ok(SerializeList {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList, PlainError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeList, PlainError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, PlainError> {
        Ok(SerializeTupleVariant {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeEntries, PlainError> {
        Ok(SerializeEntries {
            map: PlainMap::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeEntries, PlainError> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant, PlainError> {
        Ok(SerializeStructVariant {
            variant,
            map: PlainMap::with_capacity(len),
        })
    }
}

// -----------------------------------------------------------------------------
// Compound serializers

#[doc(hidden)]
pub struct SerializeList {
    items: Vec<Plain>,
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Plain;
    type Error = PlainError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PlainError> {
        self.items.push(value.serialize(PlainSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Plain, PlainError> {
        Ok(Plain::List(self.items))
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Plain;
    type Error = PlainError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PlainError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Plain, PlainError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = Plain;
    type Error = PlainError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PlainError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Plain, PlainError> {
        ser::SerializeSeq::end(self)
    }
}

#[doc(hidden)]
pub struct SerializeTupleVariant {
    variant: &'static str,
    items: Vec<Plain>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Plain;
    type Error = PlainError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PlainError> {
        self.items.push(value.serialize(PlainSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Plain, PlainError> {
        let mut map = PlainMap::with_capacity(1);
        map.insert(self.variant, Plain::List(self.items));
        Ok(Plain::Map(map))
    }
}

#[doc(hidden)]
pub struct SerializeEntries {
    map: PlainMap,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeEntries {
    type Ok = Plain;
    type Error = PlainError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), PlainError> {
        self.next_key = Some(map_key(key.serialize(PlainSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PlainError> {
        let Some(key) = self.next_key.take() else {
            return Err(ser::Error::custom("serialize_value called before serialize_key"));
        };
        self.map.insert(key, value.serialize(PlainSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Plain, PlainError> {
        Ok(Plain::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeEntries {
    type Ok = Plain;
    type Error = PlainError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), PlainError> {
        self.map.insert(key, value.serialize(PlainSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Plain, PlainError> {
        Ok(Plain::Map(self.map))
    }
}

#[doc(hidden)]
pub struct SerializeStructVariant {
    variant: &'static str,
    map: PlainMap,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Plain;
    type Error = PlainError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), PlainError> {
        self.map.insert(key, value.serialize(PlainSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Plain, PlainError> {
        let mut outer = PlainMap::with_capacity(1);
        outer.insert(self.variant, Plain::Map(self.map));
        Ok(Plain::Map(outer))
    }
}

fn map_key(key: Plain) -> Result<String, PlainError> {
    match key {
        Plain::String(v) => Ok(v),
        Plain::Int(v) => Ok(v.to_string()),
        Plain::Bool(v) => Ok(v.to_string()),
        other => Err(PlainError::KeyMustBeString(other.kind())),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;

    use serde::Serialize;

    use super::to_plain;
    use crate::{Plain, PlainError, PlainKind, PlainMap};

    #[derive(Serialize)]
    struct Point {
        x: i32,
        label: Option<String>,
    }

    #[derive(Serialize)]
    enum Shape {
        Dot,
        Circle(u8),
        Line(i8, i8),
    }

    #[test]
    fn struct_becomes_ordered_map() {
        let plain = to_plain(&Point { x: 3, label: None }).unwrap();
        let map = plain.as_map().unwrap();
        assert_eq!(map.keys().collect::<vec::Vec<_>>(), ["x", "label"]);
        assert_eq!(map.get("label"), Some(&Plain::Null));
    }

    #[test]
    fn enums_are_externally_tagged() {
        assert_eq!(to_plain(&Shape::Dot).unwrap(), Plain::from("Dot"));

        let circle: PlainMap = [("Circle", 4)].into_iter().collect();
        assert_eq!(to_plain(&Shape::Circle(4)).unwrap(), Plain::Map(circle));

        let line = to_plain(&Shape::Line(1, -1)).unwrap();
        assert_eq!(
            line.as_map().unwrap().get("Line"),
            Some(&Plain::List(vec![Plain::Int(1), Plain::Int(-1)])),
        );
    }

    #[test]
    fn integer_map_keys_are_stringified() {
        let mut source = BTreeMap::new();
        source.insert(2_u32, true);
        let plain = to_plain(&source).unwrap();
        assert_eq!(plain.as_map().unwrap().get("2"), Some(&Plain::Bool(true)));
    }

    #[test]
    fn rejects_unrepresentable_values() {
        assert_eq!(
            to_plain(&u64::MAX),
            Err(PlainError::IntegerOutOfRange(u64::MAX)),
        );

        let mut source = BTreeMap::new();
        source.insert(vec![1], 1);
        assert_eq!(
            to_plain(&source),
            Err(PlainError::KeyMustBeString(PlainKind::List)),
        );
    }
}
