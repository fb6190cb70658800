//! Pre-encode walk that rejects floats JSON cannot represent.
//!
//! serde_json writes NaN and the infinities as `null`, which never decodes
//! back into a float. [`ensure_finite`] visits the value once without
//! producing output and stops at the first non-finite number.

use crate::error::EncodeError;
use serde::Serialize;
use serde::ser;
use std::fmt::Display;
use thiserror::Error;

pub(crate) fn ensure_finite<T: Serialize + ?Sized>(value: &T) -> Result<(), EncodeError> {
    match value.serialize(FiniteCheck) {
        Err(Rejected::NonFinite(number)) => Err(EncodeError::NonFinite(number)),
        // Other serializer failures surface from serde_json with its own message.
        Ok(()) | Err(Rejected::Custom(_)) => Ok(()),
    }
}

#[derive(Debug, Error)]
enum Rejected {
    #[error("non-finite number {0}")]
    NonFinite(f64),
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for Rejected {
    fn custom<T: Display>(msg: T) -> Self {
        Rejected::Custom(msg.to_string())
    }
}

#[derive(Clone, Copy)]
struct FiniteCheck;

impl FiniteCheck {
    fn float(self, number: f64) -> Result<(), Rejected> {
        if number.is_finite() {
            Ok(())
        } else {
            Err(Rejected::NonFinite(number))
        }
    }
}

impl ser::Serializer for FiniteCheck {
    type Ok = ();
    type Error = Rejected;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _: bool) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_i8(self, _: i8) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_i16(self, _: i16) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_i32(self, _: i32) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_i64(self, _: i64) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_i128(self, _: i128) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_u8(self, _: u8) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_u16(self, _: u16) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_u32(self, _: u32) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_u64(self, _: u64) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_u128(self, _: u128) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), Rejected> {
        self.float(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), Rejected> {
        self.float(v)
    }

    fn serialize_char(self, _: char) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_str(self, _: &str) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_bytes(self, _: &[u8]) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_none(self) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), Rejected> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
    ) -> Result<(), Rejected> {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<(), Rejected> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        value: &T,
    ) -> Result<(), Rejected> {
        value.serialize(self)
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self, Rejected> {
        Ok(self)
    }

    fn serialize_tuple(self, _: usize) -> Result<Self, Rejected> {
        Ok(self)
    }

    fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Self, Rejected> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self, Rejected> {
        Ok(self)
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self, Rejected> {
        Ok(self)
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self, Rejected> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self, Rejected> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FiniteCheck {
    type Ok = ();
    type Error = Rejected;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Rejected> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Rejected> {
        Ok(())
    }
}

impl ser::SerializeTuple for FiniteCheck {
    type Ok = ();
    type Error = Rejected;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Rejected> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Rejected> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FiniteCheck {
    type Ok = ();
    type Error = Rejected;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Rejected> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Rejected> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FiniteCheck {
    type Ok = ();
    type Error = Rejected;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Rejected> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Rejected> {
        Ok(())
    }
}

impl ser::SerializeMap for FiniteCheck {
    type Ok = ();
    type Error = Rejected;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Rejected> {
        key.serialize(*self)
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Rejected> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Rejected> {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteCheck {
    type Ok = ();
    type Error = Rejected;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _: &'static str,
        value: &T,
    ) -> Result<(), Rejected> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Rejected> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteCheck {
    type Ok = ();
    type Error = Rejected;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _: &'static str,
        value: &T,
    ) -> Result<(), Rejected> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Rejected> {
        Ok(())
    }
}
