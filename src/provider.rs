//! Codec provider contract.
//!
//! A provider wraps one concrete decoder or encoder together with its
//! configuration. Providers are small `Copy` values: build one wherever it is
//! needed, share it freely, and never mutate it.

use crate::error::{DecodeError, EncodeError, UnknownFormat};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Serialized data format a provider speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Plist,
}

impl Format {
    pub const ALL: &'static [Format] = &[Format::Json, Format::Plist];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Plist => "plist",
        }
    }

    /// MIME type used when the payload travels over HTTP.
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Plist => "application/x-plist",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Format {
    type Error = UnknownFormat;

    fn try_from(value: &str) -> Result<Self, UnknownFormat> {
        match value {
            "json" => Ok(Format::Json),
            "plist" => Ok(Format::Plist),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// Turns bytes into a value of any deserializable type.
pub trait Decoder {
    fn format(&self) -> Format;

    /// Decode `bytes` as `T`. Fails rather than returning a partially
    /// populated value.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodeError>;
}

/// Turns any serializable value into bytes.
pub trait Encoder {
    fn format(&self) -> Format;

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError>;
}

impl<D: Decoder + ?Sized> Decoder for &D {
    fn format(&self) -> Format {
        (**self).format()
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        (**self).decode(bytes)
    }
}

impl<E: Encoder + ?Sized> Encoder for &E {
    fn format(&self) -> Format {
        (**self).format()
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(value)
    }
}
