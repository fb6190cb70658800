//! Property-list providers, selectors, and capability traits.
//!
//! Mirrors the JSON layer: [`PlistDecodable`] / [`PlistEncodable`] for a
//! single codec, [`MultiPlistDecodable`] / [`MultiPlistEncodable`] for named
//! variants, and the `DefaultPlist*` traits to name the zero-argument choice.

use crate::error::{DecodeError, EncodeError, FileError};
use crate::file;
use crate::provider::{Decoder, Encoder, Format};
use crate::report::{self, ErrorReporter, TryErrorReporter};
use crate::selector::{DecoderSelector, EncoderSelector, Selector};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;

/// Property-list decoder. Detects XML and binary input on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlistDecoder;

impl PlistDecoder {
    pub const fn new() -> Self {
        PlistDecoder
    }
}

impl Decoder for PlistDecoder {
    fn format(&self) -> Format {
        Format::Plist
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        Ok(::plist::from_bytes(bytes)?)
    }
}

/// On-disk representation written by [`PlistEncoder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlistFormat {
    #[default]
    Xml,
    Binary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlistEncoder {
    output: PlistFormat,
}

impl PlistEncoder {
    pub const fn new(output: PlistFormat) -> Self {
        Self { output }
    }

    pub fn output(&self) -> PlistFormat {
        self.output
    }
}

impl Encoder for PlistEncoder {
    fn format(&self) -> Format {
        Format::Plist
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        // plist wants a sized value; `&T` serializes exactly like `T`.
        match self.output {
            PlistFormat::Xml => ::plist::to_writer_xml(&mut buf, &value)?,
            PlistFormat::Binary => ::plist::to_writer_binary(&mut buf, &value)?,
        }
        Ok(buf)
    }
}

/// Stock plist decoder variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlistDecoders {
    Base,
}

impl Selector for PlistDecoders {
    const ALL: &'static [Self] = &[PlistDecoders::Base];

    fn name(&self) -> &'static str {
        match self {
            PlistDecoders::Base => "base",
        }
    }
}

impl DecoderSelector for PlistDecoders {
    type Decoder = PlistDecoder;

    fn decoder(&self) -> PlistDecoder {
        match self {
            PlistDecoders::Base => PlistDecoder::new(),
        }
    }
}

impl fmt::Display for PlistDecoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stock plist encoder variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlistEncoders {
    Binary,
    Xml,
}

impl Selector for PlistEncoders {
    const ALL: &'static [Self] = &[PlistEncoders::Binary, PlistEncoders::Xml];

    fn name(&self) -> &'static str {
        match self {
            PlistEncoders::Binary => "binary",
            PlistEncoders::Xml => "xml",
        }
    }
}

impl EncoderSelector for PlistEncoders {
    type Encoder = PlistEncoder;

    fn encoder(&self) -> PlistEncoder {
        match self {
            PlistEncoders::Binary => PlistEncoder::new(PlistFormat::Binary),
            PlistEncoders::Xml => PlistEncoder::new(PlistFormat::Xml),
        }
    }
}

impl fmt::Display for PlistEncoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type with one canonical plist decoder.
pub trait PlistDecodable: DeserializeOwned {
    fn plist_decoder() -> PlistDecoder {
        PlistDecoder::new()
    }

    fn from_plist(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::plist_decoder().decode(bytes)
    }

    fn from_plist_file(path: impl AsRef<Path>) -> Result<Self, FileError> {
        file::read_with(path.as_ref(), &Self::plist_decoder())
    }

    fn from_plist_reported(bytes: &[u8]) -> Option<Self>
    where
        Self: ErrorReporter,
    {
        report::decode_or_else(&Self::plist_decoder(), bytes, Self::report)
    }

    fn try_from_plist_reported(
        bytes: &[u8],
    ) -> Result<Option<Self>, <Self as TryErrorReporter>::Error>
    where
        Self: TryErrorReporter,
    {
        report::try_decode_or_else(&Self::plist_decoder(), bytes, Self::try_report)
    }
}

/// A type with one canonical plist encoder. XML unless overridden.
pub trait PlistEncodable: Serialize {
    fn plist_encoder() -> PlistEncoder {
        PlistEncoder::new(PlistFormat::Xml)
    }

    fn to_plist(&self) -> Result<Vec<u8>, EncodeError> {
        Self::plist_encoder().encode(self)
    }

    fn write_plist_file(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        file::write_with(path.as_ref(), self, &Self::plist_encoder())
    }
}

pub trait MultiPlistDecodable: DeserializeOwned {
    type PlistDecoders: DecoderSelector<Decoder = PlistDecoder>;

    fn from_plist_using(bytes: &[u8], using: Self::PlistDecoders) -> Result<Self, DecodeError> {
        using.decoder().decode(bytes)
    }

    fn from_plist_file_using(
        path: impl AsRef<Path>,
        using: Self::PlistDecoders,
    ) -> Result<Self, FileError> {
        file::read_with(path.as_ref(), &using.decoder())
    }

    fn from_plist_using_reported(bytes: &[u8], using: Self::PlistDecoders) -> Option<Self>
    where
        Self: ErrorReporter,
    {
        report::decode_or_else(&using.decoder(), bytes, Self::report)
    }

    fn try_from_plist_using_reported(
        bytes: &[u8],
        using: Self::PlistDecoders,
    ) -> Result<Option<Self>, <Self as TryErrorReporter>::Error>
    where
        Self: TryErrorReporter,
    {
        report::try_decode_or_else(&using.decoder(), bytes, Self::try_report)
    }
}

pub trait MultiPlistEncodable: Serialize {
    type PlistEncoders: EncoderSelector<Encoder = PlistEncoder>;

    fn to_plist_using(&self, using: Self::PlistEncoders) -> Result<Vec<u8>, EncodeError> {
        using.encoder().encode(self)
    }

    fn write_plist_file_using(
        &self,
        path: impl AsRef<Path>,
        using: Self::PlistEncoders,
    ) -> Result<(), FileError> {
        file::write_with(path.as_ref(), self, &using.encoder())
    }
}

pub trait DefaultPlistDecodable: MultiPlistDecodable {
    const DEFAULT_PLIST_DECODER: Self::PlistDecoders;
}

pub trait DefaultPlistEncodable: MultiPlistEncodable {
    const DEFAULT_PLIST_ENCODER: Self::PlistEncoders;
}

impl<T: DefaultPlistDecodable> PlistDecodable for T {
    fn plist_decoder() -> PlistDecoder {
        T::DEFAULT_PLIST_DECODER.decoder()
    }
}

impl<T: DefaultPlistEncodable> PlistEncodable for T {
    fn plist_encoder() -> PlistEncoder {
        T::DEFAULT_PLIST_ENCODER.encoder()
    }
}

pub trait PlistCodable: PlistDecodable + PlistEncodable {}

impl<T: PlistDecodable + PlistEncodable> PlistCodable for T {}

pub trait MultiPlistCodable: MultiPlistDecodable + MultiPlistEncodable {}

impl<T: MultiPlistDecodable + MultiPlistEncodable> MultiPlistCodable for T {}
