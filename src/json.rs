//! JSON providers, selectors, and capability traits.
//!
//! A type opts in with one of two shapes:
//!
//! * [`JsonDecodable`] / [`JsonEncodable`]: exactly one codec, reached through
//!   `from_json` / `to_json`.
//! * [`MultiJsonDecodable`] / [`MultiJsonEncodable`]: a selector of named
//!   variants, reached through `from_json_using` / `to_json_using`. Adding
//!   [`DefaultJsonDecodable`] / [`DefaultJsonEncodable`] names one variant as
//!   the default and unlocks the zero-argument methods as well.

use crate::error::{DecodeError, EncodeError, FileError};
use crate::file;
use crate::finite::ensure_finite;
use crate::provider::{Decoder, Encoder, Format};
use crate::report::{self, ErrorReporter, TryErrorReporter};
use crate::selector::{DecoderSelector, EncoderSelector, Selector};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;

/// JSON decoder. Strict RFC 8259 unless JSON5 is allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct JsonDecoder {
    json5: bool,
}

impl JsonDecoder {
    pub const fn new() -> Self {
        Self { json5: false }
    }

    /// Accept the JSON5 superset: comments, trailing commas, unquoted keys,
    /// single-quoted strings.
    pub const fn allow_json5(mut self, allow: bool) -> Self {
        self.json5 = allow;
        self
    }

    pub fn allows_json5(&self) -> bool {
        self.json5
    }
}

impl Decoder for JsonDecoder {
    fn format(&self) -> Format {
        Format::Json
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        if self.json5 {
            let text = std::str::from_utf8(bytes)?;
            return Ok(json5::from_str(text)?);
        }
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// JSON encoder, compact unless pretty printing is enabled.
///
/// NaN and the infinities fail with [`EncodeError::NonFinite`] instead of
/// being written as `null`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct JsonEncoder {
    pretty: bool,
}

impl JsonEncoder {
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Encoder for JsonEncoder {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        ensure_finite(value)?;
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(bytes)
    }
}

/// Stock JSON decoder variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JsonDecoders {
    Base,
    Json5,
}

impl Selector for JsonDecoders {
    const ALL: &'static [Self] = &[JsonDecoders::Base, JsonDecoders::Json5];

    fn name(&self) -> &'static str {
        match self {
            JsonDecoders::Base => "base",
            JsonDecoders::Json5 => "json5",
        }
    }
}

impl DecoderSelector for JsonDecoders {
    type Decoder = JsonDecoder;

    fn decoder(&self) -> JsonDecoder {
        match self {
            JsonDecoders::Base => JsonDecoder::new(),
            JsonDecoders::Json5 => JsonDecoder::new().allow_json5(true),
        }
    }
}

impl fmt::Display for JsonDecoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stock JSON encoder variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JsonEncoders {
    Base,
    Pretty,
}

impl Selector for JsonEncoders {
    const ALL: &'static [Self] = &[JsonEncoders::Base, JsonEncoders::Pretty];

    fn name(&self) -> &'static str {
        match self {
            JsonEncoders::Base => "base",
            JsonEncoders::Pretty => "pretty",
        }
    }
}

impl EncoderSelector for JsonEncoders {
    type Encoder = JsonEncoder;

    fn encoder(&self) -> JsonEncoder {
        match self {
            JsonEncoders::Base => JsonEncoder::new(),
            JsonEncoders::Pretty => JsonEncoder::new().pretty(true),
        }
    }
}

impl fmt::Display for JsonEncoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type with one canonical JSON decoder.
///
/// The default decoder is strict JSON, so `impl JsonDecodable for T {}` is
/// enough for most types. A type that names a default variant gets this
/// trait from [`DefaultJsonDecodable`] and cannot also implement it by hand:
///
/// ```compile_fail
/// use codecap::{DefaultJsonDecodable, JsonDecodable, JsonDecoders, MultiJsonDecodable};
///
/// #[derive(serde::Deserialize)]
/// struct Score {
///     points: i64,
/// }
///
/// impl MultiJsonDecodable for Score {
///     type JsonDecoders = JsonDecoders;
/// }
///
/// impl DefaultJsonDecodable for Score {
///     const DEFAULT_JSON_DECODER: JsonDecoders = JsonDecoders::Json5;
/// }
///
/// impl JsonDecodable for Score {}
/// ```
pub trait JsonDecodable: DeserializeOwned {
    fn json_decoder() -> JsonDecoder {
        JsonDecoder::new()
    }

    fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::json_decoder().decode(bytes)
    }

    fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FileError> {
        file::read_with(path.as_ref(), &Self::json_decoder())
    }

    /// Decode, handing any failure to the type's [`ErrorReporter`].
    fn from_json_reported(bytes: &[u8]) -> Option<Self>
    where
        Self: ErrorReporter,
    {
        report::decode_or_else(&Self::json_decoder(), bytes, Self::report)
    }

    /// Decode, letting the type's [`TryErrorReporter`] accept the failure
    /// (`Ok(None)`) or escalate it.
    fn try_from_json_reported(
        bytes: &[u8],
    ) -> Result<Option<Self>, <Self as TryErrorReporter>::Error>
    where
        Self: TryErrorReporter,
    {
        report::try_decode_or_else(&Self::json_decoder(), bytes, Self::try_report)
    }
}

/// A type with one canonical JSON encoder.
pub trait JsonEncodable: Serialize {
    fn json_encoder() -> JsonEncoder {
        JsonEncoder::new()
    }

    fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        Self::json_encoder().encode(self)
    }

    fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        file::write_with(path.as_ref(), self, &Self::json_encoder())
    }
}

/// A type that decodes JSON with a variant chosen by the caller.
///
/// Without [`DefaultJsonDecodable`] there is no zero-argument `from_json`:
///
/// ```compile_fail
/// use codecap::{JsonDecodable, JsonDecoders, MultiJsonDecodable};
///
/// #[derive(serde::Deserialize)]
/// struct Score {
///     points: i64,
/// }
///
/// impl MultiJsonDecodable for Score {
///     type JsonDecoders = JsonDecoders;
/// }
///
/// let _ = Score::from_json(br#"{"points":84}"#);
/// ```
pub trait MultiJsonDecodable: DeserializeOwned {
    type JsonDecoders: DecoderSelector<Decoder = JsonDecoder>;

    fn from_json_using(bytes: &[u8], using: Self::JsonDecoders) -> Result<Self, DecodeError> {
        using.decoder().decode(bytes)
    }

    fn from_json_file_using(
        path: impl AsRef<Path>,
        using: Self::JsonDecoders,
    ) -> Result<Self, FileError> {
        file::read_with(path.as_ref(), &using.decoder())
    }

    fn from_json_using_reported(bytes: &[u8], using: Self::JsonDecoders) -> Option<Self>
    where
        Self: ErrorReporter,
    {
        report::decode_or_else(&using.decoder(), bytes, Self::report)
    }

    fn try_from_json_using_reported(
        bytes: &[u8],
        using: Self::JsonDecoders,
    ) -> Result<Option<Self>, <Self as TryErrorReporter>::Error>
    where
        Self: TryErrorReporter,
    {
        report::try_decode_or_else(&using.decoder(), bytes, Self::try_report)
    }
}

/// A type that encodes JSON with a variant chosen by the caller.
pub trait MultiJsonEncodable: Serialize {
    type JsonEncoders: EncoderSelector<Encoder = JsonEncoder>;

    fn to_json_using(&self, using: Self::JsonEncoders) -> Result<Vec<u8>, EncodeError> {
        using.encoder().encode(self)
    }

    fn write_json_file_using(
        &self,
        path: impl AsRef<Path>,
        using: Self::JsonEncoders,
    ) -> Result<(), FileError> {
        file::write_with(path.as_ref(), self, &using.encoder())
    }
}

/// Names the decoder variant used when the caller does not pick one.
pub trait DefaultJsonDecodable: MultiJsonDecodable {
    const DEFAULT_JSON_DECODER: Self::JsonDecoders;
}

/// Names the encoder variant used when the caller does not pick one.
pub trait DefaultJsonEncodable: MultiJsonEncodable {
    const DEFAULT_JSON_ENCODER: Self::JsonEncoders;
}

impl<T: DefaultJsonDecodable> JsonDecodable for T {
    fn json_decoder() -> JsonDecoder {
        T::DEFAULT_JSON_DECODER.decoder()
    }
}

impl<T: DefaultJsonEncodable> JsonEncodable for T {
    fn json_encoder() -> JsonEncoder {
        T::DEFAULT_JSON_ENCODER.encoder()
    }
}

pub trait JsonCodable: JsonDecodable + JsonEncodable {}

impl<T: JsonDecodable + JsonEncodable> JsonCodable for T {}

pub trait MultiJsonCodable: MultiJsonDecodable + MultiJsonEncodable {}

impl<T: MultiJsonDecodable + MultiJsonEncodable> MultiJsonCodable for T {}
