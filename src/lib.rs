//! Capability traits for JSON and property-list codecs.
//!
//! A type opts into a format by implementing a small trait:
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Score { name: String, points: i64 }
//!
//! // One canonical codec.
//! impl JsonDecodable for Score {}
//!
//! // Named variants, with `Pretty` as the zero-argument default.
//! impl MultiJsonEncodable for Score { type JsonEncoders = JsonEncoders; }
//! impl DefaultJsonEncodable for Score {
//!     const DEFAULT_JSON_ENCODER: JsonEncoders = JsonEncoders::Pretty;
//! }
//!
//! let score = Score::from_json(bytes)?;
//! let pretty = score.to_json()?;
//! let compact = score.to_json_using(JsonEncoders::Base)?;
//! ```
//!
//! Everything resolves statically: a type without a default variant simply
//! has no zero-argument method. `Vec<T>` and `[T]` inherit `T`'s
//! capabilities, and the same traits expose file helpers. [`network`] adds
//! HTTP helpers on top of any [`Transport`].

pub mod error;
pub mod file;
mod finite;
pub mod json;
pub mod network;
pub mod plist;
pub mod provider;
pub mod report;
pub mod selector;
pub mod sequence;

pub use crate::plist::{
    DefaultPlistDecodable, DefaultPlistEncodable, MultiPlistCodable, MultiPlistDecodable,
    MultiPlistEncodable, PlistCodable, PlistDecodable, PlistDecoder, PlistDecoders, PlistEncodable,
    PlistEncoder, PlistEncoders, PlistFormat,
};
pub use error::{DecodeError, EncodeError, FileError, NetworkError, TransportError, UnknownFormat};
pub use json::{
    DefaultJsonDecodable, DefaultJsonEncodable, JsonCodable, JsonDecodable, JsonDecoder,
    JsonDecoders, JsonEncodable, JsonEncoder, JsonEncoders, MultiJsonCodable, MultiJsonDecodable,
    MultiJsonEncodable,
};
pub use network::{Transport, TransportExt};
pub use provider::{Decoder, Encoder, Format};
pub use report::{ErrorReporter, TryErrorReporter, decode_or_else, try_decode_or_else};
pub use selector::{DecoderSelector, EncoderSelector, Selector};
pub use sequence::Sequence;

#[cfg(feature = "http")]
pub use network::HttpTransport;

/// Both formats, both directions, one canonical codec each.
pub trait Codable: JsonCodable + PlistCodable {}

impl<T: JsonCodable + PlistCodable> Codable for T {}

/// Both formats, both directions, each through a selector.
pub trait MultiCodable: MultiJsonCodable + MultiPlistCodable {}

impl<T: MultiJsonCodable + MultiPlistCodable> MultiCodable for T {}
