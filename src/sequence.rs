//! Lifting single-value capabilities to ordered sequences.
//!
//! A sequence is encoded as one array through its *element* type's codec.
//! `Vec<T>` and `[T]` pick up the element's capability traits directly; the
//! free functions below cover any other serde sequence (for example
//! `VecDeque<T>`).
//!
//! Round trips through these functions preserve order because JSON arrays and
//! plist arrays are ordered; nothing here re-sorts or deduplicates.

use crate::error::{DecodeError, EncodeError};
use crate::json::{
    JsonDecodable, JsonDecoder, JsonEncodable, JsonEncoder, MultiJsonDecodable, MultiJsonEncodable,
};
use crate::plist::{
    MultiPlistDecodable, MultiPlistEncodable, PlistDecodable, PlistDecoder, PlistEncodable,
    PlistEncoder,
};
use crate::provider::{Decoder, Encoder};
use crate::selector::{DecoderSelector, EncoderSelector};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;

/// An ordered collection serialized as a single array of `Element`.
pub trait Sequence {
    type Element;
}

impl<T> Sequence for Vec<T> {
    type Element = T;
}

impl<T> Sequence for VecDeque<T> {
    type Element = T;
}

impl<T> Sequence for [T] {
    type Element = T;
}

impl<T> Sequence for Box<[T]> {
    type Element = T;
}

pub fn decode_json_seq<S>(bytes: &[u8]) -> Result<S, DecodeError>
where
    S: Sequence + DeserializeOwned,
    S::Element: JsonDecodable,
{
    <S::Element as JsonDecodable>::json_decoder().decode(bytes)
}

pub fn decode_json_seq_using<S>(
    bytes: &[u8],
    using: <S::Element as MultiJsonDecodable>::JsonDecoders,
) -> Result<S, DecodeError>
where
    S: Sequence + DeserializeOwned,
    S::Element: MultiJsonDecodable,
{
    using.decoder().decode(bytes)
}

pub fn encode_json_seq<S>(seq: &S) -> Result<Vec<u8>, EncodeError>
where
    S: Sequence + Serialize + ?Sized,
    S::Element: JsonEncodable,
{
    <S::Element as JsonEncodable>::json_encoder().encode(seq)
}

pub fn encode_json_seq_using<S>(
    seq: &S,
    using: <S::Element as MultiJsonEncodable>::JsonEncoders,
) -> Result<Vec<u8>, EncodeError>
where
    S: Sequence + Serialize + ?Sized,
    S::Element: MultiJsonEncodable,
{
    using.encoder().encode(seq)
}

pub fn decode_plist_seq<S>(bytes: &[u8]) -> Result<S, DecodeError>
where
    S: Sequence + DeserializeOwned,
    S::Element: PlistDecodable,
{
    <S::Element as PlistDecodable>::plist_decoder().decode(bytes)
}

pub fn decode_plist_seq_using<S>(
    bytes: &[u8],
    using: <S::Element as MultiPlistDecodable>::PlistDecoders,
) -> Result<S, DecodeError>
where
    S: Sequence + DeserializeOwned,
    S::Element: MultiPlistDecodable,
{
    using.decoder().decode(bytes)
}

pub fn encode_plist_seq<S>(seq: &S) -> Result<Vec<u8>, EncodeError>
where
    S: Sequence + Serialize + ?Sized,
    S::Element: PlistEncodable,
{
    <S::Element as PlistEncodable>::plist_encoder().encode(seq)
}

pub fn encode_plist_seq_using<S>(
    seq: &S,
    using: <S::Element as MultiPlistEncodable>::PlistEncoders,
) -> Result<Vec<u8>, EncodeError>
where
    S: Sequence + Serialize + ?Sized,
    S::Element: MultiPlistEncodable,
{
    using.encoder().encode(seq)
}

impl<T: JsonDecodable> JsonDecodable for Vec<T> {
    fn json_decoder() -> JsonDecoder {
        T::json_decoder()
    }
}

impl<T: MultiJsonDecodable> MultiJsonDecodable for Vec<T> {
    type JsonDecoders = T::JsonDecoders;
}

impl<T: JsonEncodable> JsonEncodable for Vec<T> {
    fn json_encoder() -> JsonEncoder {
        T::json_encoder()
    }
}

impl<T: JsonEncodable> JsonEncodable for [T] {
    fn json_encoder() -> JsonEncoder {
        T::json_encoder()
    }
}

impl<T: MultiJsonEncodable> MultiJsonEncodable for Vec<T> {
    type JsonEncoders = T::JsonEncoders;
}

impl<T: MultiJsonEncodable> MultiJsonEncodable for [T] {
    type JsonEncoders = T::JsonEncoders;
}

impl<T: PlistDecodable> PlistDecodable for Vec<T> {
    fn plist_decoder() -> PlistDecoder {
        T::plist_decoder()
    }
}

impl<T: MultiPlistDecodable> MultiPlistDecodable for Vec<T> {
    type PlistDecoders = T::PlistDecoders;
}

impl<T: PlistEncodable> PlistEncodable for Vec<T> {
    fn plist_encoder() -> PlistEncoder {
        T::plist_encoder()
    }
}

impl<T: PlistEncodable> PlistEncodable for [T] {
    fn plist_encoder() -> PlistEncoder {
        T::plist_encoder()
    }
}

impl<T: MultiPlistEncodable> MultiPlistEncodable for Vec<T> {
    type PlistEncoders = T::PlistEncoders;
}

impl<T: MultiPlistEncodable> MultiPlistEncodable for [T] {
    type PlistEncoders = T::PlistEncoders;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{DefaultJsonDecodable, JsonDecoders, JsonEncoders};
    use serde::Deserialize;
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Reading {
        sensor: String,
        value: i64,
    }

    impl MultiJsonDecodable for Reading {
        type JsonDecoders = JsonDecoders;
    }

    impl MultiJsonEncodable for Reading {
        type JsonEncoders = JsonEncoders;
    }

    impl PlistDecodable for Reading {}

    impl PlistEncodable for Reading {}

    // Selectors without a default give no zero-argument JSON methods, for
    // the element or its sequences.
    assert_not_impl_any!(Reading: JsonDecodable, JsonEncodable, DefaultJsonDecodable);
    assert_not_impl_any!(Vec<Reading>: JsonDecodable, JsonEncodable);
    assert_not_impl_any!([Reading]: JsonEncodable);
    assert_impl_all!(Vec<Reading>: MultiJsonDecodable, MultiJsonEncodable, PlistDecodable);
    assert_impl_all!([Reading]: MultiJsonEncodable, PlistEncodable);

    fn readings() -> VecDeque<Reading> {
        VecDeque::from(vec![
            Reading {
                sensor: "north".to_string(),
                value: 3,
            },
            Reading {
                sensor: "south".to_string(),
                value: -7,
            },
        ])
    }

    #[test]
    fn deque_round_trips_through_element_selector() {
        let deque = readings();
        let bytes = encode_json_seq_using(&deque, JsonEncoders::Pretty).unwrap();
        let back: VecDeque<Reading> = decode_json_seq_using(&bytes, JsonDecoders::Base).unwrap();
        assert_eq!(back, deque);
    }

    #[test]
    fn deque_round_trips_through_element_plist_codec() {
        let bytes = encode_plist_seq(&readings()).unwrap();
        let back: VecDeque<Reading> = decode_plist_seq(&bytes).unwrap();
        assert_eq!(back, readings());
    }

    #[test]
    fn slices_and_vectors_encode_identically() {
        let items: Vec<Reading> = readings().into();
        let from_vec = items.to_json_using(JsonEncoders::Base).unwrap();
        let from_slice = items[..].to_json_using(JsonEncoders::Base).unwrap();
        assert_eq!(from_vec, from_slice);
        assert_eq!(
            encode_plist_seq(&items[..]).unwrap(),
            items.to_plist().unwrap()
        );
    }
}
