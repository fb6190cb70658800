//! Closed sets of named codec variants.
//!
//! A selector is a plain enum whose variants each map to one provider. Types
//! that support several codecs for a format name their selector through an
//! associated type, so the set of choices is fixed at compile time.

use crate::provider::{Decoder, Encoder};
use std::fmt::Debug;

/// A finite, enumerable set of named variants.
pub trait Selector: Copy + Debug + Send + Sync + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Stable lowercase name of the variant.
    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.name() == name)
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Selector::name).collect()
    }
}

/// A selector whose variants are decoders.
pub trait DecoderSelector: Selector {
    type Decoder: Decoder;

    fn decoder(&self) -> Self::Decoder;
}

/// A selector whose variants are encoders.
pub trait EncoderSelector: Selector {
    type Encoder: Encoder;

    fn encoder(&self) -> Self::Encoder;
}
