//! Optional-returning decode helpers that route failures to a callback.
//!
//! These trade a `Result` for an `Option` at call sites that only care about
//! success, but the failure is never dropped on the floor: every `None` has
//! passed its `DecodeError` (and the offending input) to a handler first.

use crate::error::DecodeError;
use crate::provider::{Decoder, Format};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Decode with `decoder`; on failure call `on_error` and return `None`.
pub fn decode_or_else<T, D, F>(decoder: &D, bytes: &[u8], on_error: F) -> Option<T>
where
    T: DeserializeOwned,
    D: Decoder,
    F: FnOnce(&DecodeError, &[u8]),
{
    match decoder.decode(bytes) {
        Ok(value) => Some(value),
        Err(err) => {
            on_error(&err, bytes);
            None
        }
    }
}

/// Like [`decode_or_else`], but the handler may escalate by returning an
/// error of its own.
///
/// `Ok(None)` means decoding failed and the handler accepted it.
pub fn try_decode_or_else<T, D, E, F>(
    decoder: &D,
    bytes: &[u8],
    on_error: F,
) -> Result<Option<T>, E>
where
    T: DeserializeOwned,
    D: Decoder,
    F: FnOnce(DecodeError, &[u8]) -> Result<(), E>,
{
    match decoder.decode(bytes) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            on_error(err, bytes)?;
            Ok(None)
        }
    }
}

/// A type-level default handler for decode failures.
///
/// Implementing this (possibly with an empty body) unlocks
/// `from_json_reported` / `from_plist_reported` on decodable types, and the
/// `*_using_reported` forms on multi-codec types.
pub trait ErrorReporter {
    fn report(error: &DecodeError, input: &[u8]) {
        log_decode_failure(std::any::type_name::<Self>(), error, input);
    }
}

/// A type-level handler that may escalate a decode failure.
///
/// `Ok(())` accepts the failure and the decode yields `None`; an error aborts
/// the decode with it. Unlocks `try_from_json_reported` /
/// `try_from_plist_reported` and their `*_using` forms.
pub trait TryErrorReporter {
    type Error;

    fn try_report(error: DecodeError, input: &[u8]) -> Result<(), Self::Error>;
}

/// Emit a `warn!` event describing a decode failure.
pub fn log_decode_failure(target_type: &str, error: &DecodeError, input: &[u8]) {
    let format: Format = error.format();
    warn!(
        target_type,
        %format,
        input_len = input.len(),
        preview = %preview(input),
        "decode failed: {error}"
    );
}

const PREVIEW_LEN: usize = 64;

fn preview(input: &[u8]) -> String {
    let head = &input[..input.len().min(PREVIEW_LEN)];
    let mut text = String::from_utf8_lossy(head).into_owned();
    if input.len() > PREVIEW_LEN {
        text.push_str("...");
    }
    text
}
